//! Destinations: databases the event pipeline writes to.
//!
//! A destination is stored as a generic envelope (`_id`, `_type`, raw
//! `_formData`, mapping rules). The form data is interpreted per type through
//! [`Destination::form`].

use enhosted_collections::Keyed;
use enhosted_marshal::{PlainData, new_instance, to_pure_json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::ids::random_id;
use crate::{ModelError, ModelResult, StoredDocument};

/// Destination kinds the console can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Postgres,
    ClickHouse,
    Redshift,
    BigQuery,
    Snowflake,
}

impl DestinationType {
    /// All kinds, in the order the console lists them.
    pub const ALL: [DestinationType; 5] = [
        Self::Postgres,
        Self::ClickHouse,
        Self::Redshift,
        Self::BigQuery,
        Self::Snowflake,
    ];

    /// The `_type` value stored with a destination.
    #[must_use]
    pub const fn type_id(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::ClickHouse => "clickhouse",
            Self::Redshift => "redshift",
            Self::BigQuery => "bigquery",
            Self::Snowflake => "snowflake",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Postgres => "PostgresSQL",
            Self::ClickHouse => "ClickHouse",
            Self::Redshift => "Redshift",
            Self::BigQuery => "BigQuery",
            Self::Snowflake => "Snowflake",
        }
    }

    pub fn from_type_id(type_id: &str) -> ModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.type_id() == type_id)
            .ok_or_else(|| ModelError::UnknownDestinationType(type_id.to_string()))
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_id())
    }
}

impl FromStr for DestinationType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_type_id(s)
    }
}

/// One field-mapping rule applied to events before they are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRule {
    #[serde(rename = "_action", default)]
    pub action: String,
    #[serde(rename = "_srcField", default)]
    pub source_field: String,
    #[serde(rename = "_dstField", default)]
    pub destination_field: String,
}

/// Field mappings of a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mappings {
    /// Keep fields that no rule mentions.
    #[serde(rename = "_keepUnmappedFields", default)]
    pub keep_fields: bool,
    #[serde(rename = "_mappings", default)]
    pub rules: Vec<MapRule>,
}

impl Mappings {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A configured destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// User-chosen name, unique per project.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Generated unique id.
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(rename = "_type", default)]
    pub destination_type: String,
    #[serde(rename = "_formData", default = "empty_object")]
    pub form_data: Value,
    #[serde(rename = "_mappings", default)]
    pub mappings: Mappings,
    #[serde(rename = "_onlyKeys", default)]
    pub only_keys: Vec<String>,
}

impl Default for Destination {
    fn default() -> Self {
        Self {
            id: String::new(),
            uid: String::new(),
            destination_type: String::new(),
            form_data: empty_object(),
            mappings: Mappings::default(),
            only_keys: Vec::new(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Destination {
    /// Creates an empty destination of `kind` named `id`.
    pub fn new(kind: DestinationType, id: &str) -> Self {
        Self {
            id: id.to_string(),
            uid: random_id(),
            destination_type: kind.type_id().to_string(),
            ..Self::default()
        }
    }

    /// The destination's kind.
    pub fn kind(&self) -> ModelResult<DestinationType> {
        DestinationType::from_type_id(&self.destination_type)
    }

    /// Interprets the form data according to `_type`.
    pub fn form(&self) -> ModelResult<DestinationForm> {
        let form = match self.kind()? {
            DestinationType::Postgres => DestinationForm::Postgres(new_instance(&self.form_data)?),
            DestinationType::ClickHouse => {
                DestinationForm::ClickHouse(new_instance(&self.form_data)?)
            }
            DestinationType::Redshift => DestinationForm::Redshift(new_instance(&self.form_data)?),
            DestinationType::BigQuery => DestinationForm::BigQuery(self.form_data.clone()),
            DestinationType::Snowflake => DestinationForm::Snowflake(self.form_data.clone()),
        };
        Ok(form)
    }

    /// Replaces `_type` and `_formData` with `form`.
    pub fn set_form(&mut self, form: &DestinationForm) -> ModelResult<()> {
        self.form_data = form.to_form_data()?;
        self.destination_type = form.kind().type_id().to_string();
        Ok(())
    }

    /// Extract a string value from `_formData` using a JSON pointer (e.g., "/pghost").
    pub fn form_str(&self, pointer: &str) -> Option<&str> {
        self.form_data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `_formData` using a JSON pointer.
    pub fn form_bool(&self, pointer: &str) -> Option<bool> {
        self.form_data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `_formData` using a JSON pointer.
    pub fn form_number(&self, pointer: &str) -> Option<f64> {
        self.form_data.pointer(pointer).and_then(|v| v.as_f64())
    }
}

impl Keyed for Destination {
    fn key(&self) -> String {
        self.id.clone()
    }
}

impl PlainData for Destination {}

/// Settings shared by every destination form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSettings {
    /// `stream` or `batch`.
    #[serde(default)]
    pub mode: String,
    /// Table name template.
    #[serde(rename = "tableName", default)]
    pub table_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresFormData {
    #[serde(flatten)]
    pub table: TableSettings,
    #[serde(rename = "pgdatabase", default)]
    pub database: String,
    #[serde(rename = "pghost", default)]
    pub host: String,
    #[serde(rename = "pgpassword", default)]
    pub password: String,
    #[serde(rename = "pgport", default)]
    pub port: u16,
    #[serde(rename = "pgschema", default)]
    pub schema: String,
    #[serde(rename = "pguser", default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickHouseFormData {
    #[serde(flatten)]
    pub table: TableSettings,
    #[serde(rename = "ch_cluster", default)]
    pub cluster: String,
    #[serde(rename = "ch_database", default)]
    pub database: String,
    /// Comma-separated DSNs.
    #[serde(rename = "ch_dsns", default)]
    pub dsns: String,
}

impl ClickHouseFormData {
    /// The DSN list, split on commas with blanks dropped.
    pub fn dsn_list(&self) -> Vec<&str> {
        self.dsns
            .split(',')
            .map(str::trim)
            .filter(|dsn| !dsn.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedshiftFormData {
    #[serde(flatten)]
    pub table: TableSettings,
    // Stored key keeps its historical spelling.
    #[serde(rename = "redhsiftHost", default)]
    pub host: String,
    #[serde(rename = "redshiftDB", default)]
    pub database: String,
    #[serde(rename = "redshiftPassword", default)]
    pub password: String,
    #[serde(rename = "redshiftSchema", default)]
    pub schema: String,
    #[serde(rename = "redshiftUser", default)]
    pub username: String,
    #[serde(rename = "redshiftS3AccessKey", default)]
    pub s3_access_key: String,
    #[serde(rename = "redshiftS3Bucket", default)]
    pub s3_bucket: String,
    #[serde(rename = "redshiftS3Region", default)]
    pub s3_region: String,
    #[serde(rename = "redshiftS3SecretKey", default)]
    pub s3_secret_key: String,
    #[serde(rename = "redshiftUseHostedS3", default)]
    pub use_hosted_s3: bool,
}

/// Form data of a destination, typed where the console knows the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationForm {
    Postgres(PostgresFormData),
    ClickHouse(ClickHouseFormData),
    Redshift(RedshiftFormData),
    BigQuery(Value),
    Snowflake(Value),
}

impl DestinationForm {
    #[must_use]
    pub fn kind(&self) -> DestinationType {
        match self {
            Self::Postgres(_) => DestinationType::Postgres,
            Self::ClickHouse(_) => DestinationType::ClickHouse,
            Self::Redshift(_) => DestinationType::Redshift,
            Self::BigQuery(_) => DestinationType::BigQuery,
            Self::Snowflake(_) => DestinationType::Snowflake,
        }
    }

    /// The `_formData` JSON for this form.
    pub fn to_form_data(&self) -> ModelResult<Value> {
        let json = match self {
            Self::Postgres(form) => to_pure_json(form)?,
            Self::ClickHouse(form) => to_pure_json(form)?,
            Self::Redshift(form) => to_pure_json(form)?,
            Self::BigQuery(raw) | Self::Snowflake(raw) => raw.clone(),
        };
        Ok(json)
    }
}

/// The stored destinations of one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destinations {
    #[serde(rename = "_lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl PlainData for Destinations {}

impl StoredDocument for Destinations {
    type Item = Destination;

    fn items(&self) -> &[Destination] {
        &self.destinations
    }

    fn with_items(destinations: Vec<Destination>) -> Self {
        Self {
            last_updated: None,
            destinations,
        }
    }
}
