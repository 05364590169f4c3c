//! EventNative server configuration built from a project's stored keys and
//! destinations.
//!
//! Each [`Destination`] maps to one [`DestinationConfig`], keyed by the
//! destination id. The field names follow the EventNative config file.

use std::collections::BTreeMap;

use enhosted_marshal::new_instance;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::ids::random_name;
use crate::{
    ApiKey, ApiKeys, ClickHouseFormData, Destination, DestinationForm, DestinationType,
    Destinations, MapRule, Mappings, ModelError, ModelResult, PostgresFormData, RedshiftFormData,
    StoredDocument, TableSettings,
};

/// Port every Redshift cluster listens on.
pub const REDSHIFT_PORT: u16 = 5439;

/// Destination mode that stages files before loading them.
pub const BATCH_MODE: &str = "batch";

/// S3 bucket used to stage batch uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Config {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    /// Unmapped fields are kept.
    Default,
    /// Only mapped fields are written.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLayout {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub table_name_template: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mapping: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_type: Option<MappingType>,
}

impl DataLayout {
    fn for_table(table: &TableSettings) -> Self {
        Self {
            table_name_template: table.table_name.clone(),
            ..Self::default()
        }
    }

    /// Adds the destination's mapping rules. No rules leaves the layout as is.
    pub fn apply_mappings(&mut self, mappings: &Mappings) {
        if mappings.is_empty() {
            return;
        }
        self.mapping = mappings.rules.iter().map(MapRule::to_eventnative_rule).collect();
        self.mapping_type = Some(if mappings.keep_fields {
            MappingType::Default
        } else {
            MappingType::Strict
        });
    }
}

/// Connection settings of a SQL warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub host: String,
    pub port: u16,
    pub db: String,
    pub schema: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickHouseConfig {
    pub dsns: Vec<String>,
    pub database: String,
    pub cluster: String,
}

/// One entry of the `destinations` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationConfig {
    #[serde(rename = "type")]
    pub destination_type: DestinationType,
    pub mode: String,
    pub data_layout: DataLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DataSourceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickhouse: Option<ClickHouseConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Config>,
    /// BigQuery settings, passed through from the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<Value>,
    /// Snowflake settings, passed through from the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snowflake: Option<Value>,
}

impl DestinationConfig {
    fn new(destination_type: DestinationType, table: &TableSettings) -> Self {
        Self {
            destination_type,
            mode: table.mode.clone(),
            data_layout: DataLayout::for_table(table),
            datasource: None,
            clickhouse: None,
            s3: None,
            google: None,
            snowflake: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    /// API keys accepted by the server.
    pub auth: Vec<ApiKey>,
}

/// A complete EventNative configuration for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventNativeConfig {
    pub server: ServerConfig,
    pub destinations: BTreeMap<String, DestinationConfig>,
}

impl EventNativeConfig {
    /// Builds the configuration of a project.
    ///
    /// `server_name` defaults to a random five-character name. `hosted_s3`
    /// is the bucket used by Redshift destinations that opt into hosted
    /// staging. Fails on duplicate destination ids and on any destination
    /// that cannot be mapped.
    pub fn build(
        server_name: Option<&str>,
        keys: &ApiKeys,
        destinations: &Destinations,
        hosted_s3: Option<&S3Config>,
    ) -> ModelResult<Self> {
        let list = destinations.to_list()?;
        let mut mapped = BTreeMap::new();
        for destination in &list {
            let config = destination.to_eventnative_config(hosted_s3)?;
            debug!(id = %destination.id, kind = %config.destination_type, "mapped destination");
            mapped.insert(destination.id.clone(), config);
        }

        Ok(Self {
            server: ServerConfig {
                name: server_name.map_or_else(|| random_name(5), str::to_string),
                auth: keys.keys.clone(),
            },
            destinations: mapped,
        })
    }
}

impl MapRule {
    /// The rule in EventNative syntax: `src -> (cast) dst`.
    pub fn to_eventnative_rule(&self) -> String {
        let cast = match self.action.as_str() {
            "cast/int" => "(integer) ",
            "cast/double" => "(double) ",
            "cast/date" => "(timestamp) ",
            "cast/string" => "(string) ",
            _ => "",
        };
        format!("{} -> {}{}", self.source_field, cast, self.destination_field)
    }
}

impl Destination {
    /// Maps this destination to its EventNative configuration.
    ///
    /// Fails on an unknown `_type`, on form data of the wrong shape, and on a
    /// Redshift destination asking for hosted staging when `hosted_s3` is
    /// `None`.
    pub fn to_eventnative_config(&self, hosted_s3: Option<&S3Config>) -> ModelResult<DestinationConfig> {
        let mut config = match self.form()? {
            DestinationForm::Postgres(form) => postgres(&form),
            DestinationForm::ClickHouse(form) => clickhouse(&form),
            DestinationForm::Redshift(form) => redshift(&self.id, &form, hosted_s3)?,
            DestinationForm::BigQuery(raw) => {
                let (table, rest) = split_table_settings(&raw)?;
                DestinationConfig {
                    google: Some(rest),
                    ..DestinationConfig::new(DestinationType::BigQuery, &table)
                }
            }
            DestinationForm::Snowflake(raw) => {
                let (table, rest) = split_table_settings(&raw)?;
                DestinationConfig {
                    snowflake: Some(rest),
                    ..DestinationConfig::new(DestinationType::Snowflake, &table)
                }
            }
        };
        config.data_layout.apply_mappings(&self.mappings);
        Ok(config)
    }
}

fn postgres(form: &PostgresFormData) -> DestinationConfig {
    DestinationConfig {
        datasource: Some(DataSourceConfig {
            host: form.host.clone(),
            port: form.port,
            db: form.database.clone(),
            schema: form.schema.clone(),
            username: form.username.clone(),
            password: form.password.clone(),
        }),
        ..DestinationConfig::new(DestinationType::Postgres, &form.table)
    }
}

fn clickhouse(form: &ClickHouseFormData) -> DestinationConfig {
    DestinationConfig {
        clickhouse: Some(ClickHouseConfig {
            dsns: form.dsn_list().into_iter().map(str::to_string).collect(),
            database: form.database.clone(),
            cluster: form.cluster.clone(),
        }),
        ..DestinationConfig::new(DestinationType::ClickHouse, &form.table)
    }
}

fn redshift(
    id: &str,
    form: &RedshiftFormData,
    hosted_s3: Option<&S3Config>,
) -> ModelResult<DestinationConfig> {
    let s3 = if form.use_hosted_s3 {
        let hosted = hosted_s3.ok_or_else(|| ModelError::HostedS3Unavailable(id.to_string()))?;
        Some(S3Config {
            folder: Some(id.to_string()),
            ..hosted.clone()
        })
    } else if form.table.mode == BATCH_MODE {
        Some(S3Config {
            access_key_id: form.s3_access_key.clone(),
            secret_access_key: form.s3_secret_key.clone(),
            bucket: form.s3_bucket.clone(),
            region: form.s3_region.clone(),
            folder: Some(id.to_string()),
        })
    } else {
        None
    };

    Ok(DestinationConfig {
        datasource: Some(DataSourceConfig {
            host: form.host.clone(),
            port: REDSHIFT_PORT,
            db: form.database.clone(),
            schema: form.schema.clone(),
            username: form.username.clone(),
            password: form.password.clone(),
        }),
        s3,
        ..DestinationConfig::new(DestinationType::Redshift, &form.table)
    })
}

/// Separates `mode` and `tableName` from the rest of an untyped form.
fn split_table_settings(raw: &Value) -> ModelResult<(TableSettings, Value)> {
    let table: TableSettings = new_instance(raw)?;
    let mut rest = raw.clone();
    if let Value::Object(map) = &mut rest {
        map.remove("mode");
        map.remove("tableName");
    }
    Ok((table, rest))
}
