use enhosted_collections::Keyed;
use enhosted_marshal::PlainData;
use serde::{Deserialize, Serialize};

use crate::StoredDocument;

/// A tracking domain pointed at the event endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDomain {
    #[serde(default)]
    pub name: String,
    /// Verification status as reported by the certificate service.
    #[serde(default)]
    pub status: String,
}

impl CustomDomain {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            status: "pending".to_string(),
        }
    }
}

impl Keyed for CustomDomain {
    fn key(&self) -> String {
        self.name.clone()
    }
}

impl PlainData for CustomDomain {}

/// The stored custom domains of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDomains {
    #[serde(rename = "_lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(
        rename = "_certificateExpiration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_expiration: Option<String>,
    #[serde(default)]
    pub domains: Vec<CustomDomain>,
}

impl PlainData for CustomDomains {}

impl StoredDocument for CustomDomains {
    type Item = CustomDomain;

    fn items(&self) -> &[CustomDomain] {
        &self.domains
    }

    fn with_items(domains: Vec<CustomDomain>) -> Self {
        Self {
            domains,
            ..Self::default()
        }
    }
}
