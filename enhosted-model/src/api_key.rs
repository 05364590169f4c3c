use enhosted_collections::Keyed;
use enhosted_marshal::PlainData;
use serde::{Deserialize, Serialize};

use crate::StoredDocument;
use crate::ids::{random_id, random_secret};

/// A pair of secrets that lets a site (client secret) or a server (server
/// secret) send events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(default)]
    pub uid: String,
    #[serde(rename = "jsAuth", default)]
    pub client_secret: String,
    #[serde(rename = "serverAuth", default)]
    pub server_secret: String,
    /// Origins allowed to use the client secret. Empty means any.
    #[serde(default)]
    pub origins: Vec<String>,
}

impl ApiKey {
    /// Creates a key with fresh random secrets and no origin restriction.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            uid: random_id(),
            client_secret: random_secret(),
            server_secret: random_secret(),
            origins: Vec::new(),
        }
    }

    /// Adds an allowed origin unless it is already listed.
    pub fn allow_origin(&mut self, origin: &str) -> bool {
        let origin = origin.trim();
        if origin.is_empty() || self.origins.iter().any(|o| o == origin) {
            return false;
        }
        self.origins.push(origin.to_string());
        true
    }

    /// Removes an allowed origin. Returns whether it was present.
    pub fn revoke_origin(&mut self, origin: &str) -> bool {
        let before = self.origins.len();
        self.origins.retain(|o| o != origin);
        self.origins.len() != before
    }
}

impl Keyed for ApiKey {
    fn key(&self) -> String {
        self.uid.clone()
    }
}

impl PlainData for ApiKey {}

/// The stored API keys of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(rename = "_lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub keys: Vec<ApiKey>,
}

impl PlainData for ApiKeys {}

impl StoredDocument for ApiKeys {
    type Item = ApiKey;

    fn items(&self) -> &[ApiKey] {
        &self.keys
    }

    fn with_items(keys: Vec<ApiKey>) -> Self {
        Self {
            last_updated: None,
            keys,
        }
    }
}
