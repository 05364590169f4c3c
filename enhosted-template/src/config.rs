//! Generator configuration, read from a TOML file such as `enhosted.toml`:
//!
//! ```toml
//! well_known_struct_types = ["google.protobuf.Struct"]
//! max_depth = 32
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::TemplateResult;

/// Tunables for [`TemplateGenerator`](crate::TemplateGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Type names rendered as an empty object without lookup.
    #[serde(default = "default_struct_types")]
    pub well_known_struct_types: Vec<String>,
    /// Deepest chain of nested message references that is expanded.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_struct_types() -> Vec<String> {
    vec!["google.protobuf.Struct".to_string()]
}

fn default_max_depth() -> usize {
    32
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            well_known_struct_types: default_struct_types(),
            max_depth: default_max_depth(),
        }
    }
}

impl TemplateConfig {
    /// Parses a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> TemplateResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No template config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded template config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse template config {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read template config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Whether `type_name` is rendered as a free-form struct.
    pub fn is_struct_type(&self, type_name: &str) -> bool {
        let bare = type_name.strip_prefix('.').unwrap_or(type_name);
        self.well_known_struct_types.iter().any(|t| t == bare)
    }
}
