//! Error types for template generation.

use thiserror::Error;

/// Errors that stop a template from being generated at all.
///
/// Problems inside individual fields never surface here; they degrade to an
/// empty object and a [`TemplateWarning`](crate::TemplateWarning).
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No type name was given.
    #[error("type name is empty")]
    EmptyTypeName,

    /// A segment of the starting type path does not exist.
    #[error("can't find {segment} (in {path}) among [{}]", .known.join(", "))]
    UnresolvedRootType {
        segment: String,
        path: String,
        known: Vec<String>,
    },

    /// The starting type path ends on a namespace rather than a message.
    #[error("{path} has no fields")]
    NotAMessage { path: String },

    /// The schema descriptor JSON is malformed.
    #[error("invalid schema descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),

    /// The generator configuration is malformed.
    #[error("invalid template config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
