//! Error types for marshalling.

use thiserror::Error;

/// Errors raised while converting between typed entities and plain JSON.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The value could not be represented as JSON (or read back from it).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Merged JSON does not fit the shape of the target type.
    #[error("cannot build {type_name} from plain data: {source}")]
    Shape {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An entity was requested from something other than a JSON object.
    #[error("expected a JSON object for {type_name}, got {found}")]
    ExpectedObject {
        type_name: &'static str,
        found: &'static str,
    },

    /// An entity list was requested from something other than a JSON array.
    #[error("expected a JSON array, got {found}")]
    ExpectedArray { found: &'static str },

    /// One element of an array failed to convert.
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<MarshalError>,
    },

    /// Entity-specific mapping rejected the data.
    #[error("invalid plain data: {0}")]
    Invalid(String),
}

/// Result type for marshalling operations.
pub type MarshalResult<T> = Result<T, MarshalError>;

/// Short JSON kind name used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
