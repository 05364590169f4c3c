//! Classification of field type tags.

use serde_json::{Value, json};

use crate::TemplateConfig;

/// What a field's type tag denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bytes,
    Integer,
    Float,
    Bool,
    /// A free-form struct such as `google.protobuf.Struct`.
    Struct,
    /// A reference to another named type in the descriptor.
    Reference(String),
}

impl FieldKind {
    /// Classifies a type tag. Unknown tags are references.
    pub fn classify(type_name: &str, config: &TemplateConfig) -> Self {
        match type_name {
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "int32" | "int64" | "uint32" | "uint64" | "sint32" | "sint64" | "fixed32"
            | "fixed64" | "sfixed32" | "sfixed64" => Self::Integer,
            "float" | "double" => Self::Float,
            "bool" | "boolean" => Self::Bool,
            other if config.is_struct_type(other) => Self::Struct,
            other => Self::Reference(other.to_string()),
        }
    }

    /// Zero value for a scalar kind. `None` for references.
    pub fn zero_value(&self) -> Option<Value> {
        match self {
            Self::String | Self::Bytes => Some(json!("")),
            Self::Integer => Some(json!(0)),
            Self::Float => Some(json!(0.0)),
            Self::Bool => Some(json!(true)),
            Self::Struct => Some(json!({})),
            Self::Reference(_) => None,
        }
    }
}
