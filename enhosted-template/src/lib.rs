//! Schema-driven templates for enhosted configuration objects.
//!
//! Given a protobuf JSON descriptor and a dotted message name, produces a
//! JSON skeleton in which every field holds a zero value:
//!
//! | field type | template value |
//! |------------|----------------|
//! | `string`, `bytes` | `""` |
//! | integer types | `0` |
//! | `float`, `double` | `0.0` |
//! | `bool`, `boolean` | `true` |
//! | well-known struct | `{}` |
//! | enum | name of its lowest-numbered value |
//! | message | that message's template |
//! | repeated `T` | `[template of T]` |
//!
//! An unknown starting type is an error. An unknown field type only degrades
//! that field to `{}` and records a [`TemplateWarning`].

mod config;
mod descriptor;
mod error;
mod generator;
mod kind;

pub use config::TemplateConfig;
pub use descriptor::{FieldDescriptor, FieldRule, SchemaDescriptor, TypeNode};
pub use error::{TemplateError, TemplateResult};
pub use generator::{
    GeneratedTemplate, TemplateGenerator, TemplateWarning, WarningReason, generate_template,
};
pub use kind::FieldKind;
