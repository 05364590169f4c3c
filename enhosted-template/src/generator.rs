//! Template generation: walks a message type and emits a zero-valued skeleton.

use serde_json::{Map, Value, json};
use std::fmt;
use tracing::{debug, warn};

use crate::descriptor::{FieldDescriptor, SchemaDescriptor, TypeNode};
use crate::{FieldKind, TemplateConfig, TemplateResult};

/// Why a field was rendered as an empty object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningReason {
    /// The field's type is not in the descriptor.
    UnresolvedType,
    /// The field's type is already being expanded further up.
    RecursiveType,
    /// Expanding the field would exceed `max_depth`.
    DepthLimit,
}

/// A field that could not be fully expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateWarning {
    /// Dotted path of the field inside the template.
    pub field: String,
    pub type_name: String,
    pub reason: WarningReason,
}

impl fmt::Display for TemplateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            WarningReason::UnresolvedType => "unknown type",
            WarningReason::RecursiveType => "recursive type",
            WarningReason::DepthLimit => "nesting too deep for type",
        };
        write!(f, "{} {} at field {}", reason, self.type_name, self.field)
    }
}

/// A generated template and the fields that degraded to `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTemplate {
    pub value: Value,
    pub warnings: Vec<TemplateWarning>,
}

/// Builds zero-valued JSON skeletons for message types of one descriptor.
#[derive(Debug, Clone)]
pub struct TemplateGenerator<'a> {
    descriptor: &'a SchemaDescriptor,
    config: TemplateConfig,
}

impl<'a> TemplateGenerator<'a> {
    pub fn new(descriptor: &'a SchemaDescriptor) -> Self {
        Self {
            descriptor,
            config: TemplateConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Generates the template for a dotted message name.
    ///
    /// Fails only when the name itself cannot be resolved.
    pub fn generate(&self, type_name: &str) -> TemplateResult<Value> {
        Ok(self.generate_with_report(type_name)?.value)
    }

    /// Like [`generate`](Self::generate), also returning the degraded fields.
    pub fn generate_with_report(&self, type_name: &str) -> TemplateResult<GeneratedTemplate> {
        let (path, node) = self.descriptor.resolve_message(type_name)?;

        let mut walk = Walk {
            descriptor: self.descriptor,
            config: &self.config,
            stack: vec![path.join(".")],
            warnings: Vec::new(),
        };
        let value = walk.message(&path, node, "");

        debug!(
            type_name,
            warnings = walk.warnings.len(),
            "generated template"
        );
        Ok(GeneratedTemplate {
            value,
            warnings: walk.warnings,
        })
    }
}

/// Generates the template for `type_name` with the default configuration.
pub fn generate_template(descriptor: &SchemaDescriptor, type_name: &str) -> TemplateResult<Value> {
    TemplateGenerator::new(descriptor).generate(type_name)
}

struct Walk<'a, 'c> {
    descriptor: &'a SchemaDescriptor,
    config: &'c TemplateConfig,
    /// Full names of the message types currently being expanded.
    stack: Vec<String>,
    warnings: Vec<TemplateWarning>,
}

impl<'a> Walk<'a, '_> {
    fn message(&mut self, scope: &[String], node: &'a TypeNode, prefix: &str) -> Value {
        let mut out = Map::new();
        for (name, field) in node.fields.iter().flatten() {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            out.insert(name.clone(), self.field(scope, field, &path));
        }
        Value::Object(out)
    }

    fn field(&mut self, scope: &[String], field: &FieldDescriptor, path: &str) -> Value {
        let single = self.single(scope, &field.type_name, path);
        if field.is_repeated() {
            Value::Array(vec![single])
        } else {
            single
        }
    }

    fn single(&mut self, scope: &[String], type_name: &str, path: &str) -> Value {
        let kind = FieldKind::classify(type_name, self.config);
        if let Some(zero) = kind.zero_value() {
            return zero;
        }

        let descriptor = self.descriptor;
        let Some((target, node)) = descriptor.resolve_reference(scope, type_name) else {
            return self.degrade(path, type_name, WarningReason::UnresolvedType);
        };
        if let Some(first) = node.default_enum_value() {
            return json!(first);
        }
        if !node.is_message() {
            return self.degrade(path, type_name, WarningReason::UnresolvedType);
        }

        let full_name = target.join(".");
        if self.stack.contains(&full_name) {
            return self.degrade(path, type_name, WarningReason::RecursiveType);
        }
        if self.stack.len() >= self.config.max_depth {
            return self.degrade(path, type_name, WarningReason::DepthLimit);
        }

        self.stack.push(full_name);
        let value = self.message(&target, node, path);
        self.stack.pop();
        value
    }

    fn degrade(&mut self, path: &str, type_name: &str, reason: WarningReason) -> Value {
        let warning = TemplateWarning {
            field: path.to_string(),
            type_name: type_name.to_string(),
            reason,
        };
        warn!(field = path, type_name, "{}", warning);
        self.warnings.push(warning);
        json!({})
    }
}
