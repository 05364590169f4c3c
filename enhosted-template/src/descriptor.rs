//! Schema descriptor model.
//!
//! Mirrors the protobuf JSON descriptor layout: every node may hold `nested`
//! named nodes, a message node has `fields`, an enum node has `values`.
//! Keys the generator does not use (`options`, `methods`, ...) are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{TemplateError, TemplateResult};

/// How many times a field occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRule {
    Repeated,
    Required,
    Optional,
}

/// One field of a message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Scalar type tag or the name of another type.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<FieldRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

impl FieldDescriptor {
    /// Shorthand for a single-valued field.
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.into(),
            rule: None,
            id: None,
        }
    }

    /// Shorthand for a repeated field.
    pub fn repeated(type_name: &str) -> Self {
        Self {
            rule: Some(FieldRule::Repeated),
            ..Self::new(type_name)
        }
    }

    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.rule == Some(FieldRule::Repeated)
    }
}

/// A namespace, message type or enum type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nested: BTreeMap<String, TypeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<BTreeMap<String, i64>>,
}

impl TypeNode {
    /// Creates a message node with the given fields.
    pub fn message<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldDescriptor)>,
    {
        Self {
            fields: Some(fields.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Creates a namespace node holding the given children.
    pub fn namespace<I>(nested: I) -> Self
    where
        I: IntoIterator<Item = (String, TypeNode)>,
    {
        Self {
            nested: nested.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_message(&self) -> bool {
        self.fields.is_some()
    }

    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.values.is_some()
    }

    /// Follows `segments` through `nested` children.
    pub fn descend<'a, S: AsRef<str>>(&'a self, segments: &[S]) -> Option<&'a TypeNode> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.nested.get(segment.as_ref()))
    }

    /// Name of the enum value with the lowest number.
    pub fn default_enum_value(&self) -> Option<&str> {
        self.values
            .as_ref()?
            .iter()
            .min_by_key(|&(_, number)| *number)
            .map(|(name, _)| name.as_str())
    }
}

/// The root of a schema descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescriptor {
    root: TypeNode,
}

impl SchemaDescriptor {
    pub fn new(root: TypeNode) -> Self {
        Self { root }
    }

    /// Parses a descriptor from a JSON tree.
    pub fn from_json(json: &serde_json::Value) -> TemplateResult<Self> {
        Ok(Self::deserialize(json)?)
    }

    /// Parses a descriptor from JSON text.
    pub fn from_json_str(text: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn root(&self) -> &TypeNode {
        &self.root
    }

    /// Resolves a dotted message name such as `jitsu.FirebaseConfig`.
    ///
    /// Returns the path segments and the message node.
    pub fn resolve_message(&self, type_name: &str) -> TemplateResult<(Vec<String>, &TypeNode)> {
        if type_name.is_empty() {
            return Err(TemplateError::EmptyTypeName);
        }

        let segments: Vec<String> = type_name.split('.').map(str::to_string).collect();
        let mut node = &self.root;
        for segment in &segments {
            node = node
                .nested
                .get(segment)
                .ok_or_else(|| TemplateError::UnresolvedRootType {
                    segment: segment.clone(),
                    path: type_name.to_string(),
                    known: node.nested.keys().cloned().collect(),
                })?;
        }

        if !node.is_message() {
            return Err(TemplateError::NotAMessage {
                path: type_name.to_string(),
            });
        }
        Ok((segments, node))
    }

    /// Resolves a type reference as seen from inside `scope`.
    ///
    /// A leading `.` makes the reference absolute. Otherwise the innermost
    /// enclosing scope is tried first, then each outer one up to the root.
    pub fn resolve_reference(
        &self,
        scope: &[String],
        reference: &str,
    ) -> Option<(Vec<String>, &TypeNode)> {
        let (absolute, name) = match reference.strip_prefix('.') {
            Some(rest) => (true, rest),
            None => (false, reference),
        };
        let wanted: Vec<&str> = name.split('.').collect();
        let depths = if absolute { 0..=0 } else { 0..=scope.len() };

        depths.rev().find_map(|depth| {
            let node = self.root.descend(&scope[..depth])?.descend(wanted.as_slice())?;
            let mut path = scope[..depth].to_vec();
            path.extend(wanted.iter().map(|s| s.to_string()));
            Some((path, node))
        })
    }
}
