//! Plain-JSON marshalling for enhosted.
//!
//! Console entities are persisted as plain JSON documents and restored into
//! typed values on load:
//! - [`to_pure_json`]: deep plain-data copy of any serializable value
//! - [`from_pure_json`]: rebuild a value from exactly the JSON given
//! - [`new_instance`]: default-construct a type, deep-merge JSON onto it
//! - [`merge_into`]: the same, starting from a given value
//! - [`new_array_instance`]: [`new_instance`] applied element-wise
//! - [`PlainData`]: per-entity mapping, overridable where the stored
//!   document shape differs from the in-memory one
//!
//! Documents written by older console builds tag class instances with a
//! [`TYPE_PROPERTY`] key. The tag is removed before a document is merged onto
//! a typed value.

mod error;
mod merge;

pub use error::{MarshalError, MarshalResult};
pub use merge::{deep_merge, merged};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::error::json_kind;

/// Key under which legacy documents record the class of an object.
pub const TYPE_PROPERTY: &str = "$type";

/// Converts `value` into a plain JSON tree.
///
/// Fails only for values serde_json cannot represent, such as maps keyed by
/// non-string types.
pub fn to_pure_json<T: Serialize + ?Sized>(value: &T) -> MarshalResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Builds a `T` from a plain JSON object, without merging onto any base.
///
/// Fields missing from `json` take their serde default. Legacy type tags are
/// ignored. Anything [`to_pure_json`] produced for a `T` comes back equal.
pub fn from_pure_json<T: DeserializeOwned>(json: &Value) -> MarshalResult<T> {
    let type_name = std::any::type_name::<T>();
    if !json.is_object() {
        return Err(MarshalError::ExpectedObject {
            type_name,
            found: json_kind(json),
        });
    }

    let mut source = json.clone();
    strip_type_tags(&mut source);
    serde_json::from_value(source).map_err(|source| MarshalError::Shape { type_name, source })
}

/// Builds a `T` from its default value with `json` deep-merged on top.
///
/// Fields missing from `json` keep their default. Fields `T` does not know
/// are ignored unless `T` denies unknown fields. `json` must be an object.
///
/// Merging never removes map keys or shortens arrays that `T::default()`
/// already holds, so `new_instance(&to_pure_json(&v)?)` equals `v` only when
/// the default carries no such entries. Use [`from_pure_json`] to restore a
/// value exactly.
pub fn new_instance<T>(json: &Value) -> MarshalResult<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    merge_into(&T::default(), json)
}

/// Builds a new `T` from `base` with `json` deep-merged on top.
///
/// `base` is not modified. `json` must be an object.
pub fn merge_into<T>(base: &T, json: &Value) -> MarshalResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let type_name = std::any::type_name::<T>();
    if !json.is_object() {
        return Err(MarshalError::ExpectedObject {
            type_name,
            found: json_kind(json),
        });
    }

    let mut tree = to_pure_json(base)?;
    let mut source = json.clone();
    strip_type_tags(&mut source);
    deep_merge(&mut tree, &source);

    trace!(type_name, "restoring instance from plain data");
    serde_json::from_value(tree).map_err(|source| MarshalError::Shape { type_name, source })
}

/// Applies [`new_instance`] to every element of a JSON array, in order.
pub fn new_array_instance<T>(json: &Value) -> MarshalResult<Vec<T>>
where
    T: Default + Serialize + DeserializeOwned,
{
    let elements = json.as_array().ok_or(MarshalError::ExpectedArray {
        found: json_kind(json),
    })?;

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            new_instance(element).map_err(|e| MarshalError::Element {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Returns the legacy class tag of a JSON object, if it has one.
pub fn type_tag(json: &Value) -> Option<&str> {
    json.get(TYPE_PROPERTY).and_then(Value::as_str)
}

/// Removes every [`TYPE_PROPERTY`] key from `json`, at any depth.
pub fn strip_type_tags(json: &mut Value) {
    match json {
        Value::Object(map) => {
            map.remove(TYPE_PROPERTY);
            map.values_mut().for_each(strip_type_tags);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_type_tags),
        _ => {}
    }
}

/// Conversion between an entity and the plain document it is stored as.
///
/// The default methods go through [`to_pure_json`] and [`from_pure_json`],
/// so `from_plain_data(&e.to_plain_data()?)` equals `e`. Override them when
/// the stored shape is not the serde shape.
pub trait PlainData: Serialize + DeserializeOwned + Default {
    /// Produces the document to persist.
    fn to_plain_data(&self) -> MarshalResult<Value> {
        to_pure_json(self)
    }

    /// Restores an entity from a persisted document.
    fn from_plain_data(json: &Value) -> MarshalResult<Self> {
        from_pure_json(json)
    }
}
