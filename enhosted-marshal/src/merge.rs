//! Deep merge of plain JSON trees.
//!
//! Objects merge key by key. Arrays merge index by index: every index the
//! source has is merged into the target, a shorter target is extended, and a
//! longer target keeps its tail. Any other source value replaces the target.

use serde_json::Value;

/// Merges `source` into `target` in place. `source` is left untouched.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (index, value) in source.iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => deep_merge(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Returns a new tree with `source` merged onto a copy of `target`.
#[must_use]
pub fn merged(target: &Value, source: &Value) -> Value {
    let mut out = target.clone();
    deep_merge(&mut out, source);
    out
}
