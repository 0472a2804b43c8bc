//! Canonical JSON encoding.
//!
//! Object keys are emitted in sorted order at every nesting level and no
//! insignificant whitespace is produced, so two structurally equal values
//! always encode to the same bytes.

use serde_json::{Map, Value};

/// Rebuild `value` with every object's keys inserted in sorted order.
///
/// Independent of whether `serde_json` is built with `preserve_order`.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Compact, key-sorted JSON text for `value`.
pub fn canonical_json(value: &Value) -> String {
    sort_keys(value).to_string()
}
