//! Deep merge for settings import.
//!
//! Implements member-by-member merging where incoming values override the
//! values already on disk. Arrays are replaced entirely, not concatenated:
//! positional merging of two independently edited lists has no sensible
//! meaning, so the incoming list wins in full.

use serde_json::Value;

/// Deep merge two settings trees, with `source` taking precedence over
/// `target`.
///
/// - Objects are merged recursively: members in source override members in target
/// - Arrays, strings, numbers, booleans, nulls are replaced entirely
/// - Members only present in target are kept unchanged
///
/// A null in the source is a real exported value and replaces the target
/// member like any other primitive.
///
/// # Example
/// ```
/// use serde_json::json;
/// use quill_port::tree::deep_merge;
///
/// let target = json!({
///     "editor": { "font_size": 14, "theme": "dawn" },
///     "hotkeys": ["ctrl+p"]
/// });
/// let source = json!({
///     "editor": { "font_size": 16 },
///     "hotkeys": ["ctrl+k", "ctrl+p"]
/// });
/// let merged = deep_merge(target, source);
/// assert_eq!(merged, json!({
///     "editor": { "font_size": 16, "theme": "dawn" },
///     "hotkeys": ["ctrl+k", "ctrl+p"]
/// }));
/// ```
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        // Both are objects: merge recursively
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                let merged_value = if let Some(target_value) = target_map.remove(&key) {
                    deep_merge(target_value, source_value)
                } else {
                    source_value
                };
                target_map.insert(key, merged_value);
            }
            Value::Object(target_map)
        }
        // Any other case: source replaces target entirely
        (_, source) => source,
    }
}
