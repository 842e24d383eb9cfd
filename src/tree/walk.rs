//! Enumeration of the addressable nodes in a settings tree.
//!
//! This is what a selection is made from: every node a path can name, in
//! depth-first order with parents before children. Object members are
//! addressable at any depth. An array is addressable as a whole; its
//! elements are addressable individually only when the element is itself an
//! object. Primitive and nested-array elements travel with the enclosing
//! array, so a selection can never split a plain list.

use super::path::{Segment, SettingPath};
use serde_json::Value;
use std::fmt;

/// The shape of the value found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a settings value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Whether a node of this kind can hold addressable children.
    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// One addressable node: its encoded path and the kind of value there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: String,
    pub kind: ValueKind,
}

/// List every addressable node of `tree`, depth-first, parents first.
///
/// Paths are relative to the root object, which itself gets no entry. A
/// tree that is not an object has no addressable nodes.
pub fn enumerate_paths(tree: &Value) -> Vec<PathEntry> {
    let mut entries = Vec::new();
    if let Value::Object(map) = tree {
        for (key, value) in map {
            let path = SettingPath::new(vec![Segment::Key(key.clone())]);
            push_entries(&path, value, &mut entries);
        }
    }
    entries
}

fn push_entries(path: &SettingPath, value: &Value, entries: &mut Vec<PathEntry>) {
    entries.push(PathEntry {
        path: path.to_string(),
        kind: ValueKind::of(value),
    });
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                push_entries(&path.child(Segment::Key(key.clone())), child, entries);
            }
        }
        Value::Array(items) => {
            for (index, element) in items.iter().enumerate() {
                if element.is_object() {
                    push_entries(&path.child(Segment::Index(index)), element, entries);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(tree: &Value) -> Vec<String> {
        enumerate_paths(tree)
            .into_iter()
            .map(|entry| entry.path)
            .collect()
    }

    #[test]
    fn test_flat_object() {
        let tree = json!({"theme": "dawn", "font_size": 14});
        assert_eq!(paths(&tree), vec!["font_size", "theme"]);
    }

    #[test]
    fn test_nested_objects_parents_first() {
        let tree = json!({"editor": {"font": {"size": 14}}});
        assert_eq!(paths(&tree), vec!["editor", "editor.font", "editor.font.size"]);
    }

    #[test]
    fn test_array_of_objects_has_element_entries() {
        let tree = json!({"hotkeys": [{"key": "p"}, {"key": "k"}]});
        assert_eq!(
            paths(&tree),
            vec![
                "hotkeys",
                "hotkeys[0]",
                "hotkeys[0].key",
                "hotkeys[1]",
                "hotkeys[1].key",
            ]
        );
    }

    #[test]
    fn test_primitive_array_elements_not_addressable() {
        let tree = json!({"recent": ["a.md", "b.md"]});
        assert_eq!(paths(&tree), vec!["recent"]);
    }

    #[test]
    fn test_nested_array_elements_not_addressable() {
        let tree = json!({"grid": [[1, 2], [3]]});
        assert_eq!(paths(&tree), vec!["grid"]);
    }

    #[test]
    fn test_mixed_array_only_object_elements_descend() {
        let tree = json!({"items": [1, {"name": "x"}, "two"]});
        assert_eq!(paths(&tree), vec!["items", "items[1]", "items[1].name"]);
    }

    #[test]
    fn test_kinds_reported() {
        let tree = json!({"a": null, "b": true, "c": 1, "d": "s", "e": [], "f": {}});
        let entries = enumerate_paths(&tree);
        let kinds: Vec<ValueKind> = entries.iter().map(|entry| entry.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Null,
                ValueKind::Boolean,
                ValueKind::Number,
                ValueKind::String,
                ValueKind::Array,
                ValueKind::Object,
            ]
        );
    }

    #[test]
    fn test_non_object_root_has_no_entries() {
        assert!(enumerate_paths(&json!([1, 2])).is_empty());
        assert!(enumerate_paths(&json!(42)).is_empty());
    }

    #[test]
    fn test_container_kinds() {
        assert!(ValueKind::Array.is_container());
        assert!(ValueKind::Object.is_container());
        assert!(!ValueKind::String.is_container());
    }
}
