//! The export document: the file a settings export produces and an import
//! consumes.
//!
//! The on-disk format is one bare JSON object, extension id to extracted
//! settings subtree. There is no envelope, no version marker, no metadata;
//! any object shaped this way imports, which keeps hand-edited and
//! third-party files usable. Entries are kept in id order so repeated
//! exports of the same selection produce byte-identical files.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A settings export, keyed by extension id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportDocument {
    entries: BTreeMap<String, Value>,
}

impl ExportDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from JSON text. Anything that is not a top-level
    /// JSON object is rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize with pretty formatting; the file is meant to be read,
    /// diffed, and hand-edited.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Record one extension's extracted settings.
    pub fn insert(&mut self, extension_id: impl Into<String>, tree: Value) {
        self.entries.insert(extension_id.into(), tree);
    }

    /// The entry for one extension.
    pub fn get(&self, extension_id: &str) -> Option<&Value> {
        self.entries.get(extension_id)
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(id, tree)| (id.as_str(), tree))
    }

    /// The extension ids present in this document.
    pub fn extension_ids(&self) -> Vec<&str> {
        self.entries.keys().map(|id| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_json_roundtrip() {
        let mut document = ExportDocument::new();
        document.insert("outline", json!({"theme": "dawn"}));
        document.insert("daily-notes", json!({"folder": "journal"}));

        let json = document.to_json_pretty().unwrap();
        let loaded = ExportDocument::from_json(&json).unwrap();
        assert_eq!(loaded, document);
        assert_eq!(loaded.extension_ids(), vec!["daily-notes", "outline"]);
    }

    #[test]
    fn test_serializes_without_envelope() {
        let mut document = ExportDocument::new();
        document.insert("outline", json!({"theme": "dawn"}));

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value, json!({"outline": {"theme": "dawn"}}));
    }

    #[test]
    fn test_rejects_non_object_json() {
        assert!(ExportDocument::from_json("[1, 2]").is_err());
        assert!(ExportDocument::from_json("\"text\"").is_err());
        assert!(ExportDocument::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_object_is_valid_and_empty() {
        let document = ExportDocument::from_json("{}").unwrap();
        assert!(document.is_empty());
        assert_eq!(document.len(), 0);
    }

    #[test]
    fn test_get_and_iter() {
        let mut document = ExportDocument::new();
        document.insert("b-ext", json!({"x": 1}));
        document.insert("a-ext", json!({"y": 2}));

        assert_eq!(document.get("a-ext"), Some(&json!({"y": 2})));
        assert_eq!(document.get("missing"), None);

        let ids: Vec<&str> = document.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a-ext", "b-ext"]);
    }
}
