//! Which settings are marked for export.
//!
//! A selection is plain string membership: extension id to the set of
//! encoded paths the user ticked. Selecting a container path means "the
//! whole subtree", but that expansion happens during extraction, not here;
//! an ancestor being selected does not make its descendants selected. The
//! last-used selection is persisted between sessions, so the maps are
//! ordered to keep the file stable across saves.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The set of paths marked for export, keyed by extension id.
///
/// Serializes as a bare JSON object of id to path list, the same shape the
/// host application keeps for its export dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    paths: BTreeMap<String, BTreeSet<String>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark or unmark one path for `extension_id`.
    ///
    /// Adding a path twice or removing an absent one is a no-op; removing
    /// the last path drops the extension's entry entirely.
    pub fn toggle(&mut self, extension_id: &str, path: &str, selected: bool) {
        if selected {
            self.paths
                .entry(extension_id.to_string())
                .or_default()
                .insert(path.to_string());
        } else if let Some(set) = self.paths.get_mut(extension_id) {
            set.remove(path);
            if set.is_empty() {
                self.paths.remove(extension_id);
            }
        }
    }

    /// Exact membership test. No ancestor or descendant expansion.
    pub fn is_selected(&self, extension_id: &str, path: &str) -> bool {
        self.paths
            .get(extension_id)
            .is_some_and(|set| set.contains(path))
    }

    /// The selected paths of one extension, in lexical order.
    pub fn paths_for(&self, extension_id: &str) -> Vec<&str> {
        self.paths
            .get(extension_id)
            .map(|set| set.iter().map(|path| path.as_str()).collect())
            .unwrap_or_default()
    }

    /// Extension ids with at least one selected path, in lexical order.
    pub fn extensions(&self) -> Vec<&str> {
        self.paths.keys().map(|id| id.as_str()).collect()
    }

    /// Total number of selected paths across all extensions.
    pub fn len(&self) -> usize {
        self.paths.values().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
