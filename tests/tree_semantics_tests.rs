//! Integration tests for the settings tree operations working together:
//! enumeration feeding selections, extraction building export entries,
//! and deep merge applying them on the other side.

use quill_port::tree::{SettingPath, deep_merge, enumerate_paths, extract, prune_sparse_nulls};
use serde_json::{Value, json};

/// A settings tree shaped like a real plugin's: nested objects, an array
/// of objects, and an array of primitives.
fn outline_settings() -> Value {
    json!({
        "theme": "dawn",
        "font": {"size": 14, "family": "mono"},
        "hotkeys": ["ctrl+p", "ctrl+k"],
        "panes": [
            {"side": "left", "width": 240},
            {"side": "right", "width": 180}
        ],
        "last_file": null
    })
}

fn resolve<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.parse::<SettingPath>().unwrap().resolve(tree)
}

mod full_selection_tests {
    use super::*;

    #[test]
    fn selecting_every_enumerated_path_reproduces_the_tree() {
        let tree = outline_settings();

        let entries = enumerate_paths(&tree);
        let paths: Vec<&str> = entries.iter().map(|entry| entry.path.as_str()).collect();

        assert_eq!(extract(&tree, paths), tree);
    }

    #[test]
    fn leaf_selection_rebuilds_the_nested_shape() {
        let tree = outline_settings();

        let extracted = extract(&tree, ["font.size", "panes[1].width", "theme"]);

        assert_eq!(
            extracted,
            json!({
                "theme": "dawn",
                "font": {"size": 14},
                "panes": [{"width": 180}]
            })
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let tree = outline_settings();
        let paths = ["font.size", "panes[0]", "hotkeys"];

        let once = extract(&tree, paths);
        let twice = extract(&once, paths);

        assert_eq!(twice, once);
    }
}

mod export_import_cycle_tests {
    use super::*;

    #[test]
    fn extract_then_merge_carries_selected_values_across() {
        let source = outline_settings();
        let paths = ["theme", "font.size", "panes[0].width"];

        // The receiving installation has its own settings for the same plugin
        let target = json!({
            "theme": "dusk",
            "font": {"size": 11, "family": "serif"},
            "spellcheck": true
        });

        let merged = deep_merge(target, extract(&source, paths));

        // Every selected value now reads as it did at the source
        for path in paths {
            assert_eq!(resolve(&merged, path), resolve(&source, path));
        }
        // Unselected target settings are untouched
        assert_eq!(resolve(&merged, "font.family"), Some(&json!("serif")));
        assert_eq!(resolve(&merged, "spellcheck"), Some(&json!(true)));
    }

    #[test]
    fn merging_the_same_extraction_twice_changes_nothing() {
        let extracted = extract(&outline_settings(), ["font", "theme"]);
        let target = json!({"font": {"size": 9}, "margins": [8, 8]});

        let once = deep_merge(target, extracted.clone());
        let twice = deep_merge(once.clone(), extracted);

        assert_eq!(twice, once);
    }

    #[test]
    fn selection_order_does_not_change_the_extraction() {
        let tree = outline_settings();

        let forward = extract(&tree, ["font.size", "panes[0].side", "theme"]);
        let reversed = extract(&tree, ["theme", "panes[0].side", "font.size"]);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn parent_and_child_selections_overlap_cleanly() {
        let tree = outline_settings();

        // Selecting a container and one of its members must equal
        // selecting just the container
        let both = extract(&tree, ["font", "font.size"]);
        let container_only = extract(&tree, ["font"]);

        assert_eq!(both, container_only);
    }
}

mod pruning_tests {
    use super::*;

    #[test]
    fn pruning_is_idempotent() {
        let mut tree = json!({
            "rows": [null, {"cells": [1, null, 3]}, null],
            "kept": null
        });

        prune_sparse_nulls(&mut tree);
        let after_once = tree.clone();
        prune_sparse_nulls(&mut tree);

        assert_eq!(tree, after_once);
        // Object-held nulls are values, not placeholders
        assert_eq!(after_once, json!({"rows": [{"cells": [1, 3]}], "kept": null}));
    }

    #[test]
    fn sparse_array_selection_compacts_positions() {
        let tree = json!({"panes": [
            {"side": "left"},
            {"side": "center"},
            {"side": "right"}
        ]});

        let extracted = extract(&tree, ["panes[0]", "panes[2]"]);

        assert_eq!(
            extracted,
            json!({"panes": [{"side": "left"}, {"side": "right"}]})
        );
    }
}
