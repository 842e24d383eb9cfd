//! Selective extraction for settings export.
//!
//! Copies only the values at selected paths out of a settings tree into a
//! fresh minimal tree. Each path is resolved independently against the
//! source, so extraction is order independent and tolerant of selections
//! recorded against an older shape of the tree: a path that no longer
//! resolves simply contributes nothing. While paths are being written the
//! result keeps array positions aligned with the source, using null as the
//! placeholder for unselected slots; a single pruning pass at the end drops
//! the placeholders and closes the gaps.

use super::path::{Segment, SettingPath};
use serde_json::{Map, Value};
use tracing::debug;

/// Build the minimal tree containing the values at `paths` in `target`.
///
/// Selecting a container path copies its whole subtree. Paths that do not
/// parse or do not resolve are skipped. Intermediate containers in the
/// result mirror the corresponding node in `target`: an index segment under
/// an array parent builds an array, never an object keyed by stringified
/// integers. The result is freshly built; `target` is untouched.
pub fn extract<'a, I>(target: &Value, paths: I) -> Value
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = Value::Object(Map::new());
    for encoded in paths {
        let path: SettingPath = match encoded.parse() {
            Ok(path) => path,
            Err(err) => {
                debug!("skipping malformed selection path '{}': {}", encoded, err);
                continue;
            }
        };
        let Some(value) = path.resolve(target) else {
            debug!("selection path '{}' no longer resolves, skipping", encoded);
            continue;
        };
        write_at(&mut result, target, path.segments(), value.clone());
    }
    prune_sparse_nulls(&mut result);
    result
}

/// Write `value` at `segments` below `slot`, creating intermediate
/// containers as needed.
///
/// `target` is the source node corresponding to `slot`; resolution has
/// already succeeded, so every descent step below finds the member or
/// element it expects in `target`.
fn write_at(slot: &mut Value, target: &Value, segments: &[Segment], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };

    // First time through, the slot is a null placeholder; give it the shape
    // of the corresponding target node before descending.
    match target {
        Value::Array(_) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
        }
        _ => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
        }
    }

    match (segment, slot) {
        (Segment::Key(key), Value::Object(map)) => {
            let Some(target_child) = target.as_object().and_then(|m| m.get(key)) else {
                return;
            };
            let child = map.entry(key.clone()).or_insert(Value::Null);
            write_at(child, target_child, rest, value);
        }
        (Segment::Index(index), Value::Array(items)) => {
            let Some(target_child) = target.as_array().and_then(|a| a.get(*index)) else {
                return;
            };
            if items.len() <= *index {
                items.resize(*index + 1, Value::Null);
            }
            write_at(&mut items[*index], target_child, rest, value);
        }
        _ => {}
    }
}

/// Remove null entries from every array in `tree`, recursing into the
/// elements that survive. Object members are never dropped, null valued or
/// not; only array slots are placeholders. Running the pass again is a
/// no-op.
pub fn prune_sparse_nulls(tree: &mut Value) {
    match tree {
        Value::Array(items) => {
            items.retain(|item| !item.is_null());
            for item in items {
                prune_sparse_nulls(item);
            }
        }
        Value::Object(map) => {
            for (_, value) in map.iter_mut() {
                prune_sparse_nulls(value);
            }
        }
        _ => {}
    }
}
