//! The settings tree model: structural paths, enumeration, deep merge,
//! and selective extraction over JSON-shaped values.
//!
//! Everything in this module is pure data transformation. Nothing here
//! touches the host, the filesystem, or any extension; the porter feeds
//! trees in and carries trees out.

mod extract;
mod merge;
mod path;
mod walk;

pub use extract::{extract, prune_sparse_nulls};
pub use merge::deep_merge;
pub use path::{PathParseError, Segment, SettingPath};
pub use walk::{PathEntry, ValueKind, enumerate_paths};
