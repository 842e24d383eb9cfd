//! Host collaborator boundaries and their implementations.
//!
//! The porter never reaches into the host application directly: it is
//! handed an extension registry and a file adapter and calls them one
//! operation at a time. The directory-backed pair here treats one
//! installation directory as the host; the in-memory pair backs tests and
//! embedding without a filesystem.

mod files;
mod memory;
mod registry;

pub use files::{DirAdapter, FileAdapter};
pub use memory::{MemoryAdapter, MemoryRegistry};
pub use registry::{DirRegistry, ExtensionInfo, ExtensionKind, ExtensionRegistry};
