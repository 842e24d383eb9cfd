//! The persistent file adapter boundary and its directory implementation.

use crate::error::{HostError, HostResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Host-provided persistent storage, addressed by forward-slash paths
/// relative to the installation root.
///
/// The porter reads and writes core settings files, the persisted export
/// selection, and default-named export documents through this boundary, so
/// an embedding host can route them wherever its own storage lives.
#[async_trait]
pub trait FileAdapter: Send + Sync {
    /// Read a file's entire contents. Fails with [`HostError::NotFound`]
    /// when the file does not exist.
    async fn read(&self, path: &str) -> HostResult<String>;

    /// Write `content`, replacing any existing file and creating parent
    /// directories as needed.
    async fn write(&self, path: &str, content: &str) -> HostResult<()>;

    /// List the files directly inside `dir`, as full adapter paths.
    async fn list(&self, dir: &str) -> HostResult<Vec<String>>;
}

/// File adapter over a real directory tree.
#[derive(Debug, Clone)]
pub struct DirAdapter {
    root: PathBuf,
}

impl DirAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl FileAdapter for DirAdapter {
    async fn read(&self, path: &str) -> HostResult<String> {
        match tokio::fs::read_to_string(self.resolve(path)).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(HostError::NotFound(path.to_string()))
            }
            Err(err) => Err(HostError::Other(err.into())),
        }
    }

    async fn write(&self, path: &str, content: &str) -> HostResult<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| HostError::Other(err.into()))?;
        }
        tokio::fs::write(full, content)
            .await
            .map_err(|err| HostError::Other(err.into()))
    }

    async fn list(&self, dir: &str) -> HostResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(self.resolve(dir)).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(HostError::NotFound(dir.to_string()));
            }
            Err(err) => return Err(HostError::Other(err.into())),
        };
        let prefix = dir.trim_end_matches('/');
        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| HostError::Other(err.into()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_file())
                .unwrap_or(false);
            if is_file {
                files.push(format!(
                    "{}/{}",
                    prefix,
                    entry.file_name().to_string_lossy()
                ));
            }
        }
        // read_dir order is platform dependent
        files.sort();
        Ok(files)
    }
}
