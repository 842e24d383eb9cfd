//! In-memory host collaborators for tests and embedding.
//!
//! Behavior matches the directory-backed pair, including `NotFound`
//! reporting, so porter logic exercised against these carries over to a
//! real installation. `MemoryRegistry` can also be told to fail specific
//! extensions, which is how the per-extension isolation paths get tested.

use super::files::FileAdapter;
use super::registry::{ExtensionInfo, ExtensionKind, ExtensionRegistry};
use crate::error::{HostError, HostResult};
use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::Mutex;

/// Extension registry backed by in-memory maps.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    extensions: Vec<ExtensionInfo>,
    community: Mutex<HashMap<String, Value>>,
    core: HashMap<String, Value>,
    failing: HashSet<String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a community extension, optionally with persisted settings.
    pub fn with_community(mut self, id: &str, data: Option<Value>) -> Self {
        self.extensions.push(ExtensionInfo {
            id: id.to_string(),
            kind: ExtensionKind::Community,
        });
        if let Some(data) = data {
            self.community.get_mut().insert(id.to_string(), data);
        }
        self
    }

    /// Register a core subsystem with its live settings.
    pub fn with_core(mut self, id: &str, settings: Value) -> Self {
        self.extensions.push(ExtensionInfo {
            id: id.to_string(),
            kind: ExtensionKind::Core,
        });
        self.core.insert(id.to_string(), settings);
        self
    }

    /// Register a community extension whose load and save calls fail.
    pub fn with_failing(mut self, id: &str) -> Self {
        self.extensions.push(ExtensionInfo {
            id: id.to_string(),
            kind: ExtensionKind::Community,
        });
        self.failing.insert(id.to_string());
        self
    }

    /// What `save_data` last stored for `id`.
    pub async fn saved(&self, id: &str) -> Option<Value> {
        self.community.lock().await.get(id).cloned()
    }
}

#[async_trait]
impl ExtensionRegistry for MemoryRegistry {
    fn installed(&self) -> Vec<ExtensionInfo> {
        self.extensions.clone()
    }

    async fn load_data(&self, id: &str) -> HostResult<Option<Value>> {
        if self.failing.contains(id) {
            return Err(HostError::Other(anyhow!("load_data failed for '{}'", id)));
        }
        Ok(self.community.lock().await.get(id).cloned())
    }

    async fn save_data(&self, id: &str, data: Value) -> HostResult<()> {
        if self.failing.contains(id) {
            return Err(HostError::Other(anyhow!("save_data failed for '{}'", id)));
        }
        self.community.lock().await.insert(id.to_string(), data);
        Ok(())
    }

    fn core_settings(&self, id: &str) -> Option<Value> {
        self.core.get(id).cloned()
    }
}

/// File adapter backed by an in-memory path-to-contents map.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate one file.
    pub async fn seed(&self, path: &str, content: &str) {
        self.files
            .lock()
            .await
            .insert(path.to_string(), content.to_string());
    }

    /// The current contents of one file, if present.
    pub async fn contents(&self, path: &str) -> Option<String> {
        self.files.lock().await.get(path).cloned()
    }
}

#[async_trait]
impl FileAdapter for MemoryAdapter {
    async fn read(&self, path: &str) -> HostResult<String> {
        self.files
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, content: &str) -> HostResult<()> {
        self.files
            .lock()
            .await
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn list(&self, dir: &str) -> HostResult<Vec<String>> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let files = self.files.lock().await;
        Ok(files
            .keys()
            .filter(|path| {
                path.starts_with(&prefix) && !path[prefix.len()..].contains('/')
            })
            .cloned()
            .collect())
    }
}
