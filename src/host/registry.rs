//! The extension registry boundary: what is installed and how each
//! extension's settings are reached.

use crate::config::SELECTION_FILE;
use crate::error::{HostError, HostResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File name a community extension persists its settings under, inside its
/// own plugin directory.
const SETTINGS_FILE: &str = "settings.json";

/// Whether an extension is community-supplied or built into the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    /// Installed from the community catalog; owns its persistence through
    /// `load_data`/`save_data`.
    Community,
    /// Built-in subsystem; its settings live in a flat per-subsystem file
    /// in the configuration directory and are held in memory while the
    /// host runs.
    Core,
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionKind::Community => write!(f, "community"),
            ExtensionKind::Core => write!(f, "core"),
        }
    }
}

/// One installed extension as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub id: String,
    pub kind: ExtensionKind,
}

/// The host's registry of installed extensions.
///
/// `load_data`/`save_data` are the persistence routines of community
/// extensions. Core subsystems have neither: their live settings are plain
/// in-memory objects exposed through `core_settings`, and their on-disk
/// form is the file adapter's business.
#[async_trait]
pub trait ExtensionRegistry: Send + Sync {
    /// Enumerate installed extensions.
    fn installed(&self) -> Vec<ExtensionInfo>;

    /// Read a community extension's persisted settings. `Ok(None)` means
    /// the extension has never saved anything.
    async fn load_data(&self, id: &str) -> HostResult<Option<Value>>;

    /// Persist a community extension's settings.
    async fn save_data(&self, id: &str, data: Value) -> HostResult<()>;

    /// A core subsystem's live settings, if `id` names one.
    fn core_settings(&self, id: &str) -> Option<Value>;

    /// Look up one installed extension by id.
    fn lookup(&self, id: &str) -> Option<ExtensionInfo> {
        self.installed().into_iter().find(|ext| ext.id == id)
    }
}

/// Registry over one installation's configuration directory.
///
/// Community extensions are the subdirectories of the plugins directory,
/// each persisting its settings as `settings.json` inside its own
/// directory. Core subsystems are the flat `<id>.json` files in the
/// configuration directory itself; their settings are read into memory
/// when the registry is opened, mirroring how the host keeps core options
/// live while it runs.
#[derive(Debug)]
pub struct DirRegistry {
    plugins_dir: PathBuf,
    extensions: Vec<ExtensionInfo>,
    core: HashMap<String, Value>,
}

impl DirRegistry {
    /// Scan a configuration directory.
    ///
    /// Core settings files that cannot be read or parsed are still listed
    /// as installed; only their in-memory settings are unavailable. That
    /// keeps imports against them reporting the real problem instead of a
    /// missing extension.
    pub async fn open(config_dir: impl Into<PathBuf>, plugins_dir_name: &str) -> Result<Self> {
        let config_dir = config_dir.into();
        let mut extensions = Vec::new();
        let mut core = HashMap::new();

        let mut entries = tokio::fs::read_dir(&config_dir)
            .await
            .with_context(|| format!("reading {}", config_dir.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == SELECTION_FILE {
                continue;
            }
            let Some(id) = name.strip_suffix(".json") else {
                continue;
            };
            let id = id.to_string();
            let path = entry.path();
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => match serde_json::from_str::<Value>(&text) {
                    Ok(value) if value.is_object() => {
                        core.insert(id.clone(), value);
                    }
                    Ok(_) => {
                        warn!("core settings file {} is not an object", path.display());
                    }
                    Err(err) => {
                        warn!("core settings file {} is not valid JSON: {}", path.display(), err);
                    }
                },
                Err(err) => {
                    warn!("could not read {}: {}", path.display(), err);
                }
            }
            extensions.push(ExtensionInfo {
                id,
                kind: ExtensionKind::Core,
            });
        }

        let plugins_dir = config_dir.join(plugins_dir_name);
        match tokio::fs::read_dir(&plugins_dir).await {
            Ok(mut entries) => {
                while let Some(entry) = entries.next_entry().await? {
                    if entry.file_type().await?.is_dir() {
                        extensions.push(ExtensionInfo {
                            id: entry.file_name().to_string_lossy().into_owned(),
                            kind: ExtensionKind::Community,
                        });
                    }
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no community plugins directory at {}", plugins_dir.display());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", plugins_dir.display()));
            }
        }

        extensions.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(
            "registry opened with {} extension(s) under {}",
            extensions.len(),
            config_dir.display()
        );
        Ok(Self {
            plugins_dir,
            extensions,
            core,
        })
    }

    fn settings_path(&self, id: &str) -> PathBuf {
        self.plugins_dir.join(id).join(SETTINGS_FILE)
    }
}

#[async_trait]
impl ExtensionRegistry for DirRegistry {
    fn installed(&self) -> Vec<ExtensionInfo> {
        self.extensions.clone()
    }

    async fn load_data(&self, id: &str) -> HostResult<Option<Value>> {
        let path = self.settings_path(id);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(HostError::Other(err.into())),
        };
        let value = serde_json::from_str(&text)
            .with_context(|| format!("settings of '{}' are not valid JSON", id))?;
        Ok(Some(value))
    }

    async fn save_data(&self, id: &str, data: Value) -> HostResult<()> {
        let path = self.settings_path(id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| HostError::Other(err.into()))?;
        }
        let content = serde_json::to_string_pretty(&data)
            .map_err(|err| HostError::Other(err.into()))?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|err| HostError::Other(err.into()))
    }

    fn core_settings(&self, id: &str) -> Option<Value> {
        self.core.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ExtensionKind::Community.to_string(), "community");
        assert_eq!(ExtensionKind::Core.to_string(), "core");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ExtensionKind::Community).unwrap(),
            serde_json::json!("community")
        );
        assert_eq!(
            serde_json::to_value(ExtensionKind::Core).unwrap(),
            serde_json::json!("core")
        );
    }
}
