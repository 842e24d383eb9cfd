//! Tool configuration: product naming and installation layout.
//!
//! Loaded from YAML, with environment variables and CLI flags layered on
//! top:
//! - `QUILL_PORT_CONFIG_PATH` - explicit config file (overrides the
//!   `quill-port.yaml` in the working directory)
//! - `QUILL_PORT_ROOT` - installation root when the config file sets none
//!
//! Everything has a default aimed at a stock Quill installation, so the
//! tool runs without any configuration at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name the last export selection is persisted under, inside the
/// configuration directory. The registry skips it when enumerating core
/// subsystem files.
pub const SELECTION_FILE: &str = "export-selection.json";

/// Porter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorterConfig {
    /// Product name; prefixes the default export file name and names the
    /// per-user installation directory.
    #[serde(default = "default_product")]
    pub product: String,

    /// Installation root directory. "." means discover one.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Configuration directory inside the root.
    #[serde(default = "default_config_dir")]
    pub config_dir: String,

    /// Community plugins directory inside the configuration directory.
    #[serde(default = "default_plugins_dir")]
    pub plugins_dir: String,
}

impl Default for PorterConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            root: default_root(),
            config_dir: default_config_dir(),
            plugins_dir: default_plugins_dir(),
        }
    }
}

fn default_product() -> String {
    "quill".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_config_dir() -> String {
    ".quill".to_string()
}

fn default_plugins_dir() -> String {
    "plugins".to_string()
}

impl PorterConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PorterConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `$QUILL_PORT_CONFIG_PATH`, then `quill-port.yaml`, then
    /// fall back to defaults with `$QUILL_PORT_ROOT` applied.
    pub fn load_or_default() -> Result<Self> {
        Self::load_layered(std::env::var("QUILL_PORT_CONFIG_PATH").ok().as_deref())
    }

    /// Layered load with the explicit config path already resolved.
    ///
    /// A missing or malformed file at the explicit path is an error; the
    /// implicit `quill-port.yaml` is only picked up when it loads cleanly.
    fn load_layered(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            let config =
                Self::load(path).with_context(|| format!("loading config file {}", path))?;
            return Ok(config);
        }
        if let Ok(config) = Self::load("quill-port.yaml") {
            return Ok(config);
        }
        let mut config = Self::default();
        if let Ok(root) = std::env::var("QUILL_PORT_ROOT") {
            config.root = PathBuf::from(root);
        }
        Ok(config)
    }

    /// Resolve the installation root.
    ///
    /// An explicit root wins. Otherwise the working directory counts as an
    /// installation when it contains the configuration directory; failing
    /// that, the per-user installation under the OS config directory is
    /// assumed.
    pub fn resolve_root(&self) -> PathBuf {
        if self.root != Path::new(".") {
            return self.root.clone();
        }
        if Path::new(&self.config_dir).is_dir() {
            return PathBuf::from(".");
        }
        dirs::config_dir()
            .map(|dir| dir.join(&self.product))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Filesystem path of the configuration directory.
    pub fn config_dir_path(&self) -> PathBuf {
        self.root.join(&self.config_dir)
    }

    /// Adapter path of a core subsystem's settings file.
    pub fn core_settings_path(&self, id: &str) -> String {
        format!("{}/{}.json", self.config_dir, id)
    }

    /// Adapter path of the persisted last-export selection.
    pub fn selection_path(&self) -> String {
        format!("{}/{}", self.config_dir, SELECTION_FILE)
    }

    /// Default export file name for this product.
    pub fn export_file_name(&self) -> String {
        format!("{}-settings-export.json", self.product)
    }
}
