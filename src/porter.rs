//! Import and export orchestration against the host collaborators.
//!
//! The porter works one extension at a time, strictly in order: each
//! read-merge-write completes (or fails and is recorded) before the next
//! id is considered, so no two operations ever touch the same persisted
//! settings concurrently. A failure local to one extension never aborts
//! the rest; only an unreadable or unparseable export document is fatal,
//! and that is decided before anything is written.

use crate::config::PorterConfig;
use crate::document::ExportDocument;
use crate::error::{HostError, HostResult, PortError};
use crate::host::{ExtensionInfo, ExtensionKind, ExtensionRegistry, FileAdapter};
use crate::selection::SelectionSet;
use crate::tree::{PathEntry, deep_merge, enumerate_paths, extract};
use anyhow::{Context, anyhow};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info, warn};

/// A skipped import entry the user should know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// The document names an extension that is not installed here.
    MissingExtension(String),
    /// A core subsystem entry has no settings file to merge into.
    MissingCoreFile(String),
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::MissingExtension(id) => {
                write!(f, "extension '{}' is not installed, entry skipped", id)
            }
            ImportWarning::MissingCoreFile(id) => {
                write!(f, "core subsystem '{}' has no settings file, entry skipped", id)
            }
        }
    }
}

/// What an import (or dry run) did, per extension.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Extensions whose entries merged and persisted cleanly.
    pub applied: Vec<String>,
    /// Entries skipped with a user-visible reason.
    pub warnings: Vec<ImportWarning>,
    /// Per-extension failures: extension id and error message.
    pub failed: Vec<(String, String)>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.failed.is_empty()
    }
}

/// The outcome of building an export document.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub document: ExportDocument,
    /// Selected extensions that are not installed (a stale selection).
    pub missing: Vec<String>,
    /// Extensions whose settings could not be read: id and error message.
    pub failed: Vec<(String, String)>,
}

/// The import/export engine, wired to one host.
pub struct SettingsPorter<R, F> {
    registry: R,
    files: F,
    config: PorterConfig,
}

impl<R: ExtensionRegistry, F: FileAdapter> SettingsPorter<R, F> {
    pub fn new(registry: R, files: F, config: PorterConfig) -> Self {
        Self {
            registry,
            files,
            config,
        }
    }

    /// The host's installed extensions.
    pub fn installed(&self) -> Vec<ExtensionInfo> {
        self.registry.installed()
    }

    /// Build an export document for `selection`.
    ///
    /// Selected extensions that are not installed land in `missing`; ones
    /// whose settings cannot be read land in `failed`. Extensions whose
    /// selected paths all fail to resolve are omitted from the document
    /// entirely rather than exported as empty objects.
    pub async fn export(&self, selection: &SelectionSet) -> ExportReport {
        let mut report = ExportReport::default();
        for id in selection.extensions() {
            let Some(info) = self.registry.lookup(id) else {
                debug!("selected extension '{}' is not installed", id);
                report.missing.push(id.to_string());
                continue;
            };
            let tree = match self.current_tree(&info).await {
                Ok(Some(tree)) => tree,
                Ok(None) => {
                    debug!("extension '{}' has no persisted settings", id);
                    continue;
                }
                Err(err) => {
                    warn!("could not read settings of '{}': {}", id, err);
                    report.failed.push((id.to_string(), err.to_string()));
                    continue;
                }
            };
            let extracted = extract(&tree, selection.paths_for(id));
            if extracted.as_object().is_some_and(|map| map.is_empty()) {
                debug!("no selected path of '{}' resolved, omitting it", id);
                continue;
            }
            report.document.insert(id, extracted);
        }
        info!(
            "export built: {} extension(s), {} missing, {} failed",
            report.document.len(),
            report.missing.len(),
            report.failed.len()
        );
        report
    }

    /// Apply an export document to this installation.
    pub async fn import(&self, document: &ExportDocument) -> ImportReport {
        self.apply(document, false).await
    }

    /// Report what an import would do without writing anything.
    pub async fn preview(&self, document: &ExportDocument) -> ImportReport {
        self.apply(document, true).await
    }

    async fn apply(&self, document: &ExportDocument, dry_run: bool) -> ImportReport {
        let mut report = ImportReport::default();
        for (id, incoming) in document.iter() {
            match self.apply_entry(id, incoming, dry_run).await {
                Ok(None) => report.applied.push(id.to_string()),
                Ok(Some(warning)) => {
                    warn!("{}", warning);
                    report.warnings.push(warning);
                }
                Err(err) => {
                    let message = format!("{:#}", err);
                    warn!("import of '{}' failed: {}", id, message);
                    report.failed.push((id.to_string(), message));
                }
            }
        }
        info!(
            "import {}: {} applied, {} warning(s), {} failed",
            if dry_run { "dry run" } else { "finished" },
            report.applied.len(),
            report.warnings.len(),
            report.failed.len()
        );
        report
    }

    /// Apply one document entry. `Ok(None)` means the entry merged and
    /// persisted (or would have, in a dry run); `Ok(Some(_))` is a
    /// user-visible skip.
    async fn apply_entry(
        &self,
        id: &str,
        incoming: &Value,
        dry_run: bool,
    ) -> anyhow::Result<Option<ImportWarning>> {
        let Some(info) = self.registry.lookup(id) else {
            return Ok(Some(ImportWarning::MissingExtension(id.to_string())));
        };
        if !incoming.is_object() {
            anyhow::bail!("entry is not a settings object");
        }
        match info.kind {
            ExtensionKind::Community => {
                let current = self
                    .registry
                    .load_data(id)
                    .await
                    .context("loading current settings")?
                    .unwrap_or_else(|| Value::Object(Map::new()));
                let merged = deep_merge(current, incoming.clone());
                if !dry_run {
                    self.registry
                        .save_data(id, merged)
                        .await
                        .context("saving merged settings")?;
                }
            }
            ExtensionKind::Core => {
                let path = self.config.core_settings_path(id);
                let text = match self.files.read(&path).await {
                    Ok(text) => text,
                    Err(err) if err.is_not_found() => {
                        return Ok(Some(ImportWarning::MissingCoreFile(id.to_string())));
                    }
                    Err(err) => {
                        return Err(err).context("reading core settings file");
                    }
                };
                let current: Value = serde_json::from_str(&text)
                    .with_context(|| format!("'{}' is not valid JSON", path))?;
                let merged = deep_merge(current, incoming.clone());
                if !dry_run {
                    let content = serde_json::to_string_pretty(&merged)
                        .context("serializing merged settings")?;
                    self.files
                        .write(&path, &content)
                        .await
                        .context("writing core settings file")?;
                }
            }
        }
        debug!("entry for '{}' {}", id, if dry_run { "previewed" } else { "applied" });
        Ok(None)
    }

    /// Enumerate the addressable paths of one installed extension.
    ///
    /// `None` means the extension is not installed or its settings could
    /// not be read; an installed extension that has never saved settings
    /// enumerates as empty.
    pub async fn enumerate(&self, id: &str) -> Option<Vec<PathEntry>> {
        let info = self.registry.lookup(id)?;
        match self.current_tree(&info).await {
            Ok(Some(tree)) => Some(enumerate_paths(&tree)),
            Ok(None) => Some(Vec::new()),
            Err(err) => {
                warn!("could not read settings of '{}': {}", id, err);
                None
            }
        }
    }

    /// Build a selection covering every top-level setting of every
    /// installed extension.
    pub async fn select_all(&self) -> SelectionSet {
        let mut selection = SelectionSet::new();
        for info in self.registry.installed() {
            let tree = match self.current_tree(&info).await {
                Ok(Some(tree)) => tree,
                Ok(None) => continue,
                Err(err) => {
                    warn!("skipping '{}': {}", info.id, err);
                    continue;
                }
            };
            if let Some(map) = tree.as_object() {
                for key in map.keys() {
                    selection.toggle(&info.id, key, true);
                }
            }
        }
        selection
    }

    /// Load the selection persisted by the previous export, if any.
    pub async fn load_last_selection(&self) -> Option<SelectionSet> {
        let path = self.config.selection_path();
        let text = match self.files.read(&path).await {
            Ok(text) => text,
            Err(err) => {
                if !err.is_not_found() {
                    warn!("could not read '{}': {}", path, err);
                }
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(selection) => Some(selection),
            Err(err) => {
                warn!("ignoring unreadable selection file '{}': {}", path, err);
                None
            }
        }
    }

    /// Persist `selection` as the next session's starting point.
    pub async fn save_last_selection(&self, selection: &SelectionSet) -> HostResult<()> {
        let content = serde_json::to_string_pretty(selection)
            .map_err(|err| HostError::Other(err.into()))?;
        self.files.write(&self.config.selection_path(), &content).await
    }

    /// Read and parse an export document through the file adapter.
    pub async fn read_document(&self, path: &str) -> Result<ExportDocument, PortError> {
        let text = self.files.read(path).await.map_err(PortError::DocumentRead)?;
        Ok(ExportDocument::from_json(&text)?)
    }

    /// Serialize a document and hand it to the file adapter.
    pub async fn write_document(
        &self,
        document: &ExportDocument,
        path: &str,
    ) -> Result<(), PortError> {
        let content = document.to_json_pretty()?;
        self.files
            .write(path, &content)
            .await
            .map_err(PortError::DocumentWrite)
    }

    /// The settings tree an extension currently has, routed by kind.
    async fn current_tree(&self, info: &ExtensionInfo) -> HostResult<Option<Value>> {
        match info.kind {
            ExtensionKind::Community => self.registry.load_data(&info.id).await,
            ExtensionKind::Core => match self.registry.core_settings(&info.id) {
                Some(tree) => Ok(Some(tree)),
                None => Err(HostError::Other(anyhow!(
                    "core settings of '{}' are unavailable",
                    info.id
                ))),
            },
        }
    }
}
