//! Export subcommand for quill-port
//!
//! Builds a settings export from a selection of paths and writes it to a
//! portable JSON file that `import` can consume on another installation.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (default: <product>-settings-export.json in the
    /// installation root)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Selection file to use: a JSON object of extension id to paths
    #[arg(short, long, value_name = "FILE", conflicts_with = "all")]
    pub selection: Option<PathBuf>,

    /// Export every top-level setting of every installed extension
    #[arg(long)]
    pub all: bool,
}

/// Where the export selection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSource {
    /// Every top-level setting of every installed extension.
    All,
    /// An explicit selection file.
    File(PathBuf),
    /// The selection persisted by the previous export.
    LastSession,
}

impl ExportArgs {
    /// Decide where the selection comes from.
    pub fn selection_source(&self) -> SelectionSource {
        if self.all {
            SelectionSource::All
        } else if let Some(ref path) = self.selection {
            SelectionSource::File(path.clone())
        } else {
            SelectionSource::LastSession
        }
    }
}
