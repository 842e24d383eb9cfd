//! Import subcommand for quill-port
//!
//! Reads a previously exported settings file and merges it, one extension
//! at a time, into the live configuration.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the import subcommand
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the settings export to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Whether the chosen file looks like a settings export. The host
    /// application's file picker only offers .json files; the CLI applies
    /// the same rule.
    pub fn is_json_file(&self) -> bool {
        self.file.extension().is_some_and(|ext| ext == "json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json_file() {
        let args = ImportArgs {
            file: PathBuf::from("quill-settings-export.json"),
            dry_run: false,
        };
        assert!(args.is_json_file());

        let args = ImportArgs {
            file: PathBuf::from("settings.yaml"),
            dry_run: false,
        };
        assert!(!args.is_json_file());

        let args = ImportArgs {
            file: PathBuf::from("no-extension"),
            dry_run: false,
        };
        assert!(!args.is_json_file());
    }
}
