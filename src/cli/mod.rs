//! CLI command definitions for quill-port
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod export;
pub mod import;
pub mod paths;

use clap::{Parser, Subcommand};
use export::ExportArgs;
use import::ImportArgs;
use paths::PathsArgs;

/// Import and export Quill plugin settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Installation root directory (overrides config)
    #[arg(short, long, global = true)]
    pub root: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export selected plugin settings to a portable JSON file
    Export(ExportArgs),

    /// Merge a previously exported settings file into this installation
    Import(ImportArgs),

    /// List the addressable settings paths of installed extensions
    Paths(PathsArgs),
}
