//! Paths subcommand for quill-port
//!
//! Prints the addressable settings paths a selection can be built from,
//! with the kind of value at each path.

use clap::Args;

/// Arguments for the paths subcommand
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Extension id to enumerate (all installed extensions if omitted)
    #[arg(value_name = "EXTENSION")]
    pub extension: Option<String>,
}
