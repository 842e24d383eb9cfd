//! Quill settings porter
//!
//! A command-line tool that exports selected Quill settings, core
//! subsystems and community plugins alike, into one portable JSON file
//! and merges such files back into another installation.

use anyhow::{Context, Result};
use clap::Parser;
use quill_port::cli::export::{ExportArgs, SelectionSource};
use quill_port::cli::import::ImportArgs;
use quill_port::cli::paths::PathsArgs;
use quill_port::cli::{Cli, Command};
use quill_port::config::PorterConfig;
use quill_port::document::ExportDocument;
use quill_port::host::{DirAdapter, DirRegistry};
use quill_port::porter::{ImportReport, SettingsPorter};
use quill_port::selection::SelectionSet;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // If explicit config path given, set it as env var for the loader to pick up
    // SAFETY: This is safe at program startup before any other threads are spawned
    if let Some(config_path) = &cli.config {
        // Use unsafe block for set_var which is required in Rust 2024 edition
        unsafe {
            std::env::set_var("QUILL_PORT_CONFIG_PATH", config_path);
        }
    }
    let mut config = PorterConfig::load_or_default()?;

    // An explicit --root wins over both the config file and auto-discovery
    if let Some(root) = &cli.root {
        config.root = PathBuf::from(root);
    } else {
        config.root = config.resolve_root();
    }

    match cli.command {
        Command::Export(args) => {
            run_export(&config, args).await?;
        }
        Command::Import(args) => {
            run_import(&config, args).await?;
        }
        Command::Paths(args) => {
            run_paths(&config, args).await?;
        }
    }

    Ok(())
}

/// Open the porter over the installation at `config.root`.
///
/// A root without the configuration directory is not an installation at
/// all, so that is checked before anything is scanned.
async fn open_porter(config: &PorterConfig) -> Result<SettingsPorter<DirRegistry, DirAdapter>> {
    let config_dir = config.config_dir_path();
    if !config_dir.is_dir() {
        anyhow::bail!(
            "no {} configuration directory at {}",
            config.product,
            config_dir.display()
        );
    }
    let registry = DirRegistry::open(&config_dir, &config.plugins_dir).await?;
    let files = DirAdapter::new(&config.root);
    Ok(SettingsPorter::new(registry, files, config.clone()))
}

/// Run the export command
async fn run_export(config: &PorterConfig, args: ExportArgs) -> Result<()> {
    let porter = open_porter(config).await?;

    // Resolve the selection: --all, an explicit file, or the one the
    // previous export persisted
    let selection = match args.selection_source() {
        SelectionSource::All => porter.select_all().await,
        SelectionSource::File(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading selection file {}", path.display()))?;
            serde_json::from_str::<SelectionSet>(&text)
                .with_context(|| format!("{} is not a selection file", path.display()))?
        }
        SelectionSource::LastSession => match porter.load_last_selection().await {
            Some(selection) => selection,
            None => {
                anyhow::bail!(
                    "no selection from a previous export; pass --selection <FILE> or --all"
                );
            }
        },
    };
    if selection.is_empty() {
        anyhow::bail!("the selection is empty; nothing to export");
    }

    let report = porter.export(&selection).await;
    for id in &report.missing {
        eprintln!("Warning: selected extension '{}' is not installed", id);
    }
    for (id, message) in &report.failed {
        eprintln!("Warning: could not export '{}': {}", id, message);
    }
    if report.document.is_empty() {
        if !report.failed.is_empty() {
            anyhow::bail!(
                "no settings exported; {} extension(s) failed",
                report.failed.len()
            );
        }
        println!("No selected settings resolved; nothing to export.");
        return Ok(());
    }

    // Write output
    let written_to = if let Some(ref path) = args.output {
        let json_output = report.document.to_json_pretty()?;
        std::fs::write(path, &json_output)
            .with_context(|| format!("writing {}", path.display()))?;
        path.clone()
    } else {
        let file_name = config.export_file_name();
        porter.write_document(&report.document, &file_name).await?;
        config.root.join(&file_name)
    };

    // Remember the selection as the next export's starting point. Losing
    // it only costs the user a --selection flag next time.
    if let Err(err) = porter.save_last_selection(&selection).await {
        debug!("could not persist the export selection: {}", err);
    }

    eprintln!(
        "Exported {} extension(s) to {}",
        report.document.len(),
        written_to.display()
    );
    Ok(())
}

/// Run the import command
async fn run_import(config: &PorterConfig, args: ImportArgs) -> Result<()> {
    if !args.is_json_file() {
        anyhow::bail!("{} is not a .json settings export", args.file.display());
    }

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let document = ExportDocument::from_json(&text)
        .with_context(|| format!("{} is not a settings export", args.file.display()))?;
    if document.is_empty() {
        println!("Nothing to import.");
        return Ok(());
    }

    let porter = open_porter(config).await?;
    let report = if args.dry_run {
        porter.preview(&document).await
    } else {
        porter.import(&document).await
    };

    // Per-entry failures are reported in the summary but do not fail the
    // command; once the document parsed, the import ran.
    print_import_report(&report, args.dry_run);
    Ok(())
}

fn print_import_report(report: &ImportReport, dry_run: bool) {
    if dry_run {
        println!("Dry run results:");
    } else {
        println!("Import complete:");
    }
    if report.applied.is_empty() {
        println!("  Nothing applied.");
    } else {
        println!("  {}:", if dry_run { "Would apply" } else { "Applied" });
        for id in &report.applied {
            println!("    {}", id);
        }
    }
    if !report.warnings.is_empty() {
        println!("  Warnings:");
        for warning in &report.warnings {
            println!("    - {}", warning);
        }
    }
    if !report.failed.is_empty() {
        println!("  Failed:");
        for (id, message) in &report.failed {
            println!("    {}: {}", id, message);
        }
    }
}

/// Run the paths command
async fn run_paths(config: &PorterConfig, args: PathsArgs) -> Result<()> {
    let porter = open_porter(config).await?;

    let targets = match &args.extension {
        Some(id) => {
            let Some(info) = porter.installed().into_iter().find(|ext| ext.id == *id) else {
                anyhow::bail!("extension '{}' is not installed", id);
            };
            vec![info]
        }
        None => porter.installed(),
    };

    for info in targets {
        println!("{} ({})", info.id, info.kind);
        match porter.enumerate(&info.id).await {
            Some(entries) if entries.is_empty() => println!("  (no settings)"),
            Some(entries) => {
                for entry in entries {
                    println!("  {}\t{}", entry.path, entry.kind);
                }
            }
            None => println!("  (settings unavailable)"),
        }
    }
    Ok(())
}
