//! # visor CLI entry point
//!
//! Parses command-line arguments, resolves the viewer configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use visor_cli::basemaps::{run_basemaps, BasemapsArgs};
use visor_cli::export::{run_export, ExportArgs};
use visor_cli::query::{run_query, QueryArgs};
use visor_core::ViewerConfig;

/// Visor de Territorios Formalizados
///
/// Filters, summarizes, and exports the formalized indigenous and community
/// council territories from the land-agency shapefile archive.
#[derive(Parser, Debug)]
#[command(name = "visor", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Territory archive (.zip). Overrides the configuration.
    #[arg(long, global = true)]
    archive: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter territories and print the table and statistics.
    Query(QueryArgs),

    /// Write a CSV, shapefile, or HTML map of the filtered territories.
    Export(ExportArgs),

    /// List the available base maps.
    Basemaps(BasemapsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = resolve_config(&cli).and_then(|config| {
        tracing::debug!(archive = %config.archive_path.display(), "resolved configuration");
        match &cli.command {
            Commands::Query(args) => run_query(args, &config),
            Commands::Export(args) => run_export(args, &config),
            Commands::Basemaps(args) => run_basemaps(args, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ViewerConfig> {
    let mut config =
        ViewerConfig::load(cli.config.as_deref()).context("invalid viewer configuration")?;
    if let Some(archive) = &cli.archive {
        config.archive_path = archive.clone();
    }
    Ok(config)
}
