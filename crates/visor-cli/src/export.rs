//! # Export Subcommand
//!
//! Writes one export of the filtered selection to disk. Without `--out`,
//! the file lands in the current directory under the format's fixed name.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use visor_core::{BaseMapStyle, TerritoryCollection, ViewerConfig};
use visor_export::ExportFormat;
use visor_query::apply;

use crate::filters::FilterArgs;

/// Arguments for the `visor export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format: csv, shapefile, or html.
    #[arg(long)]
    pub format: ExportFormat,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Base map for the HTML export (osm, positron, dark-matter, satellite,
    /// gray-canvas, topo).
    #[arg(long)]
    pub basemap: Option<BaseMapStyle>,

    /// Output file. Defaults to the format's standard file name.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs, config: &ViewerConfig) -> Result<u8> {
    let dataset = crate::load_dataset(config)?;
    let path = export_to_file(args, config, &dataset)?;
    println!("{}", path.display());
    Ok(0)
}

/// Filter `dataset`, export it, and write the file. Returns the path written.
pub fn export_to_file(
    args: &ExportArgs,
    config: &ViewerConfig,
    dataset: &TerritoryCollection,
) -> Result<PathBuf> {
    let subset = apply(dataset, &args.filters.criteria());
    if subset.is_empty() {
        tracing::warn!(format = %args.format, "no territories match; exporting an empty selection");
    }

    let style = args.basemap.unwrap_or(config.default_basemap);
    let artifact = args
        .format
        .export(&subset, style)
        .with_context(|| format!("{} export failed", args.format))?;

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| Path::new(artifact.file_name).to_path_buf());
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("cannot write {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        records = subset.len(),
        bytes = artifact.bytes.len(),
        "export written"
    );
    Ok(path)
}
