//! # Query Subcommand
//!
//! Prints the matching territories and the statistics panel, as an aligned
//! table or as JSON.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use visor_core::{TerritoryAttributes, ViewerConfig};
use visor_query::{apply, summarize, Subset, Summary};

use crate::filters::FilterArgs;

/// Warning printed when the filters match nothing.
pub const NO_RESULTS_MESSAGE: &str = "No se encontraron resultados con los filtros aplicados";

/// Arguments for the `visor query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonReport {
    summary: Summary,
    territories: Vec<TerritoryAttributes>,
}

/// Execute the query subcommand.
pub fn run_query(args: &QueryArgs, config: &ViewerConfig) -> Result<u8> {
    let dataset = crate::load_dataset(config)?;
    let subset = apply(&dataset, &args.filters.criteria());
    tracing::info!(matched = subset.len(), total = dataset.len(), "query");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        write_json(&mut out, &subset)?;
    } else {
        write_report(&mut out, &subset)?;
    }
    Ok(0)
}

/// Write the selection and its summary as pretty JSON.
pub fn write_json<W: Write>(out: &mut W, subset: &Subset<'_>) -> Result<()> {
    let report = JsonReport {
        summary: summarize(subset),
        territories: subset.iter().map(|r| r.attributes()).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

const HEADERS: [&str; 6] = [
    "ID",
    "Nombre",
    "Tipo",
    "Departamento",
    "Municipio",
    "Área total (ha)",
];

/// Write the selection as an aligned table followed by the statistics.
pub fn write_report<W: Write>(out: &mut W, subset: &Subset<'_>) -> Result<()> {
    if let Some(only) = subset.single() {
        writeln!(out, "Territorio consultado: {}", only.name)?;
        writeln!(out)?;
    }

    if subset.is_empty() {
        writeln!(out, "{NO_RESULTS_MESSAGE}")?;
    } else {
        let rows: Vec<[String; 6]> = subset
            .iter()
            .map(|r| {
                [
                    r.id.to_string(),
                    r.name.clone(),
                    r.community_type.label().to_string(),
                    r.department.clone(),
                    r.municipality.clone(),
                    format!("{:.2}", r.area_ha),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(out, &HEADERS.map(str::to_string), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "{}", rule.join("-+-"))?;
        for row in &rows {
            write_row(out, row, &widths)?;
        }
    }

    let summary = summarize(subset);
    writeln!(out)?;
    writeln!(out, "Territorios:            {}", summary.count)?;
    writeln!(out, "Área total:             {}", summary.area_breakdown())?;
    writeln!(out, "Indígenas:              {}", summary.indigenous_count)?;
    writeln!(out, "Consejos comunitarios:  {}", summary.community_council_count)?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 6], widths: &[usize; 6]) -> Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())?;
    Ok(())
}
