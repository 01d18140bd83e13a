//! # Basemaps Subcommand

use std::io::Write;

use anyhow::Result;
use clap::Args;
use visor_core::{BaseMapStyle, ViewerConfig};

/// Arguments for the `visor basemaps` subcommand.
#[derive(Args, Debug, Default)]
pub struct BasemapsArgs {
    /// Also print each style's tile URL.
    #[arg(long)]
    pub urls: bool,
}

/// Execute the basemaps subcommand.
pub fn run_basemaps(args: &BasemapsArgs, config: &ViewerConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    write_basemaps(&mut stdout.lock(), args, config.default_basemap)?;
    Ok(0)
}

/// One line per style: slug, label, and a marker on the default.
pub fn write_basemaps<W: Write>(
    out: &mut W,
    args: &BasemapsArgs,
    default: BaseMapStyle,
) -> Result<()> {
    for style in BaseMapStyle::all_styles() {
        let marker = if *style == default { " (default)" } else { "" };
        writeln!(out, "{:<12} {}{marker}", style.as_str(), style.label())?;
        if args.urls {
            writeln!(out, "{:<12} {}", "", style.tile_url())?;
        }
    }
    Ok(())
}
