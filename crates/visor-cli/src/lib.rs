//! # visor-cli — Offline Territory Viewer
//!
//! The `visor` command runs the same filter, summary, and export pipeline
//! as the web viewer, straight from a terminal:
//!
//! ```bash
//! visor query --department Chocó --type "Consejo Comunitario"
//! visor export --format shapefile --department Chocó --out choco.zip
//! visor basemaps
//! ```
//!
//! Each subcommand module exposes an `Args` struct and a `run_*` handler
//! returning the process exit code.

pub mod basemaps;
pub mod export;
pub mod filters;
pub mod query;

use anyhow::{Context, Result};
use visor_core::{TerritoryCollection, ViewerConfig};

/// Load the territory archive named by `config`.
pub fn load_dataset(config: &ViewerConfig) -> Result<TerritoryCollection> {
    visor_geodata::load_archive(&config.archive_path).with_context(|| {
        format!(
            "cannot load territory archive {}",
            config.archive_path.display()
        )
    })
}
