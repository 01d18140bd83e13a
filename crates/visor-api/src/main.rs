//! # visor-api — Binary Entry Point
//!
//! Loads the configuration and the territory archive, then serves the
//! viewer. A dataset that cannot be loaded stops the process with a
//! non-zero exit code; there is no fallback dataset.
//!
//! Environment:
//!
//! - `VISOR_CONFIG`: optional YAML configuration file
//! - `VISOR_ARCHIVE`, `VISOR_HOST`, `VISOR_PORT`, `VISOR_BASEMAP`: overrides
//! - `RUST_LOG`: log filter (default `info`)
//! - `VISOR_LOG_FORMAT=json`: JSON log lines

use std::path::PathBuf;

use anyhow::Context;
use visor_api::AppState;
use visor_core::ViewerConfig;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("VISOR_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = std::env::var_os("VISOR_CONFIG").map(PathBuf::from);
    let config = ViewerConfig::load(config_path.as_deref()).map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;

    let archive = config.archive_path.clone();
    let dataset = tokio::task::spawn_blocking(move || visor_geodata::load_archive(&archive))
        .await
        .context("archive loader task failed")?
        .map_err(|e| {
            tracing::error!(error = %e, archive = %config.archive_path.display(), "cannot load territory archive");
            e
        })?;

    let addr = config.bind_address();
    let state = AppState::new(config, dataset);
    let app = visor_api::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!(%addr, "territory viewer listening");
    axum::serve(listener, app).await?;

    Ok(())
}
