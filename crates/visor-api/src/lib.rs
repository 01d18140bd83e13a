//! # visor-api — Presentation Shell
//!
//! The Axum application that puts the viewer in a browser. The territory
//! collection is loaded once at startup and held in [`AppState`]; every
//! request filters it afresh.
//!
//! ## Routes
//!
//! - `/`: server-rendered viewer page (sidebar, statistics, map, table)
//! - `/v1/territories`: filtered records and their summary (JSON)
//! - `/v1/options`: dropdown values (JSON)
//! - `/v1/basemaps`: the six base-map styles (JSON)
//! - `/v1/map`: rendered map page, embedded by the viewer in an iframe
//! - `/v1/export/{format}`: CSV, shapefile package, or HTML download
//! - `/openapi.json`: generated OpenAPI document
//! - `/health/*`: liveness and readiness probes
//!
//! All filter endpoints share one set of query parameters: `id`, `name`,
//! and repeatable `type`, `department`, `municipality`, plus `basemap`.
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers. Filtering, statistics, rendering,
//!   and exports are delegated to the domain crates.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::viewer::router())
        .merge(routes::territories::router())
        .merge(routes::map::router())
        .merge(routes::exports::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

async fn liveness() -> &'static str {
    "ok"
}

// The dataset is loaded before the listener binds, so a serving process is ready.
async fn readiness() -> &'static str {
    "ready"
}
