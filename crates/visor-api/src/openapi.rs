//! # OpenAPI Specification Assembly
//!
//! Collects every utoipa-documented route into one document served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visor de Territorios Formalizados",
        version = "0.1.0",
        description = "Filter, summarize, map, and export formalized indigenous and community territories.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::viewer::viewer_page,
        crate::routes::territories::list_territories,
        crate::routes::territories::filter_options,
        crate::routes::territories::list_basemaps,
        crate::routes::map::map_page,
        crate::routes::exports::export_selection,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::territories::TerritoryResponse,
        crate::routes::territories::SummaryResponse,
        crate::routes::territories::TerritoriesResponse,
        crate::routes::territories::OptionsResponse,
        crate::routes::territories::BaseMapResponse,
    )),
    tags(
        (name = "viewer", description = "Server-rendered viewer page"),
        (name = "territories", description = "Filtered territories and statistics"),
        (name = "maps", description = "Base maps and rendered map pages"),
        (name = "exports", description = "CSV, shapefile, and HTML downloads"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
