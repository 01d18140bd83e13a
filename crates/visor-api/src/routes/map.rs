//! # Map Page
//!
//! The rendered Leaflet page for the current selection. The viewer embeds
//! it in an iframe; it is also usable on its own.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::{Query, QueryRejection};
use visor_query::apply;

use crate::error::AppError;
use crate::extractors::{extract_query, ViewerQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/map", get(map_page))
}

/// GET /v1/map: standalone map of the filtered territories.
#[utoipa::path(
    get,
    path = "/v1/map",
    params(ViewerQuery),
    responses(
        (status = 200, description = "Leaflet map page", content_type = "text/html", body = String),
        (status = 422, description = "Unknown base map", body = crate::error::ErrorBody),
    ),
    tag = "maps"
)]
pub(crate) async fn map_page(
    State(state): State<AppState>,
    query: Result<Query<ViewerQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let query = extract_query(query)?;
    let style = query.basemap_or(state.config.default_basemap)?;
    let subset = apply(&state.dataset, &query.criteria());
    let view = visor_map::render(&subset, style);
    Ok(Html(visor_map::to_html(&view)))
}
