//! # Downloads
//!
//! `/v1/export/{format}` with `format` one of `csv`, `shapefile`, `html`.
//! Responses carry `Content-Disposition: attachment` with the fixed file
//! name of each format.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::{Query, QueryRejection};
use visor_export::ExportFormat;
use visor_query::apply;

use crate::error::AppError;
use crate::extractors::{extract_query, ViewerQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/export/{format}", get(export_selection))
}

/// GET /v1/export/{format}: download the filtered territories.
#[utoipa::path(
    get,
    path = "/v1/export/{format}",
    params(
        ("format" = String, Path, description = "csv, shapefile, or html"),
        ViewerQuery,
    ),
    responses(
        (status = 200, description = "Export file", content_type = "application/octet-stream"),
        (status = 404, description = "Unknown export format", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown base map", body = crate::error::ErrorBody),
    ),
    tag = "exports"
)]
pub(crate) async fn export_selection(
    State(state): State<AppState>,
    Path(format): Path<String>,
    query: Result<Query<ViewerQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format
        .parse()
        .map_err(|_| AppError::NotFound(format!("export format {format}")))?;
    let query = extract_query(query)?;
    let style = query.basemap_or(state.config.default_basemap)?;

    let dataset = state.dataset.clone();
    let criteria = query.criteria();
    // Shapefile packaging touches the disk; keep it off the async workers.
    let artifact = tokio::task::spawn_blocking(move || {
        let subset = apply(&dataset, &criteria);
        format.export(&subset, style)
    })
    .await
    .map_err(|e| AppError::Internal(format!("export task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, artifact.content_disposition()),
        ],
        artifact.bytes,
    )
        .into_response())
}
