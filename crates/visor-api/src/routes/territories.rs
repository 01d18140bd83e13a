//! # Territory Query API
//!
//! JSON access to the filtered selection, its statistics, the dropdown
//! values, and the base-map catalogue.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::{Query, QueryRejection};
use serde::Serialize;
use utoipa::ToSchema;
use visor_core::{BaseMapStyle, TerritoryRecord};
use visor_query::{apply, summarize, Summary};

use crate::error::AppError;
use crate::extractors::{extract_query, ViewerQuery};
use crate::state::AppState;

/// One territory, geometry excluded.
#[derive(Debug, Serialize, ToSchema)]
pub struct TerritoryResponse {
    pub id: String,
    pub name: String,
    /// `Tipo` label as it appears in the dataset.
    pub community_type: String,
    /// `indigenous`, `community_council`, or `other`.
    pub community_kind: String,
    pub department: String,
    pub municipality: String,
    pub area_ha: f64,
}

impl From<&TerritoryRecord> for TerritoryResponse {
    fn from(record: &TerritoryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            community_type: record.community_type.label().to_string(),
            community_kind: record.community_type.kind().as_str().to_string(),
            department: record.department.clone(),
            municipality: record.municipality.clone(),
            area_ha: record.area_ha,
        }
    }
}

/// Statistics panel of a selection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    pub count: usize,
    pub total_area_ha: f64,
    /// Whole hectares of the total area.
    pub hectares: u64,
    /// Square metres left over after the whole hectares.
    pub square_metres: u64,
    pub indigenous_count: usize,
    pub community_council_count: usize,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        let breakdown = summary.area_breakdown();
        Self {
            count: summary.count,
            total_area_ha: summary.total_area_ha,
            hectares: breakdown.hectares,
            square_metres: breakdown.square_metres,
            indigenous_count: summary.indigenous_count,
            community_council_count: summary.community_council_count,
        }
    }
}

/// Filtered territories with their summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct TerritoriesResponse {
    pub summary: SummaryResponse,
    pub territories: Vec<TerritoryResponse>,
}

/// Distinct values for the sidebar dropdowns.
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionsResponse {
    pub names: Vec<String>,
    pub community_types: Vec<String>,
    pub departments: Vec<String>,
    pub municipalities: Vec<String>,
}

/// One selectable base map.
#[derive(Debug, Serialize, ToSchema)]
pub struct BaseMapResponse {
    /// Value for the `basemap` query parameter.
    pub slug: String,
    pub label: String,
    pub tile_url: String,
    pub attribution: String,
    pub max_zoom: u8,
    /// Whether this is the configured default.
    pub is_default: bool,
}

/// Build the territory query router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/territories", get(list_territories))
        .route("/v1/options", get(filter_options))
        .route("/v1/basemaps", get(list_basemaps))
}

/// GET /v1/territories: filtered territories and statistics.
#[utoipa::path(
    get,
    path = "/v1/territories",
    params(ViewerQuery),
    responses(
        (status = 200, description = "Filtered territories", body = TerritoriesResponse),
        (status = 400, description = "Malformed query string", body = crate::error::ErrorBody),
    ),
    tag = "territories"
)]
pub(crate) async fn list_territories(
    State(state): State<AppState>,
    query: Result<Query<ViewerQuery>, QueryRejection>,
) -> Result<Json<TerritoriesResponse>, AppError> {
    let query = extract_query(query)?;
    let subset = apply(&state.dataset, &query.criteria());
    Ok(Json(TerritoriesResponse {
        summary: summarize(&subset).into(),
        territories: subset.iter().map(TerritoryResponse::from).collect(),
    }))
}

/// GET /v1/options: values for the type, department, and municipality selectors.
#[utoipa::path(
    get,
    path = "/v1/options",
    responses(
        (status = 200, description = "Dropdown values", body = OptionsResponse),
    ),
    tag = "territories"
)]
pub(crate) async fn filter_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let options = state.options.as_ref();
    Json(OptionsResponse {
        names: options.names.clone(),
        community_types: options.community_types.clone(),
        departments: options.departments.clone(),
        municipalities: options.municipalities.clone(),
    })
}

/// GET /v1/basemaps: the six base-map styles.
#[utoipa::path(
    get,
    path = "/v1/basemaps",
    responses(
        (status = 200, description = "Base-map catalogue", body = [BaseMapResponse]),
    ),
    tag = "maps"
)]
pub(crate) async fn list_basemaps(State(state): State<AppState>) -> Json<Vec<BaseMapResponse>> {
    let default = state.config.default_basemap;
    Json(
        BaseMapStyle::all_styles()
            .iter()
            .map(|style| BaseMapResponse {
                slug: style.as_str().to_string(),
                label: style.label().to_string(),
                tile_url: style.tile_url().to_string(),
                attribution: style.attribution().to_string(),
                max_zoom: style.max_zoom(),
                is_default: *style == default,
            })
            .collect(),
    )
}
