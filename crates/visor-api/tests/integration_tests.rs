//! # Integration Tests for visor-api
//!
//! Drives the full router with an in-memory territory collection: health
//! probes, the viewer page, the JSON API, the map page, downloads, and the
//! OpenAPI document.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use geo::{polygon, MultiPolygon};
use http_body_util::BodyExt;
use tower::ServiceExt;

use visor_api::AppState;
use visor_core::{
    CommunityType, DatasetMetadata, TerritoryCollection, TerritoryId, TerritoryRecord, ViewerConfig,
};

fn record(id: &str, name: &str, kind: &str, dept: &str, muni: &str, area: f64) -> TerritoryRecord {
    let x = -77.0 + id.len() as f64 * 0.1;
    TerritoryRecord {
        id: TerritoryId::new(id).unwrap(),
        name: name.to_string(),
        community_type: CommunityType::new(kind),
        department: dept.to_string(),
        municipality: muni.to_string(),
        area_ha: area,
        geometry: MultiPolygon::new(vec![polygon![
            (x: x, y: 5.0),
            (x: x + 0.05, y: 5.0),
            (x: x + 0.05, y: 5.05),
            (x: x, y: 5.05),
            (x: x, y: 5.0),
        ]]),
    }
}

/// Helper: build the test app over four territories.
fn test_app() -> axum::Router {
    let dataset = TerritoryCollection::new(
        vec![
            record("1", "Resguardo Nasa Kiwe", "Comunidad Indígena", "Cauca", "Páez", 1500.25),
            record("22", "Consejo Mayor del Atrato", "Consejo Comunitario", "Chocó", "Quibdó", 800.0),
            record("333", "Río Baudó <Alto>", "Consejo Comunitario", "Chocó", "Alto Baudó", 200.0),
            record("4444", "Resguardo Embera", "Comunidad Indígena", "Chocó", "Quibdó", 99.5),
        ],
        DatasetMetadata::new("memory", None),
    )
    .unwrap();
    visor_api::app(AppState::new(ViewerConfig::default(), dataset))
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(uri: &str) -> axum::http::Response<Body> {
    test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = get("/health/liveness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = get("/health/readiness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Territories API ----------------------------------------------------------

#[tokio::test]
async fn test_territories_without_filters_returns_all() {
    let response = get("/v1/territories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["summary"]["count"], 4);
    assert_eq!(body["summary"]["indigenous_count"], 2);
    assert_eq!(body["summary"]["community_council_count"], 2);
    assert_eq!(body["territories"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_territories_repeated_params_are_any_of() {
    let response =
        get("/v1/territories?department=Cauca&department=Ch%C3%B3c%C3%B3&municipality=Quibd%C3%B3")
            .await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    // Cauca matches the department list but its only territory is in Páez.
    assert_eq!(body["summary"]["count"], 0);

    let response = get("/v1/territories?type=Consejo+Comunitario&department=Ch%C3%B3").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["summary"]["count"], 0);

    let response = get("/v1/territories?type=Consejo+Comunitario&department=Choc%C3%B3").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["summary"]["count"], 2);
    assert_eq!(body["summary"]["hectares"], 1000);
}

#[tokio::test]
async fn test_territories_by_id_and_name() {
    let response = get("/v1/territories?id=22").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["territories"][0]["name"], "Consejo Mayor del Atrato");
    assert_eq!(body["territories"][0]["community_kind"], "community_council");

    let response = get("/v1/territories?name=resguardo").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["summary"]["count"], 2);
}

#[tokio::test]
async fn test_unknown_id_yields_zero_summary() {
    let response = get("/v1/territories?id=does-not-exist").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["summary"]["count"], 0);
    assert_eq!(body["summary"]["total_area_ha"], 0.0);
    assert!(body["territories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_options_are_sorted_and_unique() {
    let response = get("/v1/options").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["departments"], serde_json::json!(["Cauca", "Chocó"]));
    assert_eq!(
        body["community_types"],
        serde_json::json!(["Comunidad Indígena", "Consejo Comunitario"])
    );
}

#[tokio::test]
async fn test_basemaps_lists_six_with_default() {
    let response = get("/v1/basemaps").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let styles = body.as_array().unwrap();
    assert_eq!(styles.len(), 6);
    let defaults: Vec<_> = styles.iter().filter(|s| s["is_default"] == true).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["slug"], "positron");
}

// -- Map Page -----------------------------------------------------------------

#[tokio::test]
async fn test_map_page_uses_requested_basemap() {
    let response = get("/v1/map?basemap=satellite&department=Cauca").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("World_Imagery"));
    assert!(html.contains("Resguardo Nasa Kiwe"));
    assert!(!html.contains("Consejo Mayor del Atrato"));
}

#[tokio::test]
async fn test_unknown_basemap_is_422() {
    let response = get("/v1/map?basemap=watercolor").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_selection_renders_empty_map() {
    let response = get("/v1/map?id=nope").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("\"bounds\":null"));
    assert!(html.contains("\"zoom\":5"));
}

// -- Viewer Page --------------------------------------------------------------

#[tokio::test]
async fn test_viewer_page_lists_everything_by_default() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<title>Visor de Territorios Formalizados</title>"));
    assert!(html.contains("Reiniciar visor"));
    assert!(html.contains("<option value=\"positron\" selected>"));
    assert!(html.contains("/v1/export/csv?basemap=positron"));
    assert!(html.contains("Río Baudó &lt;Alto&gt;"));
    assert!(!html.contains("Territorio consultado"));
}

#[tokio::test]
async fn test_viewer_page_single_result_banner() {
    let html = body_string(get("/?id=4444").await).await;
    assert!(html.contains("Territorio consultado: <strong>Resguardo Embera</strong>"));
    assert!(html.contains("/v1/map?id=4444&amp;basemap=positron"));
}

#[tokio::test]
async fn test_viewer_page_no_results_warning() {
    let html = body_string(get("/?name=inexistente").await).await;
    assert!(html.contains("No se encontraron resultados con los filtros aplicados"));
    assert!(!html.contains("<table>"));
}

#[tokio::test]
async fn test_viewer_page_marks_selected_options() {
    let html = body_string(get("/?department=Choc%C3%B3&basemap=topo").await).await;
    assert!(html.contains("<option value=\"Chocó\" selected>Chocó</option>"));
    assert!(html.contains("<option value=\"Cauca\">Cauca</option>"));
    assert!(html.contains("<option value=\"topo\" selected>"));
}

#[tokio::test]
async fn test_viewer_page_escapes_echoed_search() {
    let html = body_string(get("/?name=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E").await).await;
    assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;""#));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn test_viewer_page_suggests_names() {
    let html = body_string(get("/").await).await;
    assert!(html.contains(r#"list="territory-names""#));
    assert!(html.contains(r#"<datalist id="territory-names">"#));
    assert!(html.contains(r#"<option value="Resguardo Embera"></option>"#));
    assert!(html.contains(r#"<option value="Río Baudó &lt;Alto&gt;"></option>"#));
    assert!(html.contains(r#"<input type="text" id="id" name="id" value="">"#));
}

#[tokio::test]
async fn test_viewer_page_footer_shows_source_and_load_time() {
    let html = body_string(get("/").await).await;
    assert!(html.contains("Fuente: memory · 4 territorios · cargado "));
    assert!(html.contains("<time datetime=\""));
    assert!(html.contains(" UTC</time>"));
}

// -- Downloads ----------------------------------------------------------------

#[tokio::test]
async fn test_csv_download() {
    let response = get("/v1/export/csv?department=Cauca").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"resultados_formalizados.csv\""
    );
    let body = body_string(response).await;
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("ID_ANT,NOMBRE,Tipo,DEPARTAMEN,MUNICIPIO,AREA_TOTAL")
    );
    assert!(lines.next().unwrap().starts_with("1,Resguardo Nasa Kiwe,"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_shapefile_download() {
    let response = get("/v1/export/shapefile").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"shapefile_filtrado.zip\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_html_download() {
    let response = get("/v1/export/html?basemap=dark-matter").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"mapa_formalizado.html\""
    );
    assert!(body_string(response).await.contains("dark_all"));
}

#[tokio::test]
async fn test_unknown_export_format_is_404() {
    let response = get("/v1/export/pdf").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_document() {
    let response = get("/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body["paths"]["/v1/territories"].is_object());
    assert!(body["paths"]["/v1/export/{format}"].is_object());
}
