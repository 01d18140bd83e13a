//! # Viewer Page
//!
//! The single page of the viewer, rendered on the server:
//!
//! - a sidebar form with the text searches, the three multi-selects, the
//!   base-map selector, a "show map" submit, and a "reset viewer" link;
//! - a banner naming the territory when exactly one matched, or a warning
//!   when none did;
//! - the statistics panel, the map iframe, the attribute table, and the
//!   three download links;
//! - a footer naming the source archive and when it was loaded.
//!
//! The name search suggests every territory name through a `<datalist>`.
//!
//! The form submits back to `/` with a GET, so every state of the page is
//! a shareable URL.

use std::path::Path;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::{Query, QueryRejection};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use visor_core::{BaseMapStyle, TerritoryRecord};
use visor_query::{apply, summarize, Summary};

use crate::error::AppError;
use crate::extractors::{extract_query, ViewerQuery};
use crate::state::AppState;

/// Warning shown when the filters match nothing.
pub const NO_RESULTS_MESSAGE: &str = "No se encontraron resultados con los filtros aplicados";

/// `id` of the datalist that suggests territory names.
const NAME_LIST_ID: &str = "territory-names";

const LOADED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

const STYLESHEET: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #222; display: flex; min-height: 100vh; }
aside { width: 300px; padding: 1rem; background: #f3f1ea; border-right: 1px solid #ddd; }
aside label { display: block; margin-top: .8rem; font-weight: 600; font-size: .9rem; }
aside input, aside select { width: 100%; box-sizing: border-box; margin-top: .2rem; }
aside select[multiple] { height: 7rem; }
aside .actions { margin-top: 1rem; display: flex; gap: .5rem; align-items: center; }
main { flex: 1; padding: 1rem 1.5rem; overflow-x: auto; }
.banner { padding: .6rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.banner.info { background: #e4f2e4; border: 1px solid #228B22; }
.banner.warning { background: #fff4d6; border: 1px solid #d9a400; }
.stats { display: flex; gap: 1.5rem; margin-bottom: 1rem; }
.stats div { background: #fafafa; border: 1px solid #e2e2e2; padding: .5rem .9rem; border-radius: 4px; }
.stats strong { display: block; font-size: 1.3rem; }
iframe { width: 100%; height: 520px; border: 1px solid #ccc; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; font-size: .85rem; }
th, td { border: 1px solid #ddd; padding: .3rem .5rem; text-align: left; }
th { background: #f0f0f0; }
td.num { text-align: right; }
.downloads a { margin-right: 1rem; }
footer { margin-top: 1.5rem; font-size: .8rem; color: #666; }
"#;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(viewer_page))
}

/// GET /: the viewer page.
#[utoipa::path(
    get,
    path = "/",
    params(ViewerQuery),
    responses(
        (status = 200, description = "Viewer page", content_type = "text/html", body = String),
        (status = 422, description = "Unknown base map", body = crate::error::ErrorBody),
    ),
    tag = "viewer"
)]
pub(crate) async fn viewer_page(
    State(state): State<AppState>,
    query: Result<Query<ViewerQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let query = extract_query(query)?;
    let style = query.basemap_or(state.config.default_basemap)?;
    let subset = apply(&state.dataset, &query.criteria());
    let summary = summarize(&subset);
    let records: Vec<&TerritoryRecord> = subset.iter().collect();

    let page = ViewerPage {
        state: &state,
        query: &query,
        style,
        summary,
        records: &records,
    };
    Ok(Html(page.render()))
}

struct ViewerPage<'a> {
    state: &'a AppState,
    query: &'a ViewerQuery,
    style: BaseMapStyle,
    summary: Summary,
    records: &'a [&'a TerritoryRecord],
}

impl ViewerPage<'_> {
    fn render(&self) -> String {
        let title = &self.state.config.title;
        let qs = self.query.to_query_string(self.style);
        html! {
            (DOCTYPE)
            html lang="es" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    style { (PreEscaped(STYLESHEET)) }
                }
                body {
                    (self.sidebar())
                    main {
                        h1 { (title) }
                        (self.banner())
                        (self.statistics())
                        iframe src={ "/v1/map?" (qs) } title="Mapa" loading="lazy" {}
                        (downloads(&qs))
                        (self.table())
                        (self.footer())
                    }
                }
            }
        }
        .into_string()
    }

    fn sidebar(&self) -> Markup {
        let options = self.state.options.as_ref();
        html! {
            aside {
                form method="get" action="/" {
                    h2 { "Filtros" }
                    (text_input("id", "Buscar por ID", self.query.id.as_deref(), None))
                    (text_input(
                        "name",
                        "Buscar por nombre",
                        self.query.name.as_deref(),
                        Some(NAME_LIST_ID),
                    ))
                    datalist id=(NAME_LIST_ID) {
                        @for name in &options.names {
                            option value=(name) {}
                        }
                    }
                    (multi_select("type", "Tipo", &options.community_types, &self.query.types))
                    (multi_select(
                        "department",
                        "Departamento",
                        &options.departments,
                        &self.query.departments,
                    ))
                    (multi_select(
                        "municipality",
                        "Municipio",
                        &options.municipalities,
                        &self.query.municipalities,
                    ))
                    label for="basemap" { "Mapa base" }
                    select id="basemap" name="basemap" {
                        @for style in BaseMapStyle::all_styles() {
                            option value=(style.as_str()) selected[*style == self.style] {
                                (style.label())
                            }
                        }
                    }
                    div.actions {
                        button type="submit" { "Mostrar mapa" }
                        a href="/" { "Reiniciar visor" }
                    }
                }
            }
        }
    }

    fn banner(&self) -> Markup {
        html! {
            @match self.records {
                [] => {
                    div.banner.warning { (NO_RESULTS_MESSAGE) }
                }
                [only] => {
                    div.banner.info { "Territorio consultado: " strong { (only.name) } }
                }
                _ => {}
            }
        }
    }

    fn statistics(&self) -> Markup {
        html! {
            section.stats {
                (stat("Territorios", self.summary.count))
                (stat("Área total", self.summary.area_breakdown()))
                (stat("Indígenas", self.summary.indigenous_count))
                (stat("Consejos comunitarios", self.summary.community_council_count))
            }
        }
    }

    fn table(&self) -> Markup {
        html! {
            @if !self.records.is_empty() {
                table {
                    thead {
                        tr {
                            @for header in ["ID", "Nombre", "Tipo", "Departamento", "Municipio", "Área total (ha)"] {
                                th { (header) }
                            }
                        }
                    }
                    tbody {
                        @for record in self.records {
                            tr {
                                td { (record.id.as_str()) }
                                td { (record.name) }
                                td { (record.community_type.label()) }
                                td { (record.department) }
                                td { (record.municipality) }
                                td.num { (format!("{:.2}", record.area_ha)) }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Where the data came from and when it was read.
    fn footer(&self) -> Markup {
        let dataset = self.state.dataset.as_ref();
        let metadata = dataset.metadata();
        let source = Path::new(&metadata.source)
            .file_name()
            .map_or_else(|| metadata.source.clone(), |name| name.to_string_lossy().into_owned());
        html! {
            footer {
                "Fuente: " (source) " · " (dataset.len()) " territorios · cargado "
                time datetime=(metadata.loaded_at.to_rfc3339()) {
                    (metadata.loaded_at.format(LOADED_AT_FORMAT))
                }
            }
        }
    }
}

fn downloads(qs: &str) -> Markup {
    html! {
        p.downloads {
            @for (format, label) in [
                ("csv", "Descargar CSV"),
                ("shapefile", "Descargar Shapefile"),
                ("html", "Descargar mapa HTML"),
            ] {
                a href={ "/v1/export/" (format) "?" (qs) } { (label) }
            }
        }
    }
}

fn text_input(name: &str, label: &str, value: Option<&str>, list: Option<&str>) -> Markup {
    html! {
        label for=(name) { (label) }
        input type="text" id=(name) name=(name) value=(value.unwrap_or_default()) list=[list];
    }
}

fn multi_select(name: &str, label: &str, values: &[String], chosen: &[String]) -> Markup {
    html! {
        label for=(name) { (label) }
        select id=(name) name=(name) multiple {
            @for value in values {
                option value=(value) selected[chosen.contains(value)] { (value) }
            }
        }
    }
}

fn stat(label: &str, value: impl std::fmt::Display) -> Markup {
    html! {
        div { (label) strong { (value) } }
    }
}
