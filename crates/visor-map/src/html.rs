//! # Standalone HTML
//!
//! Writes a [`MapView`] as a self-contained Leaflet page. The page pulls
//! Leaflet from the unpkg CDN and embeds everything else: the tile layer,
//! the feature collection, and the bounds to fit.
//!
//! All data goes through one JSON object embedded in a `<script>` block.
//! `</` is escaped inside it so a territory name can never close the block.

use maud::{html, PreEscaped, DOCTYPE};
use serde_json::json;

use crate::render::{MapView, TOOLTIP_FIELDS};

/// Leaflet release loaded by generated pages.
pub const LEAFLET_VERSION: &str = "1.9.4";

const PAGE_TITLE: &str = "Mapa de territorios formalizados";

const PAGE_STYLE: &str = "html, body, #map { height: 100%; margin: 0; }";

const MAP_SCRIPT: &str = r#"
const map = L.map("map").setView([view.center.lat, view.center.lng], view.zoom);
L.tileLayer(view.tiles.url, {
  attribution: view.tiles.attribution,
  maxZoom: view.tiles.maxZoom
}).addTo(map);
const escapeHtml = (v) => String(v ?? "").replace(/[&<>"']/g, (c) => (
  { "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#39;" }[c]
));
L.geoJSON(view.features, {
  style: (feature) => feature.properties.style,
  onEachFeature: (feature, layer) => {
    const rows = view.tooltip.map(([key, label]) =>
      "<b>" + escapeHtml(label) + "</b> " + escapeHtml(feature.properties[key]));
    layer.bindTooltip(rows.join("<br>"), { sticky: true });
  }
}).addTo(map);
if (view.bounds) {
  map.fitBounds([[view.bounds.south, view.bounds.west], [view.bounds.north, view.bounds.east]]);
}
"#;

/// Render `view` as a complete HTML document.
pub fn to_html(view: &MapView) -> String {
    let config = json!({
        "center": view.center,
        "zoom": view.zoom,
        "bounds": view.bounds,
        "tiles": {
            "url": view.style.tile_url(),
            "attribution": view.style.attribution(),
            "maxZoom": view.style.max_zoom(),
        },
        "tooltip": TOOLTIP_FIELDS,
        "features": view.feature_collection(),
    });
    let leaflet = format!("https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet");

    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                link rel="stylesheet" href={ (leaflet) ".css" };
                script src={ (leaflet) ".js" } {}
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div #map {}
                script {
                    (PreEscaped(format!("const view = {};\n{MAP_SCRIPT}", script_safe_json(&config))))
                }
            }
        }
    }
    .into_string()
}

/// Serialize JSON for inclusion in a `<script>` element.
fn script_safe_json(value: &serde_json::Value) -> String {
    value
        .to_string()
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

#[cfg(test)]
mod tests {
    use super::*;
    use visor_core::BaseMapStyle;

    #[test]
    fn empty_view_is_a_complete_document() {
        let html = to_html(&MapView::empty(BaseMapStyle::CartoDarkMatter));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Mapa de territorios formalizados</title>"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains(BaseMapStyle::CartoDarkMatter.tile_url()));
        assert!(html.contains("\"bounds\":null"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn script_json_cannot_close_the_block() {
        let value = json!({ "name": "</script><script>alert(1)</script>" });
        let safe = script_safe_json(&value);
        assert!(!safe.contains("</script>"));
        assert!(safe.contains("<\\/script>"));
    }

    #[test]
    fn leaflet_assets_are_linked_once() {
        let html = to_html(&MapView::empty(BaseMapStyle::default()));
        assert!(html.contains(r#"<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">"#));
        assert!(html.contains(r#"<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>"#));
        assert_eq!(html.matches("<script").count(), 2);
    }

    #[test]
    fn tooltip_labels_are_embedded() {
        let html = to_html(&MapView::empty(BaseMapStyle::default()));
        for (_, label) in TOOLTIP_FIELDS {
            assert!(html.contains(label), "missing {label}");
        }
    }
}
