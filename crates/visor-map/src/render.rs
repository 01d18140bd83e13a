//! # Map Rendering
//!
//! Builds a [`MapView`] from a subset: overlays, bounds, centre, and zoom.
//!
//! ## Styling
//!
//! Indigenous territories are drawn in forest green (`#228B22`), everything
//! else in saddle brown (`#8B4513`). Both use a 2 px stroke and 50 % fill.
//!
//! ## Skipped records
//!
//! A record is skipped, with a [`RenderError`] and a `warn` event, when its
//! multipolygon has no points or any coordinate is NaN or infinite. The
//! remaining records still render.

use geo::BoundingRect;
use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use visor_core::{BaseMapStyle, CommunityKind, RenderError, TerritoryRecord};
use visor_query::Subset;

/// Stroke and fill colour of indigenous territories.
pub const INDIGENOUS_COLOR: &str = "#228B22";
/// Stroke and fill colour of every other territory.
pub const COUNCIL_COLOR: &str = "#8B4513";
/// Initial zoom before the map is fitted to the overlays.
pub const DEFAULT_ZOOM: u8 = 10;
/// Zoom of a map with nothing to show.
pub const EMPTY_MAP_ZOOM: u8 = 5;
/// Centre of a map with nothing to show (Colombia).
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 4.5709,
    lng: -74.2973,
};

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// South-west / north-east corners of a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Midpoint of the box.
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }
}

/// Leaflet path options for one overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub weight: u8,
    pub fill_opacity: f64,
}

impl OverlayStyle {
    /// Style for a territory of the given kind.
    pub fn for_kind(kind: CommunityKind) -> Self {
        let color = match kind {
            CommunityKind::Indigenous => INDIGENOUS_COLOR,
            CommunityKind::CommunityCouncil | CommunityKind::Other => COUNCIL_COLOR,
        };
        Self {
            color,
            fill_color: color,
            weight: 2,
            fill_opacity: 0.5,
        }
    }
}

/// One territory drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Identifier of the drawn record.
    pub territory_id: String,
    /// Geometry plus the six attributes as properties.
    pub feature: geojson::Feature,
    pub style: OverlayStyle,
    pub bounds: LatLngBounds,
}

/// Everything needed to draw the map for one subset.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub style: BaseMapStyle,
    pub center: LatLng,
    pub zoom: u8,
    /// Box to fit after the initial zoom; `None` when nothing is plotted.
    pub bounds: Option<LatLngBounds>,
    pub overlays: Vec<Overlay>,
    /// Records that could not be drawn.
    pub skipped: Vec<RenderError>,
}

impl MapView {
    /// A map centred on Colombia with no overlays.
    pub fn empty(style: BaseMapStyle) -> Self {
        Self {
            style,
            center: DEFAULT_CENTER,
            zoom: EMPTY_MAP_ZOOM,
            bounds: None,
            overlays: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// The overlays as a GeoJSON feature collection, style embedded in each
    /// feature's `style` property.
    pub fn feature_collection(&self) -> geojson::FeatureCollection {
        let features = self
            .overlays
            .iter()
            .map(|overlay| {
                let mut feature = overlay.feature.clone();
                if let Ok(style) = serde_json::to_value(&overlay.style) {
                    feature.set_property("style", style);
                }
                feature
            })
            .collect();
        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// Render `subset` over the `style` base map.
pub fn render(subset: &Subset<'_>, style: BaseMapStyle) -> MapView {
    let mut overlays = Vec::with_capacity(subset.len());
    let mut skipped = Vec::new();

    for record in subset.iter() {
        match overlay_for(record) {
            Ok(overlay) => overlays.push(overlay),
            Err(err) => {
                tracing::warn!(territory_id = %record.id, error = %err, "territory skipped on map");
                skipped.push(err);
            }
        }
    }

    let bounds = overlays
        .iter()
        .map(|o| o.bounds)
        .reduce(LatLngBounds::union);

    let mut view = match bounds {
        Some(bounds) => MapView {
            style,
            center: bounds.center(),
            zoom: DEFAULT_ZOOM,
            bounds: Some(bounds),
            overlays,
            skipped: Vec::new(),
        },
        None => MapView::empty(style),
    };
    view.skipped = skipped;

    tracing::debug!(
        overlays = view.overlays.len(),
        skipped = view.skipped.len(),
        basemap = %style,
        "map rendered"
    );
    view
}

fn overlay_for(record: &TerritoryRecord) -> Result<Overlay, RenderError> {
    let territory_id = record.id.to_string();
    let geometry = &record.geometry;

    let mut points = 0usize;
    let mut finite = true;
    for polygon in geometry.iter() {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            for c in ring.coords() {
                points += 1;
                finite &= c.x.is_finite() && c.y.is_finite();
            }
        }
    }
    if points == 0 {
        return Err(RenderError::EmptyGeometry { territory_id });
    }
    if !finite {
        return Err(RenderError::NonFiniteCoordinate { territory_id });
    }

    let rect = geometry
        .bounding_rect()
        .ok_or_else(|| RenderError::EmptyGeometry {
            territory_id: territory_id.clone(),
        })?;
    let bounds = LatLngBounds {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    };

    let feature = geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
        id: Some(geojson::feature::Id::String(territory_id.clone())),
        properties: Some(properties(record)),
        foreign_members: None,
    };

    Ok(Overlay {
        territory_id,
        feature,
        style: OverlayStyle::for_kind(record.community_type.kind()),
        bounds,
    })
}

/// Property keys shown in the hover tooltip, with their labels.
pub(crate) const TOOLTIP_FIELDS: [(&str, &str); 6] = [
    ("ID_ANT", "ID:"),
    ("NOMBRE", "Nombre:"),
    ("DEPARTAMEN", "Departamento:"),
    ("MUNICIPIO", "Municipio:"),
    ("Tipo", "Tipo:"),
    ("AREA_TOTAL", "Área total (ha):"),
];

fn properties(record: &TerritoryRecord) -> Map<String, JsonValue> {
    let mut props = Map::new();
    props.insert("ID_ANT".into(), json!(record.id.as_str()));
    props.insert("NOMBRE".into(), json!(record.name));
    props.insert("DEPARTAMEN".into(), json!(record.department));
    props.insert("MUNICIPIO".into(), json!(record.municipality));
    props.insert("Tipo".into(), json!(record.community_type.label()));
    props.insert("AREA_TOTAL".into(), json!(record.area_ha));
    props
}
