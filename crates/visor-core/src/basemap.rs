//! # Base-Map Styles
//!
//! Defines the six tile layers a user can put under the territories. Every
//! `match` on [`BaseMapStyle`] is exhaustive, so adding a style forces the
//! tile URL, attribution, label, and slug to be provided together.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Tile layer rendered under the territory overlays.
///
/// | Slug          | Label                          |
/// |---------------|--------------------------------|
/// | `osm`         | OpenStreetMap                  |
/// | `positron`    | CartoDB Claro (Positron)       |
/// | `dark-matter` | CartoDB Oscuro                 |
/// | `satellite`   | Satélite (Esri)                |
/// | `gray-canvas` | Gris claro (Esri Gray Canvas)  |
/// | `topo`        | Topográfico (OpenTopoMap)      |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseMapStyle {
    /// Standard OpenStreetMap tiles.
    #[serde(rename = "osm")]
    OpenStreetMap,
    /// CARTO light basemap.
    #[default]
    #[serde(rename = "positron")]
    CartoPositron,
    /// CARTO dark basemap.
    #[serde(rename = "dark-matter")]
    CartoDarkMatter,
    /// Esri World Imagery (satellite).
    #[serde(rename = "satellite")]
    EsriImagery,
    /// Esri World Light Gray Canvas.
    #[serde(rename = "gray-canvas")]
    EsriGrayCanvas,
    /// OpenTopoMap terrain tiles.
    #[serde(rename = "topo")]
    OpenTopoMap,
}

/// Total number of base-map styles.
pub const BASE_MAP_STYLE_COUNT: usize = 6;

impl BaseMapStyle {
    /// All styles in selector order.
    pub fn all_styles() -> &'static [BaseMapStyle] {
        &[
            Self::OpenStreetMap,
            Self::CartoPositron,
            Self::CartoDarkMatter,
            Self::EsriImagery,
            Self::EsriGrayCanvas,
            Self::OpenTopoMap,
        ]
    }

    /// Stable slug used in query strings, config files, and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "osm",
            Self::CartoPositron => "positron",
            Self::CartoDarkMatter => "dark-matter",
            Self::EsriImagery => "satellite",
            Self::EsriGrayCanvas => "gray-canvas",
            Self::OpenTopoMap => "topo",
        }
    }

    /// Human-readable label shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::CartoPositron => "CartoDB Claro (Positron)",
            Self::CartoDarkMatter => "CartoDB Oscuro",
            Self::EsriImagery => "Satélite (Esri)",
            Self::EsriGrayCanvas => "Gris claro (Esri Gray Canvas)",
            Self::OpenTopoMap => "Topográfico (OpenTopoMap)",
        }
    }

    /// Leaflet tile URL template.
    pub fn tile_url(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            Self::CartoPositron => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            Self::CartoDarkMatter => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
            Self::EsriImagery => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            Self::EsriGrayCanvas => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/Canvas/World_Light_Gray_Base/MapServer/tile/{z}/{y}/{x}"
            }
            Self::OpenTopoMap => "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        }
    }

    /// Attribution HTML required by the tile provider.
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            Self::CartoPositron | Self::CartoDarkMatter => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
            }
            Self::EsriImagery => {
                "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community"
            }
            Self::EsriGrayCanvas => "Tiles &copy; Esri &mdash; Esri, DeLorme, NAVTEQ",
            Self::OpenTopoMap => {
                "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, SRTM | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (CC-BY-SA)"
            }
        }
    }

    /// Highest zoom level the provider serves.
    pub fn max_zoom(&self) -> u8 {
        match self {
            Self::OpenStreetMap => 19,
            Self::CartoPositron | Self::CartoDarkMatter => 20,
            Self::EsriImagery => 18,
            Self::EsriGrayCanvas => 16,
            Self::OpenTopoMap => 17,
        }
    }
}

impl std::fmt::Display for BaseMapStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseMapStyle {
    type Err = ConfigError;

    /// Parse a style from its slug (case-insensitive, surrounding spaces ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_ascii_lowercase();
        Self::all_styles()
            .iter()
            .copied()
            .find(|style| style.as_str() == slug)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "basemap".to_string(),
                value: s.to_string(),
                reason: format!(
                    "expected one of {}",
                    Self::all_styles()
                        .iter()
                        .map(BaseMapStyle::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}
