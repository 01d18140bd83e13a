//! # Reprojection to WGS84
//!
//! The map, the bounds, and the geodesic area all expect longitude and
//! latitude in degrees. A `.prj` describing a projected system is resolved
//! to an EPSG code and every coordinate is transformed at load time.
//!
//! The code comes from the `AUTHORITY["EPSG", ...]` (or WKT2 `ID[...]`) that
//! is a direct child of the `PROJCS` node. ESRI-style `.prj` files carry no
//! authority, so their `PROJCS` name is looked up in a table of the systems
//! used for Colombian land data. Geographic systems (`GEOGCS`) are read as
//! degrees unchanged.

use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::proj::Proj;
use visor_core::LoadError;

/// Target system: geographic WGS84.
const WGS84_PROJ_STRING: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// ESRI `PROJCS` names and their EPSG codes.
const ESRI_PROJCS_CODES: [(&str, u16); 14] = [
    ("MAGNA_Colombia_Oeste_Oeste", 3114),
    ("MAGNA_Colombia_Oeste", 3115),
    ("MAGNA_Colombia_Bogota", 3116),
    ("MAGNA_Colombia_Este_Central", 3117),
    ("MAGNA_Colombia_Este", 3118),
    ("MAGNA_SIRGAS_Origen_Nacional", 9377),
    ("MAGNA_SIRGAS_CMT12", 9377),
    ("Colombia_Bogota_Zone", 21897),
    ("WGS_1984_Web_Mercator_Auxiliary_Sphere", 3857),
    ("WGS_1984_UTM_Zone_17N", 32617),
    ("WGS_1984_UTM_Zone_18N", 32618),
    ("WGS_1984_UTM_Zone_19N", 32619),
    ("WGS_1984_UTM_Zone_18S", 32718),
    ("WGS_1984_UTM_Zone_19S", 32719),
];

/// Coordinate system of a `.prj`, as far as loading is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCrs {
    /// Longitude and latitude in degrees.
    Geographic,
    /// A projected system with this EPSG code.
    Projected(u16),
}

/// Classify the WKT of a `.prj` component.
///
/// # Errors
///
/// [`LoadError::Projection`] for a projected system that cannot be
/// identified, or WKT that is neither geographic nor projected.
pub fn classify(wkt: &str) -> Result<SourceCrs, LoadError> {
    let wkt = wkt.trim();
    let keyword = wkt.split('[').next().unwrap_or_default().trim();
    match keyword.to_ascii_uppercase().as_str() {
        "GEOGCS" | "GEOGCRS" | "GEODCRS" => Ok(SourceCrs::Geographic),
        "PROJCS" | "PROJCRS" => child_epsg_code(wkt)
            .or_else(|| node_name(wkt).and_then(esri_code))
            .map(SourceCrs::Projected)
            .ok_or_else(|| {
                LoadError::Projection(format!(
                    "unrecognized projected coordinate system {:?}",
                    node_name(wkt).unwrap_or(keyword)
                ))
            }),
        _ => Err(LoadError::Projection(format!(
            "unsupported coordinate system definition {keyword:?}"
        ))),
    }
}

/// The quoted name that opens a WKT node.
fn node_name(wkt: &str) -> Option<&str> {
    let start = wkt.find('"')? + 1;
    let len = wkt[start..].find('"')?;
    Some(&wkt[start..start + len])
}

fn esri_code(name: &str) -> Option<u16> {
    let normalized: String = name
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect();
    ESRI_PROJCS_CODES
        .iter()
        .find(|(esri, _)| esri.eq_ignore_ascii_case(&normalized))
        .map(|(_, code)| *code)
}

/// EPSG code of an `AUTHORITY[...]` or `ID[...]` directly under the root node.
fn child_epsg_code(wkt: &str) -> Option<u16> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    for (i, c) in wkt.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 1 => {
                if let Some(code) = epsg_from_node(wkt[i + 1..].trim_start()) {
                    return Some(code);
                }
            }
            _ => {}
        }
    }
    None
}

fn epsg_from_node(node: &str) -> Option<u16> {
    let open = node.find('[')?;
    let keyword = &node[..open];
    if !keyword.eq_ignore_ascii_case("AUTHORITY") && !keyword.eq_ignore_ascii_case("ID") {
        return None;
    }
    let body = &node[open + 1..open + node[open..].find(']')?];
    let mut parts = body.split(',').map(|p| p.trim().trim_matches('"'));
    let authority = parts.next()?;
    let code = parts.next()?;
    if authority.eq_ignore_ascii_case("EPSG") {
        code.parse().ok()
    } else {
        None
    }
}

/// Transforms coordinates from one EPSG system to WGS84 degrees.
pub struct Reprojector {
    epsg: u16,
    source: Proj,
    target: Proj,
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector").field("epsg", &self.epsg).finish()
    }
}

impl Reprojector {
    /// Build a reprojector for `EPSG:<epsg>`.
    ///
    /// # Errors
    ///
    /// [`LoadError::Projection`] when the code is unknown or its definition
    /// is not supported by the projection library.
    pub fn from_epsg(epsg: u16) -> Result<Self, LoadError> {
        let def = crs_definitions::from_code(epsg).ok_or_else(|| {
            LoadError::Projection(format!("EPSG:{epsg} is not a known coordinate system"))
        })?;
        let source = Proj::from_proj_string(def.proj4)
            .map_err(|e| LoadError::Projection(format!("EPSG:{epsg}: {e}")))?;
        let target = Proj::from_proj_string(WGS84_PROJ_STRING)
            .map_err(|e| LoadError::Projection(format!("WGS84: {e}")))?;
        Ok(Self {
            epsg,
            source,
            target,
        })
    }

    /// The source system's EPSG code.
    pub fn epsg(&self) -> u16 {
        self.epsg
    }

    /// Transform a multipolygon to longitude and latitude in degrees.
    pub fn to_wgs84(&self, geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>, LoadError> {
        geometry.try_map_coords(|c| self.transform(c))
    }

    fn transform(&self, c: Coord<f64>) -> Result<Coord<f64>, LoadError> {
        let mut point = (c.x, c.y, 0.0);
        proj4rs::transform::transform(&self.source, &self.target, &mut point).map_err(|e| {
            LoadError::Projection(format!("EPSG:{} ({}, {}): {e}", self.epsg, c.x, c.y))
        })?;
        // Geographic output is in radians.
        Ok(Coord {
            x: point.0.to_degrees(),
            y: point.1.to_degrees(),
        })
    }
}

/// The reprojector a `.prj` calls for, or `None` for geographic data.
pub fn reprojector_for(wkt: &str) -> Result<Option<Reprojector>, LoadError> {
    match classify(wkt)? {
        SourceCrs::Geographic => Ok(None),
        SourceCrs::Projected(epsg) => Reprojector::from_epsg(epsg).map(Some),
    }
}
