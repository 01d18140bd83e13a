//! # Geometry Conversion
//!
//! Converts between shapefile polygon shapes and `geo` multipolygons.
//!
//! Shapefiles store a flat ring list where orientation marks outer
//! (clockwise) and inner (counter-clockwise) rings. Each outer ring opens a
//! new polygon; inner rings attach to the most recent outer ring.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{Point, PolygonRing, Shape};
use visor_core::LoadError;

/// Convert a shape into a multipolygon.
///
/// Null shapes become an empty multipolygon; Z and M values are dropped.
///
/// # Errors
///
/// [`LoadError::Schema`] for point, line, and multipatch shapes.
pub fn shape_to_multipolygon(shape: Shape) -> Result<MultiPolygon<f64>, LoadError> {
    match shape {
        Shape::NullShape => Ok(MultiPolygon::new(Vec::new())),
        Shape::Polygon(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolygonM(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolygonZ(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        other => Err(LoadError::Schema(format!(
            "expected polygon shapes, found {:?}",
            other.shapetype()
        ))),
    }
}

fn rings_to_multipolygon<P, F>(rings: &[PolygonRing<P>], xy: F) -> MultiPolygon<f64>
where
    F: Fn(&P) -> Coord<f64>,
{
    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    for ring in rings {
        let line: LineString<f64> = ring.points().iter().map(&xy).collect();
        match ring {
            PolygonRing::Outer(_) => polygons.push(Polygon::new(line, Vec::new())),
            PolygonRing::Inner(_) => match polygons.last_mut() {
                Some(polygon) => polygon.interiors_push(line),
                // A hole with no preceding shell: keep the area rather than drop it.
                None => polygons.push(Polygon::new(line, Vec::new())),
            },
        }
    }
    MultiPolygon::new(polygons)
}

/// Convert a multipolygon into a shapefile polygon.
///
/// Returns `None` when the multipolygon has no rings with points, since a
/// polygon shape cannot be empty.
pub fn multipolygon_to_shape(geometry: &MultiPolygon<f64>) -> Option<shapefile::Polygon> {
    let to_points = |line: &LineString<f64>| -> Vec<Point> {
        line.coords().map(|c| Point::new(c.x, c.y)).collect()
    };

    let mut rings: Vec<PolygonRing<Point>> = Vec::new();
    for polygon in geometry.iter() {
        if polygon.exterior().0.is_empty() {
            continue;
        }
        rings.push(PolygonRing::Outer(to_points(polygon.exterior())));
        for interior in polygon.interiors() {
            if !interior.0.is_empty() {
                rings.push(PolygonRing::Inner(to_points(interior)));
            }
        }
    }

    if rings.is_empty() {
        None
    } else {
        Some(shapefile::Polygon::with_rings(rings))
    }
}
