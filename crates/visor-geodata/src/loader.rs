//! # Geodata Loader
//!
//! Turns the territory archive into a [`TerritoryCollection`]. Runs once per
//! process; the result is immutable and shared by every request.

use std::path::Path;

use dbase::encoding::EncodingRs;
use geo::orient::{Direction, Orient};
use geo::GeodesicArea;
use visor_core::area::SQUARE_METRES_PER_HECTARE;
use visor_core::{
    CommunityType, DatasetMetadata, LoadError, TerritoryCollection, TerritoryId, TerritoryRecord,
};

use crate::geometry::shape_to_multipolygon;
use crate::schema::{number_value, text_value, ColumnMap};
use crate::writer::WGS84_PRJ;
use crate::{archive, encoding, projection};

/// Load every territory from a zipped shapefile.
///
/// # Errors
///
/// - [`LoadError::ArchiveMissing`] / [`LoadError::Archive`] when the zip is
///   absent or unreadable.
/// - [`LoadError::MissingComponent`] when `.shp`, `.shx`, or `.dbf` is absent.
/// - [`LoadError::Projection`] when the `.prj` names a projected system that
///   cannot be transformed to WGS84.
/// - [`LoadError::Schema`] when a required column is missing, an id is null,
///   or a shape is not a polygon.
/// - [`LoadError::DuplicateId`] when two records share an id.
pub fn load_archive(path: &Path) -> Result<TerritoryCollection, LoadError> {
    let extracted = archive::extract(path)?;

    let reprojector = match &extracted.projection {
        Some(prj) => projection::reprojector_for(prj)?,
        None => None,
    };

    let encoding = encoding::resolve_encoding(extracted.code_page.as_deref());
    let dbf = dbase::Reader::from_path_with_encoding(
        &extracted.dbf_path,
        EncodingRs::from(encoding),
    )
    .map_err(|e| LoadError::Shapefile(format!("cannot read attribute table: {e}")))?;
    let field_names: Vec<String> = dbf.fields().iter().map(|f| f.name().to_string()).collect();
    let columns = ColumnMap::resolve(field_names.iter().map(String::as_str))?;

    let shapes = shapefile::ShapeReader::from_path(&extracted.shp_path)
        .map_err(|e| LoadError::Shapefile(e.to_string()))?;
    let mut reader = shapefile::Reader::new(shapes, dbf);

    let mut records = Vec::new();
    let mut derived_areas = 0usize;
    for (row, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, attrs) = item.map_err(|e| LoadError::Shapefile(format!("row {row}: {e}")))?;

        let id = text_value(&attrs, &columns.id)
            .and_then(TerritoryId::new)
            .ok_or_else(|| LoadError::Schema(format!("row {row}: {} is null", columns.id)))?;
        let geometry = shape_to_multipolygon(shape)
            .map_err(|e| LoadError::Schema(format!("row {row} ({id}): {e}")))?;
        let geometry = match &reprojector {
            Some(reprojector) => reprojector.to_wgs84(&geometry)?,
            None => geometry,
        };

        let area_ha = match number_value(&attrs, &columns.area) {
            Some(area) => area,
            None => {
                derived_areas += 1;
                tracing::debug!(territory_id = %id, "area column is null; using geodesic area");
                // Shapefile shells are clockwise; geodesic area wants counter-clockwise.
                geometry.orient(Direction::Default).geodesic_area_unsigned()
                    / SQUARE_METRES_PER_HECTARE
            }
        };

        records.push(TerritoryRecord {
            name: text_value(&attrs, &columns.name).unwrap_or_default(),
            community_type: CommunityType::new(
                text_value(&attrs, &columns.community_type).unwrap_or_default(),
            ),
            department: text_value(&attrs, &columns.department).unwrap_or_default(),
            municipality: text_value(&attrs, &columns.municipality).unwrap_or_default(),
            area_ha,
            geometry,
            id,
        });
    }

    let projection = match &reprojector {
        Some(reprojector) => {
            tracing::info!(
                archive = %path.display(),
                epsg = reprojector.epsg(),
                "reprojected coordinates to WGS84"
            );
            Some(WGS84_PRJ.to_string())
        }
        None => extracted.projection.clone(),
    };
    let metadata = DatasetMetadata::new(path.display().to_string(), projection);
    let collection = TerritoryCollection::new(records, metadata)?;

    tracing::info!(
        archive = %path.display(),
        records = collection.len(),
        derived_areas,
        "loaded territory archive"
    );
    Ok(collection)
}
