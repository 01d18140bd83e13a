//! # Shapefile Writer
//!
//! Writes territory records as a shapefile and packages the component files
//! into a zip. The column layout mirrors [`crate::REQUIRED_COLUMNS`], so a
//! written package loads back through [`crate::load_archive`].

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use visor_core::{ExportError, TerritoryRecord};

use crate::geometry::multipolygon_to_shape;
use crate::schema::{
    AREA_COLUMN, DEPARTMENT_COLUMN, ID_COLUMN, MUNICIPALITY_COLUMN, NAME_COLUMN, TYPE_COLUMN,
};

/// WKT for geographic WGS84, written when the source had no `.prj`.
pub const WGS84_PRJ: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]]";

/// Width of every text column. 254 is the DBF maximum.
const TEXT_FIELD_LENGTH: u8 = 254;
/// Width and precision of the area column.
const AREA_FIELD_LENGTH: u8 = 19;
const AREA_FIELD_DECIMALS: u8 = 8;

/// Component extensions in the order they are packaged.
const PACKAGE_EXTENSIONS: [&str; 5] = ["shp", "shx", "dbf", "prj", "cpg"];

fn field_name(name: &str) -> Result<FieldName, ExportError> {
    FieldName::try_from(name).map_err(|e| ExportError::FieldName(format!("{name}: {e:?}")))
}

fn table_builder() -> Result<TableWriterBuilder, ExportError> {
    Ok(TableWriterBuilder::new()
        .add_character_field(field_name(ID_COLUMN)?, TEXT_FIELD_LENGTH)
        .add_character_field(field_name(NAME_COLUMN)?, TEXT_FIELD_LENGTH)
        .add_character_field(field_name(TYPE_COLUMN)?, TEXT_FIELD_LENGTH)
        .add_character_field(field_name(DEPARTMENT_COLUMN)?, TEXT_FIELD_LENGTH)
        .add_character_field(field_name(MUNICIPALITY_COLUMN)?, TEXT_FIELD_LENGTH)
        .add_numeric_field(field_name(AREA_COLUMN)?, AREA_FIELD_LENGTH, AREA_FIELD_DECIMALS))
}

fn to_dbase_record(record: &TerritoryRecord) -> Record {
    let text = |s: &str| FieldValue::Character(Some(s.to_string()));
    let mut row = Record::default();
    row.insert(ID_COLUMN.to_string(), text(record.id.as_str()));
    row.insert(NAME_COLUMN.to_string(), text(&record.name));
    row.insert(TYPE_COLUMN.to_string(), text(record.community_type.label()));
    row.insert(DEPARTMENT_COLUMN.to_string(), text(&record.department));
    row.insert(MUNICIPALITY_COLUMN.to_string(), text(&record.municipality));
    row.insert(AREA_COLUMN.to_string(), FieldValue::Numeric(Some(record.area_ha)));
    row
}

/// Write `records` as `<dir>/<stem>.shp/.shx/.dbf/.prj/.cpg`.
///
/// Records without a polygon cannot be represented in a polygon shapefile
/// and are left out with a warning. Returns the number of records written.
pub fn write_shapefile<'a, I>(
    dir: &Path,
    stem: &str,
    records: I,
    projection: Option<&str>,
) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a TerritoryRecord>,
{
    let shp_path = dir.join(format!("{stem}.shp"));
    let mut writer = shapefile::Writer::from_path(&shp_path, table_builder()?)
        .map_err(|e| ExportError::Shapefile(e.to_string()))?;

    let mut written = 0usize;
    for record in records {
        let Some(shape) = multipolygon_to_shape(&record.geometry) else {
            tracing::warn!(territory_id = %record.id, "record has no geometry; left out of shapefile");
            continue;
        };
        writer
            .write_shape_and_record(&shape, &to_dbase_record(record))
            .map_err(|e| ExportError::Shapefile(format!("{}: {e}", record.id)))?;
        written += 1;
    }
    // Headers are finalized on drop.
    drop(writer);

    std::fs::write(
        dir.join(format!("{stem}.prj")),
        projection.unwrap_or(WGS84_PRJ),
    )?;
    std::fs::write(dir.join(format!("{stem}.cpg")), "UTF-8")?;
    Ok(written)
}

/// Write `records` as a shapefile and return a zip holding its components.
pub fn write_package<'a, I>(
    stem: &str,
    records: I,
    projection: Option<&str>,
) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a TerritoryRecord>,
{
    let dir = tempfile::tempdir()?;
    let written = write_shapefile(dir.path(), stem, records, projection)?;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for ext in PACKAGE_EXTENSIONS {
        let path: PathBuf = dir.path().join(format!("{stem}.{ext}"));
        if !path.exists() {
            continue;
        }
        let bytes = std::fs::read(&path)?;
        zip.start_file(format!("{stem}.{ext}"), options)
            .map_err(|e| ExportError::Zip(e.to_string()))?;
        zip.write_all(&bytes)?;
    }
    let cursor = zip.finish().map_err(|e| ExportError::Zip(e.to_string()))?;

    tracing::debug!(stem, records = written, "packaged shapefile");
    Ok(cursor.into_inner())
}
