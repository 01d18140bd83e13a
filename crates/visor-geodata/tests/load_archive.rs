//! # Loader and Writer Integration Tests
//!
//! Builds real zipped shapefiles in temporary directories and reads them back
//! through `load_archive`, covering the happy path, every `LoadError` the
//! loader can raise, code pages, reprojection, and the shapefile package
//! round trip.

use std::io::Write;
use std::path::{Path, PathBuf};

use geo::{polygon, Area, BoundingRect, Intersects, MultiPolygon, Rect};
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use visor_core::{CommunityKind, CommunityType, LoadError, TerritoryId, TerritoryRecord};
use visor_geodata::{load_archive, write_package, WGS84_PRJ};

fn rectangle(x: f64, y: f64, w: f64, h: f64) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon![
        (x: x, y: y),
        (x: x + w, y: y),
        (x: x + w, y: y + h),
        (x: x, y: y + h),
        (x: x, y: y),
    ]])
}

fn territory(id: &str, name: &str, kind: &str, dept: &str, area: f64) -> TerritoryRecord {
    TerritoryRecord {
        id: TerritoryId::new(id).unwrap(),
        name: name.to_string(),
        community_type: CommunityType::new(kind),
        department: dept.to_string(),
        municipality: "Quibdó".to_string(),
        area_ha: area,
        geometry: rectangle(-76.7, 5.6, 0.1, 0.05),
    }
}

fn write_zip(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Zip every file in `src` whose stem is `stem`, keeping only the listed extensions.
fn zip_components(src: &Path, stem: &str, exts: &[&str]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for ext in exts {
        let bytes = std::fs::read(src.join(format!("{stem}.{ext}"))).unwrap();
        zip.start_file(format!("data/{stem}.{ext}"), options).unwrap();
        zip.write_all(&bytes).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Write a shapefile with an arbitrary attribute layout.
fn write_custom_shapefile(dir: &Path, stem: &str, fields: &[&str], rows: Vec<Vec<FieldValue>>) {
    let mut builder = TableWriterBuilder::new();
    for field in fields {
        builder = if *field == "AREA_TOTAL" {
            builder.add_numeric_field(FieldName::try_from(*field).unwrap(), 19, 8)
        } else {
            builder.add_character_field(FieldName::try_from(*field).unwrap(), 100)
        };
    }
    let mut writer = shapefile::Writer::from_path(dir.join(format!("{stem}.shp")), builder).unwrap();
    for (i, values) in rows.into_iter().enumerate() {
        let mut record = Record::default();
        for (field, value) in fields.iter().zip(values) {
            record.insert(field.to_string(), value);
        }
        let offset = i as f64;
        let shape = shapefile::Polygon::new(shapefile::PolygonRing::Outer(vec![
            shapefile::Point::new(offset, 0.0),
            shapefile::Point::new(offset, 1.0),
            shapefile::Point::new(offset + 1.0, 1.0),
            shapefile::Point::new(offset + 1.0, 0.0),
            shapefile::Point::new(offset, 0.0),
        ]));
        writer.write_shape_and_record(&shape, &record).unwrap();
    }
}

fn text(s: &str) -> FieldValue {
    FieldValue::Character(Some(s.to_string()))
}

#[test]
fn loads_package_written_by_writer() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        territory("RI-1", "Resguardo Alto Andágueda", "Comunidad Indígena", "Chocó", 10.0),
        territory("CC-2", "Consejo Mayor del Atrato", "Consejo Comunitario", "Chocó", 20.0),
    ];
    let bytes = write_package("shapefile_filtrado", &records, None).unwrap();
    let path = write_zip(dir.path(), "Formalizado.zip", &bytes);

    let collection = load_archive(&path).unwrap();
    assert_eq!(collection.len(), 2);

    let first = &collection.records()[0];
    assert_eq!(first.id.as_str(), "RI-1");
    assert_eq!(first.name, "Resguardo Alto Andágueda");
    assert_eq!(first.community_type.kind(), CommunityKind::Indigenous);
    assert_eq!(first.department, "Chocó");
    assert_eq!(first.municipality, "Quibdó");
    assert!((first.area_ha - 10.0).abs() < 1e-6);

    assert_eq!(
        collection.records()[1].community_type.kind(),
        CommunityKind::CommunityCouncil
    );
    assert_eq!(collection.metadata().projection.as_deref(), Some(WGS84_PRJ));
}

#[test]
fn shapefile_round_trip_preserves_attributes_and_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let mut with_hole = rectangle(-74.0, 4.0, 1.0, 1.0);
    with_hole.0[0].interiors_push(
        rectangle(-73.8, 4.2, 0.2, 0.2).0[0].exterior().clone(),
    );
    let mut records = vec![
        territory("1001", "Nasa Kiwe", "Comunidad Indígena", "Cauca", 1234.56789),
        territory("1002", "La Larga Tumaradó", "Consejo Comunitario", "Chocó", 0.5),
    ];
    records[0].geometry = with_hole;

    let bytes = write_package("roundtrip", &records, Some(WGS84_PRJ)).unwrap();
    let path = write_zip(dir.path(), "roundtrip.zip", &bytes);
    let reloaded = load_archive(&path).unwrap();

    assert_eq!(reloaded.len(), records.len());
    for (original, back) in records.iter().zip(reloaded.records()) {
        assert_eq!(original.id, back.id);
        assert_eq!(original.name, back.name);
        assert_eq!(original.community_type, back.community_type);
        assert_eq!(original.department, back.department);
        assert_eq!(original.municipality, back.municipality);
        assert!((original.area_ha - back.area_ha).abs() < 1e-6);

        assert_eq!(original.geometry.0.len(), back.geometry.0.len());
        assert!((original.geometry.unsigned_area() - back.geometry.unsigned_area()).abs() < 1e-9);
        let a = original.geometry.bounding_rect().unwrap();
        let b = back.geometry.bounding_rect().unwrap();
        assert!((a.min().x - b.min().x).abs() < 1e-9);
        assert!((a.max().y - b.max().y).abs() < 1e-9);
    }
    assert_eq!(reloaded.records()[0].geometry.0[0].interiors().len(), 1);
}

#[test]
fn package_contains_all_components() {
    let records = vec![territory("1", "A", "Consejo Comunitario", "Chocó", 1.0)];
    let bytes = write_package("shapefile_filtrado", &records, None).unwrap();
    let zip = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "shapefile_filtrado.cpg",
            "shapefile_filtrado.dbf",
            "shapefile_filtrado.prj",
            "shapefile_filtrado.shp",
            "shapefile_filtrado.shx",
        ]
    );
}

#[test]
fn missing_archive_is_load_error() {
    let err = load_archive(Path::new("/definitely/not/here/Formalizado.zip")).unwrap_err();
    assert!(matches!(err, LoadError::ArchiveMissing(_)));
}

#[test]
fn corrupt_archive_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_zip(dir.path(), "broken.zip", b"PK\x03\x04 truncated garbage");
    assert!(matches!(load_archive(&path).unwrap_err(), LoadError::Archive(_)));
}

#[test]
fn archive_without_dbf_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![territory("1", "A", "Consejo Comunitario", "Chocó", 1.0)];
    visor_geodata::write_shapefile(dir.path(), "layer", &records, None).unwrap();
    let bytes = zip_components(dir.path(), "layer", &["shp", "shx"]);
    let path = write_zip(dir.path(), "no_dbf.zip", &bytes);

    let err = load_archive(&path).unwrap_err();
    assert!(matches!(err, LoadError::MissingComponent(ext) if ext == "dbf"));
}

#[test]
fn schema_mismatch_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    write_custom_shapefile(
        dir.path(),
        "layer",
        &["ID_ANT", "NOMBRE"],
        vec![vec![text("1"), text("Sin columnas")]],
    );
    let bytes = zip_components(dir.path(), "layer", &["shp", "shx", "dbf"]);
    let path = write_zip(dir.path(), "schema.zip", &bytes);

    match load_archive(&path).unwrap_err() {
        LoadError::Schema(msg) => {
            assert!(msg.contains("Tipo"));
            assert!(msg.contains("AREA_TOTAL"));
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_are_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        territory("7", "Uno", "Consejo Comunitario", "Chocó", 1.0),
        territory("7", "Otro", "Consejo Comunitario", "Chocó", 2.0),
    ];
    let bytes = write_package("dup", &records, None).unwrap();
    let path = write_zip(dir.path(), "dup.zip", &bytes);
    assert!(matches!(load_archive(&path).unwrap_err(), LoadError::DuplicateId(id) if id == "7"));
}

#[test]
fn null_id_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let fields = ["ID_ANT", "NOMBRE", "Tipo", "DEPARTAMEN", "MUNICIPIO", "AREA_TOTAL"];
    write_custom_shapefile(
        dir.path(),
        "layer",
        &fields,
        vec![vec![
            FieldValue::Character(None),
            text("Sin id"),
            text("Consejo Comunitario"),
            text("Chocó"),
            text("Quibdó"),
            FieldValue::Numeric(Some(1.0)),
        ]],
    );
    let bytes = zip_components(dir.path(), "layer", &["shp", "shx", "dbf"]);
    let path = write_zip(dir.path(), "null_id.zip", &bytes);
    assert!(matches!(load_archive(&path).unwrap_err(), LoadError::Schema(_)));
}

#[test]
fn null_area_falls_back_to_geodesic_area() {
    let dir = tempfile::tempdir().unwrap();
    let fields = ["ID_ANT", "NOMBRE", "Tipo", "DEPARTAMEN", "MUNICIPIO", "AREA_TOTAL"];
    write_custom_shapefile(
        dir.path(),
        "layer",
        &fields,
        vec![vec![
            text("55"),
            text("Sin área"),
            text("Comunidad Indígena"),
            text("Amazonas"),
            text("Leticia"),
            FieldValue::Numeric(None),
        ]],
    );
    let bytes = zip_components(dir.path(), "layer", &["shp", "shx", "dbf"]);
    let path = write_zip(dir.path(), "null_area.zip", &bytes);

    let collection = load_archive(&path).unwrap();
    let record = &collection.records()[0];
    // A 1°×1° cell at the equator is roughly 1.23 million hectares.
    assert!(record.area_ha > 1.0e6 && record.area_ha < 1.3e6, "{}", record.area_ha);
    assert!(collection.metadata().projection.is_none());
}

#[test]
fn empty_package_loads_as_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = write_package("empty", std::iter::empty(), None).unwrap();
    let path = write_zip(dir.path(), "empty.zip", &bytes);
    assert!(load_archive(&path).unwrap().is_empty());
}

// -- Code pages ---------------------------------------------------------------

/// Re-encode the UTF-8 "ó" in the DBF records as Latin-1, keeping field widths.
fn recode_dbf_as_latin1(dbf: &Path) {
    let mut bytes = std::fs::read(dbf).unwrap();
    let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
    let mut i = header_len;
    while i + 1 < bytes.len() {
        if bytes[i] == 0xC3 && bytes[i + 1] == 0xB3 {
            bytes[i] = 0xF3;
            bytes[i + 1] = b' ';
        }
        i += 1;
    }
    std::fs::write(dbf, bytes).unwrap();
}

#[test]
fn latin1_code_page_decodes_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![territory("9", "Tanela", "Consejo Comunitario", "Chocó", 3.0)];
    visor_geodata::write_shapefile(dir.path(), "layer", &records, None).unwrap();
    recode_dbf_as_latin1(&dir.path().join("layer.dbf"));
    std::fs::write(dir.path().join("layer.cpg"), "ISO-8859-1").unwrap();
    let bytes = zip_components(dir.path(), "layer", &["shp", "shx", "dbf", "cpg"]);
    let path = write_zip(dir.path(), "latin1.zip", &bytes);

    let collection = load_archive(&path).unwrap();
    let record = &collection.records()[0];
    assert_eq!(record.department, "Chocó");
    assert_eq!(record.municipality, "Quibdó");
}

#[test]
fn esri_numeric_code_page_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![territory("9", "Tanela", "Consejo Comunitario", "Chocó", 3.0)];
    visor_geodata::write_shapefile(dir.path(), "layer", &records, None).unwrap();
    recode_dbf_as_latin1(&dir.path().join("layer.dbf"));
    std::fs::write(dir.path().join("layer.cpg"), "ANSI 1252").unwrap();
    let bytes = zip_components(dir.path(), "layer", &["shp", "shx", "dbf", "cpg"]);
    let path = write_zip(dir.path(), "ansi.zip", &bytes);

    assert_eq!(load_archive(&path).unwrap().records()[0].department, "Chocó");
}

// -- Projections --------------------------------------------------------------

const MAGNA_BOGOTA_PRJ: &str = r#"PROJCS["MAGNA-SIRGAS / Colombia Bogota zone",GEOGCS["MAGNA-SIRGAS",DATUM["Marco_Geocentrico_Nacional_de_Referencia",SPHEROID["GRS 1980",6378137,298.257222101,AUTHORITY["EPSG","7019"]],TOWGS84[0,0,0,0,0,0,0],AUTHORITY["EPSG","6686"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4686"]],PROJECTION["Transverse_Mercator"],PARAMETER["latitude_of_origin",4.596200416666666],PARAMETER["central_meridian",-74.07750791666666],PARAMETER["scale_factor",1],PARAMETER["false_easting",1000000],PARAMETER["false_northing",1000000],UNIT["metre",1,AUTHORITY["EPSG","9001"]],AUTHORITY["EPSG","3116"]]"#;

const MAGNA_BOGOTA_ESRI_PRJ: &str = r#"PROJCS["MAGNA_Colombia_Bogota",GEOGCS["GCS_MAGNA",DATUM["D_MAGNA",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",1000000.0],PARAMETER["False_Northing",1000000.0],PARAMETER["Central_Meridian",-74.07750791666666],PARAMETER["Scale_Factor",1.0],PARAMETER["Latitude_Of_Origin",4.596200416666666],UNIT["Meter",1.0]]"#;

fn colombia() -> Rect<f64> {
    Rect::new((-79.1, -4.3), (-66.8, 13.4))
}

fn load_projected(prj: &str) -> visor_core::TerritoryCollection {
    let dir = tempfile::tempdir().unwrap();
    let mut record = territory("3116", "Sumapaz", "Comunidad Indígena", "Cundinamarca", 10_000.0);
    // Metres in the Bogotá zone, just north-east of the false origin.
    record.geometry = rectangle(1_000_000.0, 1_000_000.0, 10_000.0, 10_000.0);
    let bytes = write_package("layer", [&record], Some(prj)).unwrap();
    let path = write_zip(dir.path(), "projected.zip", &bytes);
    load_archive(&path).unwrap()
}

#[test]
fn projected_source_is_reprojected_to_wgs84() {
    for prj in [MAGNA_BOGOTA_PRJ, MAGNA_BOGOTA_ESRI_PRJ] {
        let collection = load_projected(prj);
        let rect = collection.records()[0].geometry.bounding_rect().unwrap();

        assert!(colombia().intersects(&rect.min()), "{rect:?}");
        assert!(colombia().intersects(&rect.max()), "{rect:?}");
        assert!(rect.min().x > -74.1 && rect.max().x < -73.9, "{rect:?}");
        assert!(rect.min().y > 4.5 && rect.max().y < 4.8, "{rect:?}");
        assert_eq!(collection.metadata().projection.as_deref(), Some(WGS84_PRJ));
    }
}

#[test]
fn unknown_projected_system_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![territory("1", "A", "Consejo Comunitario", "Chocó", 1.0)];
    let prj = r#"PROJCS["Local_Grid_Quibdo",GEOGCS["GCS_MAGNA"],UNIT["Meter",1.0]]"#;
    let bytes = write_package("layer", &records, Some(prj)).unwrap();
    let path = write_zip(dir.path(), "unknown_prj.zip", &bytes);

    match load_archive(&path).unwrap_err() {
        LoadError::Projection(msg) => assert!(msg.contains("Local_Grid_Quibdo"), "{msg}"),
        other => panic!("expected projection error, got {other:?}"),
    }
}
