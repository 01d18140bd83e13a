//! # Shapefile Export
//!
//! The selection as a zipped shapefile. The `.prj` carries the projection of
//! the source archive so the package opens in the same place in a GIS.

use visor_core::ExportError;
use visor_query::Subset;

use crate::artifact::ExportArtifact;

/// Stem of every component inside the package.
pub const SHAPEFILE_STEM: &str = "shapefile_filtrado";
pub const SHAPEFILE_FILE_NAME: &str = "shapefile_filtrado.zip";

/// Export the selection as a zip of `.shp`, `.shx`, `.dbf`, `.prj`, `.cpg`.
///
/// Territories without geometry are left out of the package.
pub fn export_shapefile(subset: &Subset<'_>) -> Result<ExportArtifact, ExportError> {
    let projection = subset.collection().metadata().projection.as_deref();
    let bytes = visor_geodata::write_package(SHAPEFILE_STEM, subset.iter(), projection)?;

    tracing::info!(records = subset.len(), bytes = bytes.len(), "shapefile export");
    Ok(ExportArtifact {
        file_name: SHAPEFILE_FILE_NAME,
        content_type: "application/zip",
        bytes,
    })
}
