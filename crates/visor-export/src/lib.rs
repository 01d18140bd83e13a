//! # visor-export — Downloads of the Current Selection
//!
//! Three exports, each returning an [`ExportArtifact`] ready to hand to a
//! browser or write to disk:
//!
//! | Function             | File                          | Content type      |
//! |----------------------|-------------------------------|-------------------|
//! | [`export_csv`]       | `resultados_formalizados.csv` | `text/csv`        |
//! | [`export_shapefile`] | `shapefile_filtrado.zip`      | `application/zip` |
//! | [`export_html`]      | `mapa_formalizado.html`       | `text/html`       |
//!
//! Exports never modify the collection. An empty subset produces a valid,
//! empty artifact.

pub mod artifact;
pub mod csv_export;
pub mod html_export;
pub mod shapefile_export;

pub use artifact::{ExportArtifact, ExportFormat};
pub use csv_export::{export_csv, CsvRow, CSV_FILE_NAME};
pub use html_export::{export_html, HTML_FILE_NAME};
pub use shapefile_export::{export_shapefile, SHAPEFILE_FILE_NAME, SHAPEFILE_STEM};
