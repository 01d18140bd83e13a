//! # visor-geodata — Shapefile Archive I/O
//!
//! Reads the bundled territory archive into a validated
//! [`visor_core::TerritoryCollection`] and writes record sets back out as
//! shapefile packages.
//!
//! ## Loading
//!
//! ```text
//! Formalizado.zip ─► locate .shp/.shx/.dbf(.prj/.cpg) ─► extract to tempdir
//!                 ─► decode DBF per .cpg ─► validate columns
//!                 ─► reproject to WGS84 ─► typed records ─► collection
//! ```
//!
//! Every schema problem is reported as a [`visor_core::LoadError`] at load
//! time; nothing downstream reads attributes by name.
//!
//! ## Writing
//!
//! [`writer::write_package`] produces a zip with `.shp`, `.shx`, `.dbf`,
//! `.prj`, and `.cpg` members that [`load_archive`] reads back unchanged.

pub mod archive;
pub mod encoding;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod schema;
pub mod writer;

pub use archive::{locate_components, ShapefileComponents};
pub use loader::load_archive;
pub use schema::{
    AREA_COLUMN, DEPARTMENT_COLUMN, ID_COLUMN, MUNICIPALITY_COLUMN, NAME_COLUMN,
    REQUIRED_COLUMNS, TYPE_COLUMN,
};
pub use writer::{write_package, write_shapefile, WGS84_PRJ};
