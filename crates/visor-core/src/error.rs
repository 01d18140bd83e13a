//! # Error Types
//!
//! Defines the error types used throughout the viewer. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Load errors are fatal: there is no fallback dataset, so the binaries
//!   surface them and stop.
//! - Render errors are per record and never abort a render. The map
//!   renderer collects them next to the overlays it did plot.
//! - Export errors only arise from I/O or encoder failures.

use thiserror::Error;

/// Top-level error type for the viewer.
#[derive(Error, Debug)]
pub enum VisorError {
    /// The dataset could not be loaded.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// An export could not be produced.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// The configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Error while reading the territory archive.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The archive path does not exist.
    #[error("archive not found: {0}")]
    ArchiveMissing(String),

    /// The archive exists but is not a readable zip file.
    #[error("corrupt archive: {0}")]
    Archive(String),

    /// A required shapefile component is absent from the archive.
    #[error("archive is missing the .{0} component")]
    MissingComponent(String),

    /// The attribute table or shape types do not match the fixed schema.
    #[error("schema mismatch: {0}")]
    Schema(String),

    /// Two records share the same `ID_ANT`.
    #[error("duplicate territory id: {0}")]
    DuplicateId(String),

    /// The shapefile reader failed on a component.
    #[error("shapefile error: {0}")]
    Shapefile(String),

    /// The `.prj` cannot be transformed to WGS84.
    #[error("unsupported projection: {0}")]
    Projection(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A record whose geometry cannot be plotted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The record has no polygon (null shape or empty rings).
    #[error("territory {territory_id} has no geometry")]
    EmptyGeometry {
        /// The skipped record.
        territory_id: String,
    },

    /// The record contains NaN or infinite coordinates.
    #[error("territory {territory_id} has non-finite coordinates")]
    NonFiniteCoordinate {
        /// The skipped record.
        territory_id: String,
    },
}

impl RenderError {
    /// The identifier of the record that was skipped.
    pub fn territory_id(&self) -> &str {
        match self {
            Self::EmptyGeometry { territory_id } | Self::NonFiniteCoordinate { territory_id } => {
                territory_id
            }
        }
    }
}

/// Error while serializing a subset.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("csv error: {0}")]
    Csv(String),

    /// The shapefile writer failed.
    #[error("shapefile error: {0}")]
    Shapefile(String),

    /// Building the zip package failed.
    #[error("zip error: {0}")]
    Zip(String),

    /// A DBF column name was rejected by the writer.
    #[error("invalid field name: {0}")]
    FieldName(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error in the viewer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::ViewerConfig`].
    #[error("invalid config file {path}: {reason}")]
    Parse {
        /// Path of the configuration file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// A setting has an unusable value.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Setting name (env var or YAML key).
        key: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
