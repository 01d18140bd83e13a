//! # visor-core — Foundational Types for the Territory Viewer
//!
//! Defines the domain model shared by every other crate in the workspace:
//! the strongly typed [`TerritoryRecord`], the immutable
//! [`TerritoryCollection`] loaded once per process, the six
//! [`BaseMapStyle`]s, the viewer configuration, and the error hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **Typed records, validated at load.** Attributes are read by name
//!    exactly once, in the loader. Everything downstream works with the six
//!    named fields of [`TerritoryRecord`], never with a loosely typed table.
//!
//! 2. **Explicit session state.** The collection is an immutable value held
//!    behind an `Arc` and passed explicitly to the filter, summary, and
//!    render stages. There is no global cache.
//!
//! 3. **Unique identifiers.** [`TerritoryCollection::new`] rejects duplicate
//!    `ID_ANT` values, so a [`TerritoryId`] always names exactly one record.
//!
//! 4. **Single `BaseMapStyle` enum.** One definition, six variants,
//!    exhaustive `match` for tiles, labels, and slugs.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `visor-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod area;
pub mod basemap;
pub mod community;
pub mod config;
pub mod error;
pub mod identity;
pub mod territory;

// Re-export primary types for ergonomic imports.
pub use area::AreaBreakdown;
pub use basemap::{BaseMapStyle, BASE_MAP_STYLE_COUNT};
pub use community::{normalize_label, CommunityKind, CommunityType};
pub use config::ViewerConfig;
pub use error::{ConfigError, ExportError, LoadError, RenderError, VisorError};
pub use identity::TerritoryId;
pub use territory::{DatasetMetadata, TerritoryAttributes, TerritoryCollection, TerritoryRecord};
