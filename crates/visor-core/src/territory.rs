//! # Territory Records and the Immutable Collection
//!
//! A [`TerritoryRecord`] is one formalized indigenous or community land unit.
//! The [`TerritoryCollection`] holds every record of the dataset in archive
//! order. It is built once by the loader, never mutated, and shared behind an
//! `Arc` for the lifetime of the process.
//!
//! ## Invariants
//!
//! - `id` is unique within a collection.
//! - Record order is the archive order and never changes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

use crate::community::{CommunityKind, CommunityType};
use crate::error::LoadError;
use crate::identity::TerritoryId;

/// One formalized territory with its attributes and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryRecord {
    /// Registry identifier (`ID_ANT`).
    pub id: TerritoryId,
    /// Territory name (`NOMBRE`).
    pub name: String,
    /// Community type (`Tipo`).
    pub community_type: CommunityType,
    /// Department (`DEPARTAMEN`).
    pub department: String,
    /// Municipality (`MUNICIPIO`).
    pub municipality: String,
    /// Total area in hectares (`AREA_TOTAL`).
    pub area_ha: f64,
    /// Footprint in the dataset's coordinate system (longitude, latitude).
    pub geometry: MultiPolygon<f64>,
}

impl TerritoryRecord {
    /// The attribute columns of this record, without geometry.
    pub fn attributes(&self) -> TerritoryAttributes {
        TerritoryAttributes {
            id: self.id.as_str().to_string(),
            name: self.name.clone(),
            community_type: self.community_type.label().to_string(),
            community_kind: self.community_type.kind(),
            department: self.department.clone(),
            municipality: self.municipality.clone(),
            area_ha: self.area_ha,
        }
    }
}

/// Serializable attribute view of a record (geometry excluded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryAttributes {
    /// Registry identifier.
    pub id: String,
    /// Territory name.
    pub name: String,
    /// Community type label as it appears in the dataset.
    pub community_type: String,
    /// Classified community kind.
    pub community_kind: CommunityKind,
    /// Department.
    pub department: String,
    /// Municipality.
    pub municipality: String,
    /// Total area in hectares.
    pub area_ha: f64,
}

/// Where a collection came from and when it was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Path of the archive the records were read from.
    pub source: String,
    /// Contents of the `.prj` component, when the archive had one. Projected
    /// sources are reprojected on load and carry the WGS84 WKT instead.
    pub projection: Option<String>,
    /// Load timestamp.
    pub loaded_at: DateTime<Utc>,
}

impl DatasetMetadata {
    /// Metadata for a collection loaded now from `source`.
    pub fn new(source: impl Into<String>, projection: Option<String>) -> Self {
        Self {
            source: source.into(),
            projection,
            loaded_at: Utc::now(),
        }
    }
}

/// The full, immutable set of territories for a session.
#[derive(Debug, Clone)]
pub struct TerritoryCollection {
    records: Vec<TerritoryRecord>,
    by_id: HashMap<TerritoryId, usize>,
    metadata: DatasetMetadata,
}

impl TerritoryCollection {
    /// Build a collection, rejecting duplicate identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateId`] naming the first repeated id.
    pub fn new(records: Vec<TerritoryRecord>, metadata: DatasetMetadata) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(LoadError::DuplicateId(record.id.to_string()));
            }
        }
        Ok(Self {
            records,
            by_id,
            metadata,
        })
    }

    /// All records in archive order.
    pub fn records(&self) -> &[TerritoryRecord] {
        &self.records
    }

    /// Record at `index` in archive order.
    pub fn get(&self, index: usize) -> Option<&TerritoryRecord> {
        self.records.get(index)
    }

    /// Archive position of the record with this id.
    pub fn position_of(&self, id: &TerritoryId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Record with this id.
    pub fn find(&self, id: &TerritoryId) -> Option<&TerritoryRecord> {
        self.position_of(id).and_then(|index| self.records.get(index))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dataset provenance.
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }
}
