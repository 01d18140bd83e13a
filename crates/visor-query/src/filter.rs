//! # Filter Engine
//!
//! Criteria are optional and combine with logical AND:
//!
//! | Criterion         | Match                                      |
//! |-------------------|--------------------------------------------|
//! | `id`              | exact, after trimming                      |
//! | `name`            | case-insensitive substring                 |
//! | `community_types` | exact label, any of the listed values      |
//! | `departments`     | exact, any of the listed values            |
//! | `municipalities`  | exact, any of the listed values            |
//!
//! Blank strings and empty lists mean "not provided".

use serde::{Deserialize, Serialize};
use visor_core::{TerritoryCollection, TerritoryId, TerritoryRecord};

/// What the user asked for. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact territory id (`ID_ANT`).
    pub id: Option<String>,
    /// Case-insensitive fragment of the territory name.
    pub name: Option<String>,
    /// Accepted `Tipo` labels.
    pub community_types: Vec<String>,
    /// Accepted departments.
    pub departments: Vec<String>,
    /// Accepted municipalities.
    pub municipalities: Vec<String>,
}

impl FilterCriteria {
    /// Criteria that match every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match only the record with this exact id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Match names containing this text, ignoring case.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Also accept this community type label.
    pub fn with_community_type(mut self, label: impl Into<String>) -> Self {
        self.community_types.push(label.into());
        self
    }

    /// Also accept this department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.departments.push(department.into());
        self
    }

    /// Also accept this municipality.
    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipalities.push(municipality.into());
        self
    }

    /// Trim every value and drop the blank ones.
    pub fn normalized(&self) -> Self {
        fn text(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }
        fn list(values: &[String]) -> Vec<String> {
            values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        }
        Self {
            id: text(&self.id),
            name: text(&self.name),
            community_types: list(&self.community_types),
            departments: list(&self.departments),
            municipalities: list(&self.municipalities),
        }
    }

    /// True when no criterion is provided once blanks are ignored.
    pub fn is_empty(&self) -> bool {
        let n = self.normalized();
        n.id.is_none()
            && n.name.is_none()
            && n.community_types.is_empty()
            && n.departments.is_empty()
            && n.municipalities.is_empty()
    }

    /// Whether `record` satisfies every provided criterion.
    ///
    /// Expects normalized criteria; [`apply`] normalizes once up front.
    fn matches(&self, name_needle: Option<&str>, record: &TerritoryRecord) -> bool {
        fn any_of(accepted: &[String], value: &str) -> bool {
            accepted.is_empty() || accepted.iter().any(|a| a == value)
        }

        if let Some(id) = &self.id {
            if record.id.as_str() != id {
                return false;
            }
        }
        if let Some(needle) = name_needle {
            if !record.name.to_lowercase().contains(needle) {
                return false;
            }
        }
        any_of(&self.community_types, record.community_type.label())
            && any_of(&self.departments, &record.department)
            && any_of(&self.municipalities, &record.municipality)
    }
}

/// The records of a collection that matched a filter, in collection order.
///
/// Holds indices into the collection, never copies of the records.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    collection: &'a TerritoryCollection,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    /// Every record of `collection`.
    pub fn all(collection: &'a TerritoryCollection) -> Self {
        Self {
            collection,
            indices: (0..collection.len()).collect(),
        }
    }

    /// No records.
    pub fn empty(collection: &'a TerritoryCollection) -> Self {
        Self {
            collection,
            indices: Vec::new(),
        }
    }

    /// The collection this subset views.
    pub fn collection(&self) -> &'a TerritoryCollection {
        self.collection
    }

    /// Positions of the selected records in the collection.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Selected records in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &'a TerritoryRecord> + '_ {
        let collection = self.collection;
        self.indices.iter().filter_map(move |&i| collection.get(i))
    }

    /// The only record, when exactly one matched.
    pub fn single(&self) -> Option<&'a TerritoryRecord> {
        match self.indices.as_slice() {
            [only] => self.collection.get(*only),
            _ => None,
        }
    }

    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Select the records of `collection` that satisfy `criteria`.
pub fn apply<'a>(collection: &'a TerritoryCollection, criteria: &FilterCriteria) -> Subset<'a> {
    let criteria = criteria.normalized();
    let needle = criteria.name.as_deref().map(str::to_lowercase);

    // An exact id names at most one record; skip the scan.
    if let Some(id) = criteria.id.as_deref() {
        let hit = TerritoryId::new(id)
            .and_then(|id| collection.position_of(&id))
            .filter(|&i| {
                collection
                    .get(i)
                    .is_some_and(|r| criteria.matches(needle.as_deref(), r))
            });
        let subset = Subset {
            collection,
            indices: hit.into_iter().collect(),
        };
        tracing::debug!(matched = subset.len(), "filter by id");
        return subset;
    }

    let indices = collection
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(needle.as_deref(), r))
        .map(|(i, _)| i)
        .collect();
    let subset = Subset {
        collection,
        indices,
    };
    tracing::debug!(matched = subset.len(), total = collection.len(), "filter applied");
    subset
}
