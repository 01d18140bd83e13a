//! # Filter Options
//!
//! Distinct values offered by the sidebar dropdowns, computed once from the
//! full collection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use visor_core::TerritoryCollection;

/// Sorted, de-duplicated, non-blank values per filterable column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub names: Vec<String>,
    pub community_types: Vec<String>,
    pub departments: Vec<String>,
    pub municipalities: Vec<String>,
}

impl FilterOptions {
    pub fn from_collection(collection: &TerritoryCollection) -> Self {
        let mut names = BTreeSet::new();
        let mut community_types = BTreeSet::new();
        let mut departments = BTreeSet::new();
        let mut municipalities = BTreeSet::new();

        for record in collection.records() {
            insert(&mut names, &record.name);
            insert(&mut community_types, record.community_type.label());
            insert(&mut departments, &record.department);
            insert(&mut municipalities, &record.municipality);
        }

        Self {
            names: names.into_iter().collect(),
            community_types: community_types.into_iter().collect(),
            departments: departments.into_iter().collect(),
            municipalities: municipalities.into_iter().collect(),
        }
    }
}

fn insert(set: &mut BTreeSet<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}
