//! # Statistics Summarizer
//!
//! The statistics panel: how many territories matched, their total area,
//! and how many are indigenous versus community-council territories.

use serde::{Deserialize, Serialize};
use visor_core::{AreaBreakdown, CommunityKind};

use crate::filter::Subset;

/// Statistics over one subset. All zero for an empty subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of records in the subset.
    pub count: usize,
    /// Sum of `area_ha` over the subset.
    pub total_area_ha: f64,
    /// Records classified as indigenous.
    pub indigenous_count: usize,
    /// Records classified as community councils.
    pub community_council_count: usize,
}

impl Summary {
    /// Total area as whole hectares plus remaining square metres.
    pub fn area_breakdown(&self) -> AreaBreakdown {
        AreaBreakdown::from_hectares(self.total_area_ha)
    }
}

/// Compute the statistics panel for `subset`.
pub fn summarize(subset: &Subset<'_>) -> Summary {
    subset.iter().fold(Summary::default(), |mut acc, record| {
        acc.count += 1;
        acc.total_area_ha += record.area_ha;
        match record.community_type.kind() {
            CommunityKind::Indigenous => acc.indigenous_count += 1,
            CommunityKind::CommunityCouncil => acc.community_council_count += 1,
            CommunityKind::Other => {}
        }
        acc
    })
}
