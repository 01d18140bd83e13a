//! # Area Breakdown
//!
//! Areas are stored in hectares, the dataset's native unit. The viewer
//! displays them as whole hectares plus the remaining square metres.

use serde::{Deserialize, Serialize};

/// Square metres in one hectare.
pub const SQUARE_METRES_PER_HECTARE: f64 = 10_000.0;

/// An area split into whole hectares and leftover square metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBreakdown {
    /// Whole hectares (truncated).
    pub hectares: u64,
    /// Remaining square metres, rounded to the nearest metre.
    pub square_metres: u64,
}

impl AreaBreakdown {
    /// Split a hectare value. Negative and non-finite inputs yield zero.
    ///
    /// Rounding can carry: `0.99999 ha` is `1 ha + 0 m²`, never `0 ha + 10000 m²`.
    pub fn from_hectares(area_ha: f64) -> Self {
        if !area_ha.is_finite() || area_ha <= 0.0 {
            return Self {
                hectares: 0,
                square_metres: 0,
            };
        }
        let mut hectares = area_ha.trunc() as u64;
        let mut square_metres =
            ((area_ha - area_ha.trunc()) * SQUARE_METRES_PER_HECTARE).round() as u64;
        if square_metres >= SQUARE_METRES_PER_HECTARE as u64 {
            hectares += 1;
            square_metres -= SQUARE_METRES_PER_HECTARE as u64;
        }
        Self {
            hectares,
            square_metres,
        }
    }
}

impl std::fmt::Display for AreaBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ha + {} m²", self.hectares, self.square_metres)
    }
}
