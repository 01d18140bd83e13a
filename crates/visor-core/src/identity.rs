//! # Territory Identifier
//!
//! Newtype wrapper around the `ID_ANT` attribute so a territory id cannot be
//! confused with a name, department, or any other free-text column.

use serde::{Deserialize, Serialize};

/// Registry identifier of a formalized territory (`ID_ANT`).
///
/// Stored trimmed. Uniqueness within a collection is enforced by
/// [`crate::TerritoryCollection::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryId(String);

impl TerritoryId {
    /// Build an identifier, trimming surrounding whitespace.
    ///
    /// Returns `None` for blank input.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
