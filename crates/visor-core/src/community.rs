//! # Community Type
//!
//! The `Tipo` column carries a free-text label such as
//! `"Comunidad Indígena"` or `"Consejo Comunitario"`. The label is kept
//! verbatim (filters match it exactly and exports write it back unchanged)
//! and classified once into a [`CommunityKind`] for styling and statistics.

use serde::{Deserialize, Serialize};

/// Classification of a territory's community type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityKind {
    /// Indigenous reservation or community (label contains `indigena`).
    Indigenous,
    /// Afro-Colombian community council (label contains `comunitario`).
    CommunityCouncil,
    /// Any other label.
    Other,
}

impl CommunityKind {
    /// Classify a raw `Tipo` label.
    ///
    /// Matching runs on [`normalize_label`], so case, surrounding spaces, and
    /// accents do not matter: `" Comunidad INDÍGENA "` is indigenous.
    pub fn classify(label: &str) -> Self {
        let normalized = normalize_label(label);
        if normalized.contains("indigena") {
            Self::Indigenous
        } else if normalized.contains("comunitario") {
            Self::CommunityCouncil
        } else {
            Self::Other
        }
    }

    /// Returns the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indigenous => "indigenous",
            Self::CommunityCouncil => "community_council",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for CommunityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `Tipo` label together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunityType {
    label: String,
    kind: CommunityKind,
}

impl CommunityType {
    /// Wrap a label, classifying it.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into().trim().to_string();
        let kind = CommunityKind::classify(&label);
        Self { label, kind }
    }

    /// The label as it appears in the dataset (trimmed).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The classified kind.
    pub fn kind(&self) -> CommunityKind {
        self.kind
    }
}

impl std::fmt::Display for CommunityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Trim, lowercase, and strip Spanish diacritics.
pub fn normalize_label(value: &str) -> String {
    value
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
