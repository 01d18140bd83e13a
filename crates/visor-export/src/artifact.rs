//! # Export Artifacts

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use visor_core::{BaseMapStyle, ExportError};
use visor_query::Subset;

/// A finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name.
    pub file_name: &'static str,
    /// MIME type.
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// `Content-Disposition` header value for this artifact.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

/// The three export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Shapefile,
    Html,
}

impl ExportFormat {
    pub fn all_formats() -> &'static [ExportFormat] {
        &[Self::Csv, Self::Shapefile, Self::Html]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Shapefile => "shapefile",
            Self::Html => "html",
        }
    }

    /// Produce this format for `subset`. `style` only affects HTML.
    pub fn export(
        &self,
        subset: &Subset<'_>,
        style: BaseMapStyle,
    ) -> Result<ExportArtifact, ExportError> {
        match self {
            Self::Csv => crate::export_csv(subset),
            Self::Shapefile => crate::export_shapefile(subset),
            Self::Html => Ok(crate::export_html(subset, style)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all_formats()
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| format!("unknown export format {s:?}; expected csv, shapefile, or html"))
    }
}
