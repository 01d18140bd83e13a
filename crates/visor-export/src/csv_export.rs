//! # CSV Export
//!
//! The attribute table of the selection, geometry excluded. Column names
//! match the source attribute table so the file reads like the dataset.

use serde::{Deserialize, Serialize};
use visor_core::{ExportError, TerritoryRecord};
use visor_query::Subset;

use crate::artifact::ExportArtifact;

pub const CSV_FILE_NAME: &str = "resultados_formalizados.csv";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "ID_ANT")]
    pub id: String,
    #[serde(rename = "NOMBRE")]
    pub name: String,
    #[serde(rename = "Tipo")]
    pub community_type: String,
    #[serde(rename = "DEPARTAMEN")]
    pub department: String,
    #[serde(rename = "MUNICIPIO")]
    pub municipality: String,
    #[serde(rename = "AREA_TOTAL")]
    pub area_ha: f64,
}

impl From<&TerritoryRecord> for CsvRow {
    fn from(record: &TerritoryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            community_type: record.community_type.label().to_string(),
            department: record.department.clone(),
            municipality: record.municipality.clone(),
            area_ha: record.area_ha,
        }
    }
}

/// Header written even when the selection is empty.
const HEADER: [&str; 6] = ["ID_ANT", "NOMBRE", "Tipo", "DEPARTAMEN", "MUNICIPIO", "AREA_TOTAL"];

/// Export the selection as UTF-8, comma-delimited CSV.
pub fn export_csv(subset: &Subset<'_>) -> Result<ExportArtifact, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    for record in subset.iter() {
        writer
            .serialize(CsvRow::from(record))
            .map_err(|e| ExportError::Csv(format!("{}: {e}", record.id)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    tracing::info!(records = subset.len(), bytes = bytes.len(), "csv export");
    Ok(ExportArtifact {
        file_name: CSV_FILE_NAME,
        content_type: CSV_CONTENT_TYPE,
        bytes,
    })
}
