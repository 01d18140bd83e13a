//! # HTML Export

use visor_core::BaseMapStyle;
use visor_query::Subset;

use crate::artifact::ExportArtifact;

pub const HTML_FILE_NAME: &str = "mapa_formalizado.html";

/// Export the rendered map of the selection as a standalone page.
pub fn export_html(subset: &Subset<'_>, style: BaseMapStyle) -> ExportArtifact {
    let view = visor_map::render(subset, style);
    let bytes = visor_map::to_html(&view).into_bytes();

    tracing::info!(
        records = subset.len(),
        skipped = view.skipped.len(),
        basemap = %style,
        "html export"
    );
    ExportArtifact {
        file_name: HTML_FILE_NAME,
        content_type: "text/html; charset=utf-8",
        bytes,
    }
}
