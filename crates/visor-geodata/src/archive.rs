//! # Archive Extraction
//!
//! Finds the shapefile inside the zip and copies its `.shp`, `.shx`, and
//! `.dbf` into a private temporary directory under a fixed stem. Zip paths
//! are discarded, so entry names cannot escape the directory. The small
//! `.prj` and `.cpg` text components are read in memory.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use visor_core::LoadError;

/// Stem used for the extracted component files.
const EXTRACTED_STEM: &str = "layer";

/// Zip entry names of one shapefile's components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapefileComponents {
    /// Geometry (`.shp`).
    pub shp: String,
    /// Geometry index (`.shx`).
    pub shx: String,
    /// Attribute table (`.dbf`).
    pub dbf: String,
    /// Projection WKT (`.prj`), optional.
    pub prj: Option<String>,
    /// Code page (`.cpg`), optional.
    pub cpg: Option<String>,
}

/// Pick the first `.shp` entry and its siblings from a list of zip entry names.
///
/// Extension matching is case-insensitive. Directory entries and macOS
/// resource forks (`__MACOSX/`) are ignored.
///
/// # Errors
///
/// [`LoadError::MissingComponent`] when there is no `.shp`, or when the
/// chosen `.shp` lacks a `.shx` or `.dbf` sibling.
pub fn locate_components<'a, I>(names: I) -> Result<ShapefileComponents, LoadError>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names
        .into_iter()
        .filter(|n| !n.ends_with('/') && !n.starts_with("__MACOSX/"))
        .collect();

    let shp: &str = names
        .iter()
        .copied()
        .find(|n| n.to_ascii_lowercase().ends_with(".shp"))
        .ok_or_else(|| LoadError::MissingComponent("shp".to_string()))?;
    let stem = &shp[..shp.len() - ".shp".len()];

    let sibling = |ext: &str| -> Option<String> {
        let wanted = format!("{stem}.{ext}").to_ascii_lowercase();
        names
            .iter()
            .find(|n| n.to_ascii_lowercase() == wanted)
            .map(|n| n.to_string())
    };

    Ok(ShapefileComponents {
        shp: shp.to_string(),
        shx: sibling("shx").ok_or_else(|| LoadError::MissingComponent("shx".to_string()))?,
        dbf: sibling("dbf").ok_or_else(|| LoadError::MissingComponent("dbf".to_string()))?,
        prj: sibling("prj"),
        cpg: sibling("cpg"),
    })
}

/// A shapefile extracted to disk. The files live as long as this value.
#[derive(Debug)]
pub struct ExtractedShapefile {
    _dir: TempDir,
    /// Path of the extracted `.shp` (siblings share its stem).
    pub shp_path: PathBuf,
    /// Path of the extracted `.dbf`.
    pub dbf_path: PathBuf,
    /// Projection WKT, when the archive had a `.prj`.
    pub projection: Option<String>,
    /// Code page label of the attribute table, when the archive had a `.cpg`.
    pub code_page: Option<String>,
}

/// Open `path` as a zip archive and extract its shapefile components.
pub fn extract(path: &Path) -> Result<ExtractedShapefile, LoadError> {
    if !path.exists() {
        return Err(LoadError::ArchiveMissing(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| LoadError::Archive(format!("{}: {e}", path.display())))?;

    let names: Vec<String> = zip.file_names().map(str::to_string).collect();
    let components = locate_components(names.iter().map(String::as_str))?;
    tracing::debug!(
        archive = %path.display(),
        shp = %components.shp,
        prj = components.prj.is_some(),
        "located shapefile components"
    );

    let dir = tempfile::tempdir()?;
    let target = |ext: &str| dir.path().join(format!("{EXTRACTED_STEM}.{ext}"));

    let mut copy_entry = |name: &str, dest: &Path| -> Result<(), LoadError> {
        let mut entry = zip
            .by_name(name)
            .map_err(|e| LoadError::Archive(format!("{name}: {e}")))?;
        let mut out = File::create(dest)?;
        std::io::copy(&mut entry, &mut out)?;
        Ok(())
    };

    copy_entry(&components.shp, &target("shp"))?;
    copy_entry(&components.shx, &target("shx"))?;
    copy_entry(&components.dbf, &target("dbf"))?;

    let mut read_text = |name: &Option<String>| -> Result<Option<String>, LoadError> {
        let Some(name) = name else {
            return Ok(None);
        };
        let mut entry = zip
            .by_name(name)
            .map_err(|e| LoadError::Archive(format!("{name}: {e}")))?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        let text = String::from_utf8_lossy(&bytes).trim().to_string();
        Ok((!text.is_empty()).then_some(text))
    };
    let projection = read_text(&components.prj)?;
    let code_page = read_text(&components.cpg)?;

    Ok(ExtractedShapefile {
        shp_path: target("shp"),
        dbf_path: target("dbf"),
        projection,
        code_page,
        _dir: dir,
    })
}
