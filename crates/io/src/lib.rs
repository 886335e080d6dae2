//! `sipot-io` - reading SIPOT templates and writing validation documents.
//!
//! Loading turns a CSV or spreadsheet file into a [`Sheet`] for the engine;
//! the output side writes the success JSON document and the error acuse.

pub mod acuse;
pub mod csv;
pub mod document;
pub mod error;
pub mod xlsx;

use std::path::Path;

use sipot_engine::Sheet;

pub use error::LoadError;

/// Spreadsheet extensions handled through calamine.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Load the first worksheet of `path`, dispatching on its extension.
pub fn load(path: &Path) -> Result<Sheet, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), %extension, "loading template");

    match extension.as_str() {
        "csv" | "txt" => csv::import(path),
        "tsv" => csv::import_tsv(path),
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => xlsx::import(path),
        _ => Err(LoadError::UnsupportedFormat { extension }),
    }
}

/// Display name of a loaded file: its file name, or the whole path when it
/// has none.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
