use std::path::PathBuf;

use thiserror::Error;

/// Failure to read an input file or write an output document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot read workbook '{path}': {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("workbook '{path}' contains no sheets")]
    NoSheets { path: PathBuf },

    #[error("unsupported file type '{extension}' (expected csv, tsv, txt, xlsx, xlsm, xls, xlsb or ods)")]
    UnsupportedFormat { extension: String },

    #[error("cannot encode document: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
