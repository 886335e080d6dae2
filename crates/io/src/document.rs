// JSON document export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sipot_engine::Extraction;

use crate::error::LoadError;

/// Path of the success document for a run inside `dir`.
pub fn document_path(dir: &Path, run_id: &str) -> PathBuf {
    dir.join(format!("{run_id}.json"))
}

/// Write `extraction` as pretty-printed UTF-8 JSON, creating parent
/// directories as needed.
///
/// Keys come out as `id_formato`, `Titulo`, `Nombre Corto`, `data`; each
/// record keeps its header order.
pub fn write_extraction(extraction: &Extraction, path: &Path) -> Result<(), LoadError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LoadError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| LoadError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, extraction)?;
    writer.flush().map_err(|e| LoadError::io(path, e))?;

    tracing::debug!(
        path = %path.display(),
        records = extraction.records.len(),
        "extraction document written"
    );
    Ok(())
}
