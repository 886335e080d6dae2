// CSV/TSV import

use std::path::Path;

use sipot_engine::{CellValue, Sheet};

use crate::error::LoadError;

/// Whole-field markers loaded as missing values, like an empty field.
pub const NULL_VALUES: [&str; 5] = ["", "NULL", "null", "NaN", "nan"];

pub fn import(path: &Path) -> Result<Sheet, LoadError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(path, &content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Sheet, LoadError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(path, &content, b'\t')
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    // Template banners span several short lines; sample past them
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(12)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                ::csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Score: lines agreeing with the widest line, times that width
        let target = counts.iter().copied().max().unwrap_or(0);
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            tracing::debug!(path = %path.display(), "input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(path: &Path, content: &str, delimiter: u8) -> Result<Sheet, LoadError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(field_value).collect::<Vec<_>>());
    }

    Ok(Sheet::new(crate::file_label(path), rows))
}

/// Cell for one loaded text field; exact [`NULL_VALUES`] matches are empty.
pub(crate) fn field_value(field: &str) -> CellValue {
    if NULL_VALUES.contains(&field) {
        CellValue::Empty
    } else {
        CellValue::text(field)
    }
}
