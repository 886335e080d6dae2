//! Record extractor for sheets that passed validation.

use crate::cell::CellValue;
use crate::error::ValidationError;
use crate::layout::{Layout, FORMAT_ID_CELL, SHORT_NAME_CELL, TITLE_CELL};
use crate::model::{Extraction, Metadata, Record};
use crate::sheet::Sheet;

/// Shown when the sheet has no format identifier.
pub const MISSING_FORMAT_ID: &str = "Formato no encontrado";
/// Shown when the sheet has no short format name.
pub const MISSING_SHORT_NAME: &str = "N/D";

/// Reshape the data region into header-keyed records.
///
/// Callers run this only after validation found nothing; it performs no
/// checks of its own.
pub fn extract(sheet: &Sheet) -> Result<Extraction, ValidationError> {
    let layout = Layout::new(sheet)?;
    Ok(extract_layout(&layout))
}

pub(crate) fn extract_layout(layout: &Layout<'_>) -> Extraction {
    let headers = layout.headers();
    let records = layout
        .data_rows()
        .map(|(_, row)| {
            let mut record = Record::new();
            for (header, value) in headers.iter().zip(row) {
                if header.is_empty() {
                    continue;
                }
                record.insert(header.as_str(), value.display());
            }
            record
        })
        .collect();

    Extraction {
        meta: read_metadata(layout),
        records,
    }
}

/// Read the format id, title and short name from their fixed cells.
pub(crate) fn read_metadata(layout: &Layout<'_>) -> Metadata {
    let scalar = |(row, col): (usize, usize)| {
        layout
            .cell(row, col)
            .filter(|value| !value.is_blank())
            .map(CellValue::label)
    };

    Metadata {
        format_id: scalar(FORMAT_ID_CELL).unwrap_or_else(|| MISSING_FORMAT_ID.to_string()),
        title: scalar(TITLE_CELL).unwrap_or_default(),
        short_name: scalar(SHORT_NAME_CELL).unwrap_or_else(|| MISSING_SHORT_NAME.to_string()),
    }
}
