//! Table validator: walks the data region and rejects cells.

use crate::coord::CellRef;
use crate::error::ValidationError;
use crate::layout::Layout;
use crate::model::CellError;
use crate::sheet::Sheet;

/// Check every data cell of `sheet` against its column header and rule.
///
/// Errors come out row-major, then column-major. An empty cell is reported
/// once and never type-checked.
pub fn validate_cells(sheet: &Sheet) -> Result<Vec<CellError>, ValidationError> {
    let layout = Layout::new(sheet)?;
    Ok(check_layout(&layout))
}

pub(crate) fn check_layout(layout: &Layout<'_>) -> Vec<CellError> {
    let headers = layout.headers();
    let mut errors = Vec::new();

    for (row_idx, row) in layout.data_rows() {
        for (col_idx, value) in row.iter().enumerate().take(headers.len()) {
            let header = &headers[col_idx];
            if header.is_empty() {
                continue;
            }

            let cell = CellRef::new(row_idx, col_idx);
            if value.is_empty() {
                errors.push(CellError::empty(cell, header.as_str()));
                continue;
            }

            if let Some(rule) = layout.rule(col_idx) {
                if !rule.matches(value) {
                    errors.push(CellError::invalid(cell, value.display(), rule));
                }
            }
        }
    }

    errors
}
