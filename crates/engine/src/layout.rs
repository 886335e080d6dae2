//! Fixed SIPOT template layout.
//!
//! Row 4 holds rule codes, row 7 holds display headers, data starts at row 8.
//! All positions refer to the sheet after fully blank rows were dropped.

use crate::cell::CellValue;
use crate::error::ValidationError;
use crate::rules::{rule_for, Rule};
use crate::sheet::{is_blank_row, Sheet};

/// Row holding one rule code per column (0-based).
pub const RULE_ROW: usize = 3;
/// Row holding the display header of each column (0-based).
pub const HEADER_ROW: usize = 6;
/// First data row (0-based).
pub const DATA_START_ROW: usize = 7;

/// Format identifier cell (row, col).
pub const FORMAT_ID_CELL: (usize, usize) = (0, 0);
/// Report title cell (row, col).
pub const TITLE_CELL: (usize, usize) = (2, 0);
/// Short format name cell (row, col).
pub const SHORT_NAME_CELL: (usize, usize) = (2, 3);

/// A read-only view of a sheet in template coordinates.
#[derive(Debug)]
pub struct Layout<'a> {
    rows: Vec<&'a [CellValue]>,
    headers: Vec<String>,
    rules: Vec<Option<Rule>>,
}

impl<'a> Layout<'a> {
    /// Drop blank rows and read the rule and header rows.
    ///
    /// Missing rule or header rows read as empty; only a sheet with no
    /// non-blank row at all is a structural failure.
    pub fn new(sheet: &'a Sheet) -> Result<Self, ValidationError> {
        let rows: Vec<&[CellValue]> = sheet.rows().filter(|row| !is_blank_row(row)).collect();
        if rows.is_empty() {
            return Err(ValidationError::EmptySheet {
                sheet: sheet.name.clone(),
            });
        }

        let headers: Vec<String> = rows
            .get(HEADER_ROW)
            .map(|row| row.iter().map(CellValue::label).collect())
            .unwrap_or_default();

        let rule_row = rows.get(RULE_ROW).copied().unwrap_or(&[]);
        let rules = (0..headers.len()).map(|col| rule_for(rule_row.get(col))).collect();

        Ok(Self { rows, headers, rules })
    }

    /// Number of non-blank rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Trimmed header labels; `""` marks an excluded column.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rule assigned to a column, if its code is registered.
    pub fn rule(&self, col: usize) -> Option<Rule> {
        self.rules.get(col).copied().flatten()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&'a CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Data rows with their absolute row index in the filtered sheet.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &'a [CellValue])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(DATA_START_ROW)
            .map(|(idx, row)| (idx, *row))
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(DATA_START_ROW)
    }
}
