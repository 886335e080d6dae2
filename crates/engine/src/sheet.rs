use serde::{Deserialize, Serialize};

use super::cell::CellValue;

/// A loaded worksheet: rows of raw cell values, padded to a uniform width.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Sheet {
    /// Build a sheet from ragged rows. Short rows are padded with `Empty`.
    pub fn new(name: impl Into<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self {
            name: name.into(),
            rows,
            width,
        }
    }

    /// Build a sheet from text rows; `""` becomes `Empty`.
    pub fn from_text_rows<R, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|s| CellValue::from(s.as_ref()))
                    .collect::<Vec<_>>()
            })
            .collect();
        Self::new(name, rows)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Set a cell, growing the sheet as needed.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if col >= self.width {
            self.width = col + 1;
            for r in &mut self.rows {
                r.resize(self.width, CellValue::Empty);
            }
        }
        if row >= self.rows.len() {
            self.rows.resize(row + 1, vec![CellValue::Empty; self.width]);
        }
        self.rows[row][col] = value;
    }
}

/// Whether every cell of a row is blank padding.
pub fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}
