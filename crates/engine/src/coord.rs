//! Spreadsheet-style cell coordinates.
//!
//! Rows and columns are 0-based internally and rendered as `A1` labels.

use serde::Serialize;

/// A cell position within a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellRef {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl CellRef {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Column letters only, e.g. `AB`.
    pub fn column_label(&self) -> String {
        col_to_letters(self.col)
    }

    /// 1-based row number as shown in a spreadsheet.
    pub fn row_number(&self) -> usize {
        self.row + 1
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", col_to_letters(self.col), self.row + 1)
    }
}

/// Render a 0-based (row, col) pair as a spreadsheet label, e.g. `(11, 26)` -> `AA12`.
pub fn to_label(row: usize, col: usize) -> String {
    CellRef::new(row, col).to_string()
}

/// Convert 0-based column index to Excel-style letter(s): 0=A, 25=Z, 26=AA.
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
