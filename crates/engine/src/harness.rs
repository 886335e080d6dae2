//! Test harness for building SIPOT template sheets.
//!
//! `TemplateBuilder` lays out the seven fixed template rows (format id, title
//! block, rule row, header row) so tests only spell out what they care about.

use crate::cell::CellValue;
use crate::sheet::Sheet;

/// Builder for a sheet in the fixed SIPOT layout.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    format_id: String,
    title: String,
    short_name: String,
    rules: Vec<String>,
    headers: Vec<String>,
    data: Vec<Vec<CellValue>>,
}

impl TemplateBuilder {
    pub fn new(rules: &[&str], headers: &[&str]) -> Self {
        Self {
            format_id: "FMT-01".to_string(),
            title: "Informe trimestral".to_string(),
            short_name: "LGTA70FI".to_string(),
            rules: rules.iter().map(|s| s.to_string()).collect(),
            headers: headers.iter().map(|s| s.to_string()).collect(),
            data: Vec::new(),
        }
    }

    pub fn short_name(mut self, short_name: &str) -> Self {
        self.short_name = short_name.to_string();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Append a text data row; `""` is an empty cell.
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.data.push(cells.iter().map(|s| CellValue::from(*s)).collect());
        self
    }

    /// Append a data row of raw cell values.
    pub fn values(mut self, cells: Vec<CellValue>) -> Self {
        self.data.push(cells);
        self
    }

    /// Append `count` copies of the same row.
    pub fn repeat(mut self, count: usize, cells: &[&str]) -> Self {
        for _ in 0..count {
            self = self.row(cells);
        }
        self
    }

    /// Blank template rows are dropped by the validator like any other blank
    /// row, so tests that need the fixed positions keep every row non-blank.
    pub fn build(self) -> Sheet {
        let text_row = |cells: &[String]| -> Vec<CellValue> {
            cells.iter().map(|s| CellValue::from(s.as_str())).collect()
        };

        let mut rows: Vec<Vec<CellValue>> = vec![
            vec![CellValue::text(self.format_id)],
            vec![CellValue::text("Sujeto obligado")],
            vec![
                CellValue::from(self.title.as_str()),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::from(self.short_name.as_str()),
            ],
            text_row(&self.rules),
            vec![CellValue::text("Tipo de dato")],
            vec![CellValue::text("Descripción")],
            text_row(&self.headers),
        ];
        rows.extend(self.data);
        Sheet::new("harness", rows)
    }
}
