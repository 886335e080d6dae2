use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::coord::CellRef;
use crate::rules::Rule;

// ---------------------------------------------------------------------------
// Cell findings
// ---------------------------------------------------------------------------

/// Why a single cell was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellErrorKind {
    /// Required cell has no value.
    Empty { header: String },
    /// Cell has a value that fails its column rule.
    Invalid { value: String, rule: Rule },
}

/// One rejected cell, in absolute sheet coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellError {
    pub cell: CellRef,
    pub kind: CellErrorKind,
}

impl CellError {
    pub fn empty(cell: CellRef, header: impl Into<String>) -> Self {
        Self {
            cell,
            kind: CellErrorKind::Empty {
                header: header.into(),
            },
        }
    }

    pub fn invalid(cell: CellRef, value: impl Into<String>, rule: Rule) -> Self {
        Self {
            cell,
            kind: CellErrorKind::Invalid {
                value: value.into(),
                rule,
            },
        }
    }

    /// Message text following the coordinate. Cells with equal messages in
    /// the same column consolidate into one block.
    pub fn message(&self) -> String {
        match &self.kind {
            CellErrorKind::Empty { header } => format!("bajo '{header}' vacía."),
            CellErrorKind::Invalid { value, rule } => {
                format!("('{value}') inválida. Se esperaba: {}.", rule.display_name())
            }
        }
    }
}

impl std::fmt::Display for CellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Celda {} {}", self.cell, self.message())
    }
}

// ---------------------------------------------------------------------------
// Consolidated blocks
// ---------------------------------------------------------------------------

/// A run of consecutive rows in one column sharing the same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBlock {
    pub col: usize,
    /// First row of the run (0-based).
    pub first_row: usize,
    /// Last row of the run (0-based), equal to `first_row` for single cells.
    pub last_row: usize,
    pub message: String,
}

impl ErrorBlock {
    pub fn start(&self) -> CellRef {
        CellRef::new(self.first_row, self.col)
    }

    /// End of the run, `None` when the block covers a single cell.
    pub fn end(&self) -> Option<CellRef> {
        (self.last_row != self.first_row).then(|| CellRef::new(self.last_row, self.col))
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.last_row - self.first_row + 1
    }
}

impl std::fmt::Display for ErrorBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end() {
            Some(end) => write!(f, "Celda {} hasta {} {}", self.start(), end, self.message),
            None => write!(f, "Celda {} {}", self.start(), self.message),
        }
    }
}

/// Blocks serialize as their rendered line.
impl Serialize for ErrorBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// One data row keyed by header label, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Report scalars read from the template's fixed cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(rename = "id_formato")]
    pub format_id: String,
    #[serde(rename = "Titulo")]
    pub title: String,
    #[serde(rename = "Nombre Corto")]
    pub short_name: String,
}

/// Result of reshaping a clean sheet into header-keyed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    #[serde(flatten)]
    pub meta: Metadata,
    #[serde(rename = "data")]
    pub records: Vec<Record>,
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// Findings of a run that rejected at least one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Findings {
    #[serde(rename = "nombre_corto")]
    pub short_name: String,
    /// Number of rejected cells before consolidation.
    pub cell_errors: usize,
    #[serde(rename = "errors")]
    pub blocks: Vec<ErrorBlock>,
}

/// Terminal state of a completed validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// At least one cell was rejected; no records are produced.
    Findings(Findings),
    /// Every checked cell passed; the sheet was reshaped into records.
    Clean(Extraction),
}

impl Outcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, Outcome::Clean(_))
    }

    pub fn short_name(&self) -> &str {
        match self {
            Outcome::Findings(findings) => &findings.short_name,
            Outcome::Clean(extraction) => &extraction.meta.short_name,
        }
    }

    /// Number of consolidated error blocks (0 when clean).
    pub fn error_count(&self) -> usize {
        match self {
            Outcome::Findings(findings) => findings.blocks.len(),
            Outcome::Clean(_) => 0,
        }
    }
}
