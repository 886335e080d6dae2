use serde::{Deserialize, Serialize};

/// Literal markers that count as "no value" when they are the whole cell text.
const NULL_MARKERS: [&str; 3] = ["nan", "none", "null"];

/// Raw value of a single cell as handed over by a loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Whether the cell carries no usable value.
    ///
    /// A real zero is a value: `0`, `0.0`, `"0"` and `"0.0"` are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed == "0" || trimmed == "0.0" {
                    return false;
                }
                trimmed.is_empty()
                    || NULL_MARKERS
                        .iter()
                        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
            }
        }
    }

    /// Whether the cell is blank padding: null, NaN, or whitespace-only text.
    ///
    /// Looser than [`CellValue::is_empty`]: literal `"null"` text is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Display text: empty string for nulls, integral numbers without a fraction.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
        }
    }

    /// Trimmed display text, used for labels and rule codes.
    pub fn label(&self) -> String {
        self.display().trim().to_string()
    }

    /// The value as a finite real number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => n.is_finite().then_some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<Option<&str>> for CellValue {
    fn from(s: Option<&str>) -> Self {
        s.map(CellValue::from).unwrap_or_default()
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

fn format_number(n: f64) -> String {
    // Integers without decimals, same as spreadsheet "General"
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
