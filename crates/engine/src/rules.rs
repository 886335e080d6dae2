//! Rule registry: maps the rule codes found in the template's rule row to
//! type checks.
//!
//! Codes are fixed by the SIPOT templates. Any code not listed here means the
//! column only gets the emptiness check.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::cell::CellValue;
use crate::dates::parse_loose_date;

/// `HH:MM` or `HH:MM:SS`, 24-hour clock.
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])(:([0-5][0-9]))?$").expect("valid time pattern")
});

/// Rule code used when the rule row has no entry for a column.
pub const NO_RULE: &str = "0";

/// A type rule a column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Number,
    Date,
    Time,
    Currency,
    Url,
    Year,
    /// Second date code used by some templates; same check as `Date`.
    DateAlt,
}

impl Rule {
    /// Every registered rule, in code order.
    pub const ALL: [Rule; 7] = [
        Rule::Number,
        Rule::Date,
        Rule::Time,
        Rule::Currency,
        Rule::Url,
        Rule::Year,
        Rule::DateAlt,
    ];

    /// Look up a rule by its code. Unknown codes have no rule.
    pub fn from_code(code: &str) -> Option<Rule> {
        match code {
            "3" => Some(Rule::Number),
            "4" => Some(Rule::Date),
            "5" => Some(Rule::Time),
            "6" => Some(Rule::Currency),
            "7" => Some(Rule::Url),
            "12" => Some(Rule::Year),
            "13" => Some(Rule::DateAlt),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rule::Number => "3",
            Rule::Date => "4",
            Rule::Time => "5",
            Rule::Currency => "6",
            Rule::Url => "7",
            Rule::Year => "12",
            Rule::DateAlt => "13",
        }
    }

    /// Name shown to the user in "Se esperaba: ..." messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Rule::Number => "Número",
            Rule::Date | Rule::DateAlt => "Fecha",
            Rule::Time => "Hora (HH:MM)",
            Rule::Currency => "Moneda",
            Rule::Url => "URL",
            Rule::Year => "Año (4 dígitos)",
        }
    }

    /// Whether a non-empty value satisfies this rule.
    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            Rule::Number | Rule::Currency => is_number(value),
            Rule::Date | Rule::DateAlt => is_date(value),
            Rule::Time => is_time(value),
            Rule::Url => is_url(value),
            Rule::Year => is_year(value),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Rule code of a rule-row cell: the text before any decimal point, so a
/// spreadsheet number `12.0` and the text `"12"` select the same rule.
pub fn rule_code(cell: Option<&CellValue>) -> String {
    let label = match cell {
        Some(value) if !value.is_blank() => value.label(),
        _ => return NO_RULE.to_string(),
    };
    match label.split_once('.') {
        Some((head, _)) => head.to_string(),
        None => label,
    }
}

/// Resolve the rule for a rule-row cell.
pub fn rule_for(cell: Option<&CellValue>) -> Option<Rule> {
    Rule::from_code(&rule_code(cell))
}

fn is_number(value: &CellValue) -> bool {
    value.as_number().is_some()
}

fn is_date(value: &CellValue) -> bool {
    parse_loose_date(&value.display()).is_some()
}

fn is_time(value: &CellValue) -> bool {
    TIME_PATTERN.is_match(value.display().trim())
}

fn is_url(value: &CellValue) -> bool {
    let lowered = value.display().trim().to_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn is_year(value: &CellValue) -> bool {
    if !is_number(value) {
        return false;
    }
    let text = value.display();
    let integer_part = text.trim().split('.').next().unwrap_or_default();
    integer_part.len() == 4 && integer_part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_registry_codes() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_code(rule.code()), Some(rule));
        }
        assert_eq!(Rule::from_code("0"), None);
        assert_eq!(Rule::from_code("1"), None);
        assert_eq!(Rule::from_code("99"), None);
        assert_eq!(Rule::Date.display_name(), Rule::DateAlt.display_name());
    }

    #[test]
    fn test_rule_code_from_cell() {
        assert_eq!(rule_code(None), NO_RULE);
        assert_eq!(rule_code(Some(&CellValue::Empty)), NO_RULE);
        assert_eq!(rule_code(Some(&text("12"))), "12");
        assert_eq!(rule_code(Some(&text("12.0"))), "12");
        assert_eq!(rule_code(Some(&text(" 3 "))), "3");
        assert_eq!(rule_code(Some(&CellValue::Number(13.0))), "13");
        assert_eq!(rule_for(Some(&text("7.0"))), Some(Rule::Url));
        assert_eq!(rule_for(Some(&text("2"))), None);
    }

    #[test]
    fn test_number_and_currency() {
        assert!(Rule::Number.matches(&text("42")));
        assert!(Rule::Number.matches(&text("-3.75")));
        assert!(Rule::Number.matches(&text("0")));
        assert!(Rule::Currency.matches(&text("1500.00")));
        assert!(Rule::Currency.matches(&CellValue::Number(99.5)));
        assert!(!Rule::Number.matches(&text("12a")));
        assert!(!Rule::Number.matches(&text("1,500")));
        assert!(!Rule::Currency.matches(&text("$100")));
        assert!(!Rule::Number.matches(&text("inf")));
    }

    #[test]
    fn test_date() {
        assert!(Rule::Date.matches(&text("2024-01-31")));
        assert!(Rule::DateAlt.matches(&text("31/01/2024")));
        assert!(!Rule::Date.matches(&text("mañana")));
        assert!(!Rule::DateAlt.matches(&text("2024-02-30")));
    }

    #[test]
    fn test_partial_dates_fill_from_today() {
        // Spreadsheet time cells load as HH:MM:SS
        assert!(Rule::Date.matches(&text("18:00:00")));
        assert!(Rule::DateAlt.matches(&text("10:30")));
        assert!(Rule::Date.matches(&text("2024")));
        assert!(Rule::Date.matches(&CellValue::Number(2024.0)));
        assert!(Rule::DateAlt.matches(&text("ene 2024")));
        assert!(Rule::Date.matches(&text("1/2/345")));
    }

    #[test]
    fn test_time() {
        assert!(Rule::Time.matches(&text("08:30")));
        assert!(Rule::Time.matches(&text(" 23:59:59 ")));
        assert!(Rule::Time.matches(&text("00:00")));
        assert!(!Rule::Time.matches(&text("24:00")));
        assert!(!Rule::Time.matches(&text("8:30")));
        assert!(!Rule::Time.matches(&text("12:60")));
        assert!(!Rule::Time.matches(&text("12:30:5")));
        assert!(!Rule::Time.matches(&text("12:30 pm")));
    }

    #[test]
    fn test_url() {
        assert!(Rule::Url.matches(&text("https://www.gob.mx/sipot")));
        assert!(Rule::Url.matches(&text("  HTTP://EXAMPLE.COM")));
        assert!(!Rule::Url.matches(&text("www.gob.mx")));
        assert!(!Rule::Url.matches(&text("ftp://files.gob.mx")));
    }

    #[test]
    fn test_year() {
        assert!(Rule::Year.matches(&text("2023")));
        assert!(Rule::Year.matches(&text("2023.0")));
        assert!(Rule::Year.matches(&CellValue::Number(2023.0)));
        assert!(!Rule::Year.matches(&text("202")));
        assert!(!Rule::Year.matches(&text("20234")));
        assert!(!Rule::Year.matches(&text("abcd")));
        assert!(!Rule::Year.matches(&text("-202")));
    }
}
