//! Loose calendar-date parsing for rule-checked cells.
//!
//! Accepts the shapes people actually type into report templates: ISO dates,
//! day-first numeric dates (falling back to month-first), compact `YYYYMMDD`,
//! English or Spanish month names, and an optional time of day. Partial
//! dates (`2024`, `ene 2024`, `15`, a bare `10:30`) take their missing parts
//! from today.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Time of day at the end of the value (or making up all of it), optionally
/// with seconds, fraction, am/pm and zone.
static TIME_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|t|\s+)([0-9]{1,2}):([0-9]{2})(?::([0-9]{2})(?:\.[0-9]+)?)?\s*(?:[ap]\.?\s?m\.?)?\s*(?:z|[+-][0-9]{2}:?[0-9]{2})?$",
    )
    .expect("valid time suffix pattern")
});

/// Filler words in long-form Spanish dates ("15 de enero de 2024").
const FILLER_WORDS: [&str; 2] = ["de", "del"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Digits(&'a str),
    Month(u32),
}

/// Parse `input` as a calendar date, or `None` if no supported shape matches.
pub fn parse_loose_date(input: &str) -> Option<NaiveDate> {
    parse_loose_date_with_default(input, Local::now().date_naive())
}

/// Like [`parse_loose_date`], filling missing year, month or day from `default`.
pub fn parse_loose_date_with_default(input: &str, default: NaiveDate) -> Option<NaiveDate> {
    let lowered = input.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let (date_part, has_time) = strip_time_suffix(&lowered)?;

    if date_part.len() == 8 && date_part.bytes().all(|b| b.is_ascii_digit()) {
        return ymd(&date_part[0..4], &date_part[4..6], &date_part[6..8]);
    }

    let tokens: Vec<Token> = date_part
        .split(|c: char| matches!(c, '-' | '/' | '.' | ',' | ' ' | '\t'))
        .filter(|t| !t.is_empty() && !FILLER_WORDS.contains(t))
        .map(classify_token)
        .collect::<Option<Vec<_>>>()?;

    match tokens.as_slice() {
        // Time only
        [] if has_time => Some(default),
        [Token::Digits(a)] => single_number(a, default),
        [Token::Month(m)] => with_clamped_day(default.year(), *m, default.day()),
        [Token::Month(m), Token::Digits(a)] | [Token::Digits(a), Token::Month(m)] => {
            month_and_number(*m, a, default)
        }
        [Token::Digits(a), Token::Digits(b)] => numeric_pair(a, b, default),
        [Token::Digits(a), Token::Digits(b), Token::Digits(c)] => numeric_triple(a, b, c),
        [Token::Month(m), Token::Digits(a), Token::Digits(b)]
        | [Token::Digits(a), Token::Month(m), Token::Digits(b)] => named_month(*m, a, b),
        [Token::Digits(a), Token::Digits(b), Token::Month(m)] if a.len() >= 3 => {
            // 2024 15 jan
            let year = normalize_year(a)?;
            NaiveDate::from_ymd_opt(year, *m, b.parse().ok()?)
        }
        _ => None,
    }
}

/// Remove a time of day, validating its ranges. Returns the date part and
/// whether a time was present.
fn strip_time_suffix(s: &str) -> Option<(&str, bool)> {
    let Some(caps) = TIME_SUFFIX.captures(s) else {
        return Some((s, false));
    };
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
    let second: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    let start = caps.get(0)?.start();
    Some((s[..start].trim_end(), true))
}

fn classify_token(token: &str) -> Option<Token<'_>> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Token::Digits(token));
    }
    month_from_name(token).map(Token::Month)
}

/// A number that can only be a year: three or more digits, or past 31.
fn looks_like_year(digits: &str) -> bool {
    digits.len() >= 3 || digits.parse::<u32>().map_or(false, |v| v > 31)
}

/// `15` is a day of the current month, `2024` or `345` a year.
fn single_number(a: &str, default: NaiveDate) -> Option<NaiveDate> {
    if looks_like_year(a) {
        return with_clamped_day(normalize_year(a)?, default.month(), default.day());
    }
    if a.len() > 2 {
        return None;
    }
    default.with_day(a.parse().ok()?)
}

/// `ene 2024` or `15 ene`.
fn month_and_number(month: u32, a: &str, default: NaiveDate) -> Option<NaiveDate> {
    if looks_like_year(a) {
        return with_clamped_day(normalize_year(a)?, month, default.day());
    }
    NaiveDate::from_ymd_opt(default.year(), month, a.parse().ok()?)
}

/// `01/2024`, `2024-01`, or a day and month in either order.
fn numeric_pair(a: &str, b: &str, default: NaiveDate) -> Option<NaiveDate> {
    let month_year = |month: &str, year: &str| {
        if month.len() > 2 {
            return None;
        }
        with_clamped_day(normalize_year(year)?, month.parse().ok()?, default.day())
    };
    if looks_like_year(a) {
        return month_year(b, a);
    }
    if looks_like_year(b) {
        return month_year(a, b);
    }
    ymd_in(default.year(), b, a).or_else(|| ymd_in(default.year(), a, b))
}

fn numeric_triple(a: &str, b: &str, c: &str) -> Option<NaiveDate> {
    if a.len() >= 3 {
        return ymd(a, b, c);
    }
    // Day first, month first only when the day-first reading is impossible
    ymd(c, b, a).or_else(|| ymd(c, a, b))
}

fn named_month(month: u32, a: &str, b: &str) -> Option<NaiveDate> {
    let (day, year) = if a.len() >= 3 { (b, a) } else { (a, b) };
    if day.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(normalize_year(year)?, month, day.parse().ok()?)
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    ymd_in(normalize_year(year)?, month, day)
}

fn ymd_in(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    if month.len() > 2 || day.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// A defaulted day past the end of the month becomes its last day.
fn with_clamped_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day.min(31))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

/// Three- and four-digit years as-is; one- and two-digit years pivot at 69
/// (0-68 -> 20xx).
fn normalize_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    match year.len() {
        3 | 4 if value > 0 => Some(value),
        1 | 2 if value < 69 => Some(2000 + value),
        1 | 2 => Some(1900 + value),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name {
        "ene" | "enero" | "jan" | "january" => 1,
        "feb" | "febrero" | "february" => 2,
        "mar" | "marzo" | "march" => 3,
        "abr" | "abril" | "apr" | "april" => 4,
        "may" | "mayo" => 5,
        "jun" | "junio" | "june" => 6,
        "jul" | "julio" | "july" => 7,
        "ago" | "agosto" | "aug" | "august" => 8,
        "sep" | "sept" | "set" | "septiembre" | "setiembre" | "september" => 9,
        "oct" | "octubre" | "october" => 10,
        "nov" | "noviembre" | "november" => 11,
        "dic" | "diciembre" | "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}
