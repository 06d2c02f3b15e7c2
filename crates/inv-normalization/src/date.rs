//! Date normalization to `YYYY-MM-DD`.
//!
//! Source dates come in two shapes: Spanish phrases such as "15 de marzo"
//! (no year) and ordinary calendar dates in assorted formats. The Spanish
//! pattern is tried first; anything else goes through the generic formats.
//! Unparseable values become `None`, never a partial date.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use inv_model::{LOCALE_YEAR_RANGE, RawValue};
use regex::Regex;

/// Lowercased values that mean "no date".
const BLANK_DATE_VALUES: &[&str] = &["nan", "nat", "none", ""];

/// "<day> de <month>", searched anywhere in the lowercased text.
static SPANISH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s+de\s+([a-z]+)").expect("Invalid Spanish date regex")
});

pub const SPANISH_MONTHS: [(&str, u32); 12] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

/// Month assumed when the word after "de" is not a month name.
const FALLBACK_MONTH: u32 = 1;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

// Two-digit years come first: `%Y` would otherwise accept "26" as year 26.
// Month-first is tried before day-first for ambiguous slash dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%d/%m/%y",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%b %d, %Y",
];

/// Normalize a raw date cell. See the module docs for the rule order.
pub fn normalize_date(value: &RawValue, locale_year: i32) -> Option<String> {
    let text = value.as_text();
    let folded = text.trim().to_lowercase();
    if BLANK_DATE_VALUES.contains(&folded.as_str()) {
        return None;
    }
    if let Some(date) = match_spanish_date(&folded, locale_year) {
        return date.map(format_date);
    }
    parse_calendar_date(text.trim()).map(format_date)
}

/// Try the Spanish "<day> de <month>" pattern.
///
/// Returns `None` when the pattern does not occur, and `Some(None)` when it
/// occurs but names an impossible day (e.g. "31 de febrero") or the year is
/// outside `1..=9999`.
pub fn match_spanish_date(folded: &str, locale_year: i32) -> Option<Option<NaiveDate>> {
    let captures = SPANISH_DATE_REGEX.captures(folded)?;
    let day = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok());
    let month = captures
        .get(2)
        .map_or(FALLBACK_MONTH, |m| spanish_month(m.as_str()).unwrap_or(FALLBACK_MONTH));
    Some(
        day.and_then(|day| NaiveDate::from_ymd_opt(locale_year, month, day))
            .and_then(in_range),
    )
}

pub fn spanish_month(name: &str) -> Option<u32> {
    SPANISH_MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
}

/// Generic calendar-date parsing over the supported formats.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return in_range(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return in_range(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return in_range(date);
        }
    }
    None
}

fn in_range(date: NaiveDate) -> Option<NaiveDate> {
    LOCALE_YEAR_RANGE.contains(&date.year()).then_some(date)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
