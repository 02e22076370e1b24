//! Date and name normalization.
//!
//! All functions here are total: any input, the empty string included,
//! yields a defined result and nothing panics.

use time::macros::format_description;
use time::{Date, Month};

/// Placeholder shown by [`year_label`] when no year can be found.
pub const UNKNOWN_YEAR: &str = "Unknown";

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Month number (1-12) for a three-letter English abbreviation.
pub fn month_number(token: &str) -> Option<u8> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(token))
        .map(|idx| idx as u8 + 1)
}

/// `"01 JAN 1900"` -> `"1900-01-01"`.
///
/// Exactly day, month and year are required. Qualified dates (`ABT 1900`),
/// partial dates (`JAN 1900`), unknown month names and days past the end of
/// the month (`31 FEB 1900`) yield `None`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let mut parts = raw.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = Month::try_from(month_number(month)?).ok()?;
    let date = Date::from_calendar_date(year.parse().ok()?, month, day.parse().ok()?).ok()?;

    date.format(format_description!("[year]-[month]-[day]")).ok()
}

/// Split an interchange name into (given, family).
///
/// `"John /Smith/"` gives `("John", "Smith")`. Without slashes the name is
/// split on its first space; a single word is all given name.
pub fn split_name(raw: &str) -> (String, String) {
    if let Some((given, rest)) = raw.split_once('/') {
        let family = rest.split_once('/').map_or(rest, |(family, _)| family);
        return (given.trim().to_owned(), family.trim().to_owned());
    }
    let raw = raw.trim();
    match raw.split_once(' ') {
        Some((given, family)) => (given.to_owned(), family.trim().to_owned()),
        None => (raw.to_owned(), String::new()),
    }
}

/// First standalone four-digit run, for display and grouping only.
pub fn extract_year(raw: &str) -> Option<u16> {
    let bytes = raw.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let end = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |n| start + n);
        if end - start == 4 {
            return raw[start..end].parse().ok();
        }
        start = end;
    }
    None
}

/// Year for display, or [`UNKNOWN_YEAR`].
pub fn year_label(raw: Option<&str>) -> String {
    raw.and_then(extract_year)
        .map_or_else(|| UNKNOWN_YEAR.to_owned(), |y| y.to_string())
}
