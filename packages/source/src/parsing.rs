//! Shared cell parsing for CSV datasets.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-only layouts accepted in the `Date` column.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y"];

/// Date-time layouts accepted in the `Date` column; the time is dropped.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a `Date` cell. Returns `None` if no known layout matches.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    None
}

/// Parses an optional `Risk_Score` cell.
///
/// An empty cell is `Ok(None)`; anything else must be a number.
///
/// # Errors
///
/// Returns the parse error if the cell is non-empty and not a number.
pub fn parse_optional_score(s: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<f64>().map(Some)
}
