//! Report date parsing and first/last volunteer date formatting.

use chrono::NaiveDate;
use shoreline_debris_models::DateRange;

use crate::DebrisError;

/// Date format used by every report parameter and response.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` report date. Single-digit months and days are
/// accepted.
///
/// # Errors
///
/// Returns [`DebrisError::InvalidDate`] if the string is not a calendar
/// date.
pub fn parse_report_date(s: &str) -> Result<NaiveDate, DebrisError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|source| DebrisError::InvalidDate {
        value: s.to_string(),
        source,
    })
}

/// Formats the recorded date bounds of a location.
///
/// `None` (no records) yields an empty [`DateRange`].
#[must_use]
pub fn resolve_date_range(bounds: Option<(NaiveDate, NaiveDate)>) -> DateRange {
    bounds.map_or_else(DateRange::default, |(first, last)| DateRange {
        first_date: Some(first.format(DATE_FORMAT).to_string()),
        last_date: Some(last.format(DATE_FORMAT).to_string()),
    })
}
