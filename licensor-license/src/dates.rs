//! Lenient date parsing for imported attribute maps.
//!
//! Imported licenses may come from older or foreign writers, so a date that
//! cannot be read is treated as absent instead of failing the import.
//! Required dates are then caught by validation.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads a calendar date. Accepts `YYYY-MM-DD`, optionally followed by a time
/// component (`T...` or ` ...`), which is ignored.
pub fn parse_date_lenient(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    let (date, rest) = NaiveDate::parse_and_remainder(text, DATE_FORMAT).ok()?;
    (rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')).then_some(date)
}

/// Reads a date-time. Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS +ZZZZ`, an
/// offset-less date-time (taken as UTC), or a bare date (midnight UTC).
pub fn parse_datetime_lenient(value: &Value) -> Option<DateTime<FixedOffset>> {
    let text = value.as_str()?.trim();
    let utc = FixedOffset::east_opt(0)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().with_timezone(&utc))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a date-time as `YYYY-MM-DDTHH:MM:SS+HH:MM`.
pub fn format_datetime(datetime: &DateTime<FixedOffset>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, false)
}
