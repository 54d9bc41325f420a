//! Shared utility functions for the space-weather dashboard crates.

/// UTC time helpers.
///
/// The API speaks unix seconds; the UI shows UTC wall-clock strings. Everything
/// here is timezone-free on purpose: there is no local time anywhere in the app.
pub mod dates {
    use crate::error::DateError;
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

    pub const SECONDS_PER_HOUR: i64 = 3600;
    pub const SECONDS_PER_DAY: i64 = 86400;

    /// Formats accepted by [`parse_time_input`] after RFC 3339 has been tried.
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    /// Convert (possibly fractional) unix seconds to a UTC timestamp.
    pub fn from_unix(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
    }

    /// Whole unix seconds for a UTC timestamp.
    pub fn to_unix(time: &DateTime<Utc>) -> i64 {
        time.timestamp()
    }

    /// Format a timestamp as "YYYY-MM-DD"
    pub fn format_date(time: &DateTime<Utc>) -> String {
        time.format("%Y-%m-%d").to_string()
    }

    /// Format a timestamp as "YYYY-MM-DD HH:MM:SS"
    pub fn format_date_time(time: &DateTime<Utc>) -> String {
        time.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Compact `DD'HH` label used on the circles plot time axis.
    pub fn format_day_hour(seconds: f64) -> String {
        match from_unix(seconds) {
            Some(t) => format!("{:02}'{:02}", t.day(), t.hour()),
            None => String::new(),
        }
    }

    /// Parse user-typed time input as UTC.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS]`, `YYYY-MM-DD`, `YYYY-MM`
    /// and a bare `YYYY`. A space-separated date time is read as UTC, never
    /// as local time.
    pub fn parse_time_input(input: &str) -> Result<DateTime<Utc>, DateError> {
        let s = input.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(t.with_timezone(&Utc));
        }
        let s = s.strip_suffix('Z').unwrap_or(s);
        for format in DATETIME_FORMATS {
            if let Ok(t) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(t.and_utc());
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(midnight(d));
        }
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(midnight(d));
        }
        if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(d) = s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)) {
                return Ok(midnight(d));
            }
        }
        Err(DateError(input.to_string()))
    }

    /// Round unix seconds to the nearest whole hour.
    pub fn snap_to_hour(seconds: f64) -> i64 {
        (seconds / SECONDS_PER_HOUR as f64).round() as i64 * SECONDS_PER_HOUR
    }

    /// Truncate unix seconds to the start of their UTC day.
    pub fn floor_to_day(seconds: i64) -> i64 {
        seconds.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY
    }

    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::default()).and_utc()
    }

}

/// Error types
pub mod error {
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("Date error: cannot parse {0:?}")]
    pub struct DateError(pub String);
}
