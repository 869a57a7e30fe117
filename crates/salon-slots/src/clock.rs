//! Calendar date and wall-clock time parsing.
//!
//! Dates are strict ISO `YYYY-MM-DD`. Times are 24-hour `HH:MM`; `HH:MM:SS` is
//! also accepted on input because SQL `time` columns come back in that shape.
//! Output is always `HH:MM`.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Result, SalonError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";

/// Parse an ISO `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `SalonError::InvalidInput` for empty or malformed strings, and for
/// impossible calendar dates such as `2026-02-30`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SalonError::InvalidInput("date is required".to_string()));
    }
    // chrono accepts a single-digit month/day for %m/%d; callers must send the
    // zero-padded ISO form.
    if trimmed.len() != 10 {
        return Err(SalonError::InvalidInput(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            s
        )));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| SalonError::InvalidInput(format!("Invalid date '{}': {}", s, e)))
}

/// Parse a 24-hour `HH:MM` (or `HH:MM:SS`) wall-clock time.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_FORMAT_SECONDS))
        .map_err(|e| SalonError::InvalidInput(format!("Invalid time '{}': {}", s, e)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Serde adapter for `NaiveTime` fields stored as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `"HH:MM"` fields. Missing, null, and empty
/// strings all decode to `None`.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_some(&super::format_time(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_time(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
