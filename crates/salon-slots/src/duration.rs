//! Parse free-text service duration labels into minutes.
//!
//! Services should carry an explicit `duration_minutes`; this parser exists to
//! import catalogues that only have a display label such as `"4-6 hours"`.
//! Ranges resolve to their upper bound so a booking never reserves less time
//! than the service can take.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SalonError};

const NUMBER: &str = r"\d+(?:\.\d+)?";
const UNIT: &str = r"hours|hour|hrs|hr|h|minutes|minute|mins|min|m";

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^({NUMBER})\s*(?:-|to)\s*({NUMBER})\s*({UNIT})$");
    Regex::new(&pattern).expect("valid regex")
});

static COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^(?:{NUMBER}\s*(?:{UNIT})\s*)+$");
    Regex::new(&pattern).expect("valid regex")
});

static TERM: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"({NUMBER})\s*({UNIT})");
    Regex::new(&pattern).expect("valid regex")
});

/// Parse a duration label into whole minutes.
///
/// Accepted shapes:
/// - raw minutes: `"90"`
/// - single quantity: `"45 min"`, `"2 hours"`, `"1.5 hrs"`, `"3h"`
/// - range: `"4-6 hours"`, `"30–45 min"`, `"2 to 3 hours"` (upper bound wins)
/// - compound: `"1h 30m"`, `"1 hour and 30 minutes"`
///
/// # Errors
/// Returns `SalonError::InvalidInput` for labels that match none of these, or
/// that resolve to zero minutes.
pub fn parse_duration_label(label: &str) -> Result<u32> {
    let normalized = label
        .trim()
        .to_lowercase()
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace(" and ", " ");
    if normalized.is_empty() {
        return Err(SalonError::InvalidInput("duration label is empty".to_string()));
    }

    let minutes = if let Ok(raw) = normalized.parse::<u32>() {
        raw
    } else if let Some(minutes) = parse_range(&normalized)? {
        minutes
    } else if let Some(minutes) = parse_compound(&normalized)? {
        minutes
    } else {
        return Err(unrecognized(label));
    };

    if minutes == 0 {
        return Err(SalonError::InvalidInput(format!(
            "duration label '{}' resolves to zero minutes",
            label
        )));
    }
    Ok(minutes)
}

fn parse_range(label: &str) -> Result<Option<u32>> {
    let Some(caps) = RANGE.captures(label) else {
        return Ok(None);
    };
    let low = number(&caps[1])?;
    let high = number(&caps[2])?;
    if high < low {
        return Err(SalonError::InvalidInput(format!(
            "duration range '{}' is inverted",
            label
        )));
    }
    Ok(Some(to_minutes(high, &caps[3])))
}

fn parse_compound(label: &str) -> Result<Option<u32>> {
    if !COMPOUND.is_match(label) {
        return Ok(None);
    }
    let mut total = 0u32;
    for caps in TERM.captures_iter(label) {
        let value = number(&caps[1])?;
        total = total.saturating_add(to_minutes(value, &caps[2]));
    }
    Ok(Some(total))
}

fn to_minutes(value: f64, unit: &str) -> u32 {
    let minutes = if unit.starts_with('h') {
        value * 60.0
    } else {
        value
    };
    minutes.round() as u32
}

fn number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|e| SalonError::InvalidInput(format!("Invalid number '{}': {}", s, e)))
}

fn unrecognized(label: &str) -> SalonError {
    SalonError::InvalidInput(format!("Unrecognized duration label '{}'", label))
}
