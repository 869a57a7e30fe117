//! Resolve the effective opening hours for a calendar date.
//!
//! A special date for the exact day always wins over the weekly schedule.
//! Otherwise the weekday's business hours apply; a missing weekday entry means
//! the salon is closed.

use chrono::{Datelike, NaiveDate};

use crate::model::{BusinessHours, OpenWindow, ResolvedHours, SlotPolicy, SpecialDate};

/// Weekday index with Sunday as 0, matching `BusinessHours::day_of_week`.
pub fn day_of_week(date: NaiveDate) -> u8 {
    // num_days_from_sunday() is always in 0..=6.
    date.weekday().num_days_from_sunday() as u8
}

/// Resolve the hours for `date`.
///
/// `special` is the override for that date, if one exists. An open special
/// date with a missing open or close time falls back to the policy's default
/// window for that end. Special dates never carry a break.
pub fn resolve_hours(
    date: NaiveDate,
    special: Option<&SpecialDate>,
    business_hours: &[BusinessHours],
    policy: &SlotPolicy,
) -> ResolvedHours {
    if let Some(special) = special.filter(|s| s.date == date) {
        if !special.is_open {
            return ResolvedHours::Closed {
                reason: Some(special.name.clone()),
            };
        }
        return ResolvedHours::Open(OpenWindow {
            open: special.open_time.unwrap_or(policy.fallback_open),
            close: special.close_time.unwrap_or(policy.fallback_close),
            break_window: None,
        });
    }

    let dow = day_of_week(date);
    match business_hours.iter().find(|h| h.day_of_week == dow) {
        Some(hours) if hours.is_open => ResolvedHours::Open(OpenWindow {
            open: hours.open_time,
            close: hours.close_time,
            break_window: hours.break_window(),
        }),
        _ => ResolvedHours::Closed { reason: None },
    }
}

/// Find the special date for `date` in a full list of overrides.
pub fn find_special_date(date: NaiveDate, special_dates: &[SpecialDate]) -> Option<&SpecialDate> {
    special_dates.iter().find(|s| s.date == date)
}
