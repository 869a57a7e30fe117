//! Enumerate candidate appointment start times for an open window.
//!
//! Walks a cursor from opening time in fixed granularity steps. A candidate is
//! kept only when the whole service fits before closing and does not touch the
//! break. Arithmetic runs on `NaiveDateTime` so a long service late in the day
//! cannot wrap past midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{BreakWindow, OpenWindow};

/// Half-open `[start, end)` interval on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, minutes: u32) -> Self {
        Self {
            start,
            end: start + Duration::minutes(i64::from(minutes)),
        }
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Candidate start times for a service of `duration_minutes` within `window`,
/// earliest first.
///
/// Returns an empty list when the window is too short for one slot, or when
/// either `duration_minutes` or `granularity_minutes` is zero.
pub fn enumerate_slots(
    date: NaiveDate,
    window: &OpenWindow,
    duration_minutes: u32,
    granularity_minutes: u32,
) -> Vec<NaiveTime> {
    if duration_minutes == 0 || granularity_minutes == 0 {
        return Vec::new();
    }

    let close = date.and_time(window.close);
    let step = Duration::minutes(i64::from(granularity_minutes));
    let blocked = window.break_window.map(|b| break_interval(date, &b));

    let mut slots = Vec::new();
    let mut cursor = date.and_time(window.open);

    loop {
        let candidate = Interval::new(cursor, duration_minutes);
        // A slot ending exactly at close still fits.
        if candidate.end > close {
            break;
        }
        let in_break = blocked.is_some_and(|b| candidate.overlaps(&b));
        if !in_break {
            slots.push(cursor.time());
        }
        cursor += step;
        // Stepping past midnight would restart the clock at 00:00.
        if cursor.date() != date {
            break;
        }
    }

    slots
}

fn break_interval(date: NaiveDate, window: &BreakWindow) -> Interval {
    Interval {
        start: date.and_time(window.start),
        end: date.and_time(window.end),
    }
}
