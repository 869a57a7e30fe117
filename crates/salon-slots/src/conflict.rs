//! Mark candidate slots that collide with existing bookings.
//!
//! A slot `[start, start + duration)` is unavailable when it overlaps any busy
//! booking interval. Adjacent intervals (one ends exactly when the other
//! starts) are NOT conflicts.

use chrono::{NaiveDate, NaiveTime};

use crate::model::{Booking, Service, TimeSlot};
use crate::slots::Interval;

/// Busy intervals for the active bookings on `date`.
///
/// Cancelled bookings and bookings on other dates are dropped. Each booking
/// lasts as long as the service its `service_type` names; unknown service
/// types occupy `fallback_minutes`.
pub fn booking_intervals(
    date: NaiveDate,
    bookings: &[Booking],
    services: &[Service],
    fallback_minutes: u32,
) -> Vec<Interval> {
    bookings
        .iter()
        .filter(|b| b.date == date && b.status.occupies_time())
        .map(|b| {
            let minutes = services
                .iter()
                .find(|s| s.matches(&b.service_type))
                .map_or(fallback_minutes, |s| s.duration_minutes);
            Interval::new(date.and_time(b.time), minutes)
        })
        .collect()
}

/// Flag each candidate start time as available or not.
///
/// Order is preserved from `candidates`.
pub fn mark_conflicts(
    date: NaiveDate,
    candidates: &[NaiveTime],
    duration_minutes: u32,
    busy: &[Interval],
) -> Vec<TimeSlot> {
    candidates
        .iter()
        .map(|&time| {
            let slot = Interval::new(date.and_time(time), duration_minutes);
            TimeSlot {
                time,
                available: !busy.iter().any(|b| slot.overlaps(b)),
            }
        })
        .collect()
}
