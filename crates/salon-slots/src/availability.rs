//! Bookable slots for a service on a date, and day-level summaries for the
//! booking calendar.
//!
//! This is the entry point request handlers call. It fetches the schedule
//! through a [`ScheduleSource`], resolves the day's hours, enumerates
//! candidate start times, and marks those that collide with existing
//! bookings. Errors short-circuit and are returned unchanged; a closed day is
//! an empty list, not an error.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::conflict;
use crate::error::{Result, SalonError};
use crate::hours;
use crate::model::{Booking, ResolvedHours, Service, SlotPolicy, TimeSlot};
use crate::slots;
use crate::source::ScheduleSource;

/// Upper bound on the number of days one calendar request may cover.
pub const MAX_CALENDAR_DAYS: u32 = 366;

/// Per-day availability overview for the booking calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_reason: Option<String>,
    /// Candidate slots the service fits into, booked or not.
    pub total_slots: usize,
    pub available_slots: usize,
}

/// Compute the slots for `service` on a day whose hours are already resolved.
///
/// Pure: no I/O, no state. `bookings` may include cancelled bookings and other
/// dates; they are ignored.
pub fn slots_for_day(
    date: NaiveDate,
    service: &Service,
    resolved: &ResolvedHours,
    bookings: &[Booking],
    services: &[Service],
    policy: &SlotPolicy,
) -> Vec<TimeSlot> {
    let Some(window) = resolved.window() else {
        return Vec::new();
    };

    let candidates = slots::enumerate_slots(
        date,
        window,
        service.duration_minutes,
        policy.granularity_minutes,
    );
    if candidates.is_empty() {
        return Vec::new();
    }

    let busy = conflict::booking_intervals(date, bookings, services, policy.granularity_minutes);
    conflict::mark_conflicts(date, &candidates, service.duration_minutes, &busy)
}

/// Bookable slots for `service_id` on `date` (`YYYY-MM-DD`).
///
/// # Errors
/// - `SalonError::InvalidInput` for a malformed date, an empty service id, a
///   service with zero duration, or an invalid policy.
/// - `SalonError::NotFound` when the service does not exist.
/// - Any error the source returns.
pub fn get_available_slots<S>(
    date: &str,
    service_id: &str,
    source: &S,
    policy: &SlotPolicy,
) -> Result<Vec<TimeSlot>>
where
    S: ScheduleSource + ?Sized,
{
    policy.validate()?;
    let date = clock::parse_date(date)?;
    let service = resolve_service(source, service_id)?;

    let business_hours = source.list_business_hours()?;
    let special = source.find_special_date(date)?;
    let resolved = hours::resolve_hours(date, special.as_ref(), &business_hours, policy);
    if resolved.window().is_none() {
        return Ok(Vec::new());
    }

    let bookings = source.list_bookings(date)?;
    let services = source.list_services()?;
    Ok(slots_for_day(
        date, &service, &resolved, &bookings, &services, policy,
    ))
}

/// Summarize availability for `days` consecutive dates starting at `from`.
///
/// # Errors
/// Same as [`get_available_slots`], plus `InvalidInput` when `days` exceeds
/// [`MAX_CALENDAR_DAYS`].
pub fn find_available_days<S>(
    from: &str,
    days: u32,
    service_id: &str,
    source: &S,
    policy: &SlotPolicy,
) -> Result<Vec<DaySummary>>
where
    S: ScheduleSource + ?Sized,
{
    policy.validate()?;
    let start = clock::parse_date(from)?;
    if days > MAX_CALENDAR_DAYS {
        return Err(SalonError::InvalidInput(format!(
            "cannot summarize more than {} days, got {}",
            MAX_CALENDAR_DAYS, days
        )));
    }
    let service = resolve_service(source, service_id)?;
    if days == 0 {
        return Ok(Vec::new());
    }

    let business_hours = source.list_business_hours()?;
    let services = source.list_services()?;

    let mut summaries = Vec::with_capacity(days as usize);
    for offset in 0..days {
        let date = start + Duration::days(i64::from(offset));
        let special = source.find_special_date(date)?;
        let resolved = hours::resolve_hours(date, special.as_ref(), &business_hours, policy);

        let summary = match &resolved {
            ResolvedHours::Closed { reason } => DaySummary {
                date,
                open: false,
                closed_reason: reason.clone(),
                total_slots: 0,
                available_slots: 0,
            },
            ResolvedHours::Open(_) => {
                let bookings = source.list_bookings(date)?;
                let slots =
                    slots_for_day(date, &service, &resolved, &bookings, &services, policy);
                DaySummary {
                    date,
                    open: true,
                    closed_reason: None,
                    total_slots: slots.len(),
                    available_slots: slots.iter().filter(|s| s.available).count(),
                }
            }
        };
        summaries.push(summary);
    }

    Ok(summaries)
}

fn resolve_service<S>(source: &S, service_id: &str) -> Result<Service>
where
    S: ScheduleSource + ?Sized,
{
    let id = service_id.trim();
    if id.is_empty() {
        return Err(SalonError::InvalidInput("service id is required".to_string()));
    }
    let service = source
        .get_service(id)?
        .ok_or_else(|| SalonError::NotFound(format!("service '{}'", id)))?;
    if service.duration_minutes == 0 {
        return Err(SalonError::InvalidInput(format!(
            "service '{}' has no duration",
            id
        )));
    }
    Ok(service)
}
