//! Read interface to the schedule data the engine consumes, plus an
//! in-memory store that implements it.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability;
use crate::clock;
use crate::error::{Result, SalonError};
use crate::hours;
use crate::model::{
    Booking, BookingStatus, BusinessHours, Service, SlotPolicy, SpecialDate,
};

/// Where the engine reads business hours, overrides, bookings, and services.
///
/// Implementations backed by a database should issue one read per call; the
/// engine never writes through this trait.
pub trait ScheduleSource {
    fn list_business_hours(&self) -> Result<Vec<BusinessHours>>;

    fn find_special_date(&self, date: NaiveDate) -> Result<Option<SpecialDate>>;

    /// Bookings on `date` that still hold their time (cancelled ones excluded).
    fn list_bookings(&self, date: NaiveDate) -> Result<Vec<Booking>>;

    fn get_service(&self, service_id: &str) -> Result<Option<Service>>;

    fn list_services(&self) -> Result<Vec<Service>>;
}

/// A booking as submitted by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub service_id: String,
}

/// A complete schedule held in memory.
///
/// Serializes to and from the same JSON shape the web client sends, so one
/// snapshot can back the CLI, the WASM bindings, and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemorySchedule {
    pub business_hours: Vec<BusinessHours>,
    pub special_dates: Vec<SpecialDate>,
    pub bookings: Vec<Booking>,
    pub services: Vec<Service>,
}

impl InMemorySchedule {
    /// Parse a JSON snapshot and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let schedule: Self = serde_json::from_str(json)
            .map_err(|e| SalonError::InvalidInput(format!("Invalid schedule JSON: {}", e)))?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check every weekday entry, and that weekdays, special dates, and
    /// service ids are not duplicated.
    pub fn validate(&self) -> Result<()> {
        let mut weekdays = HashSet::new();
        for day in &self.business_hours {
            day.validate()?;
            if !weekdays.insert(day.day_of_week) {
                return Err(SalonError::InvalidInput(format!(
                    "duplicate business hours for day {}",
                    day.day_of_week
                )));
            }
        }

        let mut dates = HashSet::new();
        for special in &self.special_dates {
            if !dates.insert(special.date) {
                return Err(SalonError::InvalidInput(format!(
                    "duplicate special date {}",
                    clock::format_date(special.date)
                )));
            }
            if let (Some(open), Some(close)) = (special.open_time, special.close_time) {
                if special.is_open && open >= close {
                    return Err(SalonError::InvalidInput(format!(
                        "special date {}: open time must be before close time",
                        clock::format_date(special.date)
                    )));
                }
            }
        }

        let mut ids = HashSet::new();
        for service in &self.services {
            if service.id.trim().is_empty() {
                return Err(SalonError::InvalidInput(format!(
                    "service '{}' has an empty id",
                    service.name
                )));
            }
            if !ids.insert(service.id.as_str()) {
                return Err(SalonError::InvalidInput(format!(
                    "duplicate service id '{}'",
                    service.id
                )));
            }
        }

        Ok(())
    }

    /// Check that the requested slot is free and record the booking as
    /// `pending`.
    ///
    /// The check and the insert happen under the same exclusive borrow, so two
    /// requests against one store cannot both claim a slot.
    ///
    /// # Errors
    /// Anything [`availability::get_available_slots`] returns, plus
    /// `SalonError::SlotUnavailable` when the time is not a free slot.
    pub fn book(&mut self, request: &BookingRequest, policy: &SlotPolicy) -> Result<Booking> {
        let slots = availability::get_available_slots(
            &request.date,
            &request.service_id,
            &*self,
            policy,
        )?;
        let date = clock::parse_date(&request.date)?;
        let time = clock::parse_time(&request.time)?;

        let free = slots.iter().any(|s| s.time == time && s.available);
        if !free {
            return Err(SalonError::SlotUnavailable {
                date: clock::format_date(date),
                time: clock::format_time(time),
            });
        }

        let booking = Booking {
            date,
            time,
            service_type: request.service_id.trim().to_string(),
            status: BookingStatus::Pending,
        };
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Cancel the first active booking at `date` and `time`.
    pub fn cancel(&mut self, date: &str, time: &str) -> Result<Booking> {
        let date = clock::parse_date(date)?;
        let time = clock::parse_time(time)?;

        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.date == date && b.time == time && b.status.occupies_time())
            .ok_or_else(|| {
                SalonError::NotFound(format!(
                    "active booking on {} at {}",
                    clock::format_date(date),
                    clock::format_time(time)
                ))
            })?;
        booking.status = BookingStatus::Cancelled;
        Ok(booking.clone())
    }
}

impl ScheduleSource for InMemorySchedule {
    fn list_business_hours(&self) -> Result<Vec<BusinessHours>> {
        Ok(self.business_hours.clone())
    }

    fn find_special_date(&self, date: NaiveDate) -> Result<Option<SpecialDate>> {
        Ok(hours::find_special_date(date, &self.special_dates).cloned())
    }

    fn list_bookings(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.date == date && b.status.occupies_time())
            .cloned()
            .collect())
    }

    fn get_service(&self, service_id: &str) -> Result<Option<Service>> {
        Ok(self.services.iter().find(|s| s.id == service_id).cloned())
    }

    fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.services.clone())
    }
}
