//! Schedule entities consumed by the slot engine and the slots it produces.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm, hhmm_opt};
use crate::error::{Result, SalonError};

/// Default weekly opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub is_open: bool,
    #[serde(with = "hhmm")]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub close_time: NaiveTime,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub break_start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub break_end: Option<NaiveTime>,
}

impl BusinessHours {
    /// Check the weekday range and, for open days, the ordering of the
    /// open/close/break times.
    ///
    /// Closed days only need a valid weekday; their times are ignored.
    pub fn validate(&self) -> Result<()> {
        if self.day_of_week > 6 {
            return Err(SalonError::InvalidInput(format!(
                "day_of_week must be 0..=6, got {}",
                self.day_of_week
            )));
        }
        if !self.is_open {
            return Ok(());
        }
        if self.open_time >= self.close_time {
            return Err(SalonError::InvalidInput(format!(
                "day {}: open time {} must be before close time {}",
                self.day_of_week,
                clock::format_time(self.open_time),
                clock::format_time(self.close_time)
            )));
        }
        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if self.open_time <= start && start < end && end <= self.close_time {
                    Ok(())
                } else {
                    Err(SalonError::InvalidInput(format!(
                        "day {}: break {}-{} must lie within {}-{}",
                        self.day_of_week,
                        clock::format_time(start),
                        clock::format_time(end),
                        clock::format_time(self.open_time),
                        clock::format_time(self.close_time)
                    )))
                }
            }
            _ => Err(SalonError::InvalidInput(format!(
                "day {}: break_start and break_end must be set together",
                self.day_of_week
            ))),
        }
    }

    /// The break as a window, when both ends are present.
    pub fn break_window(&self) -> Option<BreakWindow> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => Some(BreakWindow { start, end }),
            _ => None,
        }
    }
}

/// A named exception (holiday, training day, extended hours) for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    pub date: NaiveDate,
    pub is_open: bool,
    pub name: String,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub open_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub close_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status holds its time on the calendar.
    pub fn occupies_time(self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// An appointment already on the books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    /// Service id or display name, as recorded by the booking form.
    pub service_type: String,
    #[serde(default)]
    pub status: BookingStatus,
}

/// A bookable service.
///
/// `duration_minutes` drives all slot math; `duration_label` ("4-6 hours") is
/// only shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_label: Option<String>,
}

impl Service {
    /// Whether a booking's free-text `service_type` refers to this service.
    pub fn matches(&self, service_type: &str) -> bool {
        let wanted = service_type.trim();
        self.id.eq_ignore_ascii_case(wanted) || self.name.eq_ignore_ascii_case(wanted)
    }
}

/// A candidate appointment start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

/// A period inside opening hours when no appointments run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// Effective opening hours for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindow {
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_window: Option<BreakWindow>,
}

/// Outcome of resolving a date against the weekly schedule and special dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResolvedHours {
    Closed {
        /// Name of the special date that closed the salon, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Open(OpenWindow),
}

impl ResolvedHours {
    pub fn window(&self) -> Option<&OpenWindow> {
        match self {
            ResolvedHours::Open(window) => Some(window),
            ResolvedHours::Closed { .. } => None,
        }
    }
}

/// Slot generation settings, passed explicitly to every computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotPolicy {
    /// Spacing between candidate start times.
    pub granularity_minutes: u32,
    /// Used when an open special date omits its opening time.
    #[serde(with = "hhmm")]
    pub fallback_open: NaiveTime,
    /// Used when an open special date omits its closing time.
    #[serde(with = "hhmm")]
    pub fallback_close: NaiveTime,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            granularity_minutes: 60,
            fallback_open: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            fallback_close: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl SlotPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.granularity_minutes == 0 {
            return Err(SalonError::InvalidInput(
                "slot granularity must be at least one minute".to_string(),
            ));
        }
        if self.fallback_open >= self.fallback_close {
            return Err(SalonError::InvalidInput(
                "fallback open time must be before fallback close time".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn weekday(open: NaiveTime, close: NaiveTime) -> BusinessHours {
        BusinessHours {
            day_of_week: 1,
            is_open: true,
            open_time: open,
            close_time: close,
            break_start: None,
            break_end: None,
        }
    }

    #[test]
    fn validate_accepts_break_touching_open_and_close() {
        let mut hours = weekday(t(9, 0), t(17, 0));
        hours.break_start = Some(t(9, 0));
        hours.break_end = Some(t(17, 0));
        assert!(hours.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_hours_and_half_breaks() {
        assert!(weekday(t(17, 0), t(9, 0)).validate().is_err());

        let mut half = weekday(t(9, 0), t(17, 0));
        half.break_start = Some(t(12, 0));
        assert!(half.validate().is_err());

        let mut outside = weekday(t(9, 0), t(17, 0));
        outside.break_start = Some(t(16, 0));
        outside.break_end = Some(t(18, 0));
        assert!(outside.validate().is_err());
    }

    #[test]
    fn closed_day_ignores_times() {
        let mut hours = weekday(t(17, 0), t(9, 0));
        hours.is_open = false;
        assert!(hours.validate().is_ok());

        hours.day_of_week = 7;
        assert!(hours.validate().is_err());
    }

    #[test]
    fn booking_deserializes_from_database_row_shape() {
        let json = r#"{"date":"2026-03-16","time":"10:00:00","service_type":"Silk Press","status":"confirmed"}"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.time, t(10, 0));
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(booking.status.occupies_time());
    }

    #[test]
    fn time_slot_serializes_as_hhmm() {
        let slot = TimeSlot {
            time: t(9, 0),
            available: true,
        };
        assert_eq!(
            serde_json::to_string(&slot).unwrap(),
            r#"{"time":"09:00","available":true}"#
        );
    }

    #[test]
    fn service_matches_id_or_name_case_insensitively() {
        let service = Service {
            id: "silk-press".to_string(),
            name: "Silk Press".to_string(),
            duration_minutes: 90,
            duration_label: None,
        };
        assert!(service.matches("silk-press"));
        assert!(service.matches(" silk press "));
        assert!(!service.matches("Knotless Braids"));
    }
}
