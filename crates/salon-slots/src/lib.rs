//! # salon-slots
//!
//! Deterministic appointment slot availability for salon booking.
//!
//! Given a service, a date, the weekly business hours, special-date
//! overrides, and the bookings already on the calendar, the engine produces
//! the ordered list of start times a client can book. It is pure and
//! stateless: identical inputs always yield identical output, and all data
//! arrives through the [`source::ScheduleSource`] read interface or as plain
//! slices.
//!
//! ## Modules
//!
//! - [`availability`] - Entry points: slots for a date, day summaries for a calendar
//! - [`hours`] - Resolve a date to open hours or closed (special dates win)
//! - [`slots`] - Enumerate fixed-width candidate start times, skipping breaks
//! - [`conflict`] - Mark candidates that overlap existing bookings
//! - [`source`] - Schedule read interface and an in-memory store
//! - [`duration`] - Parse legacy duration labels ("4-6 hours") into minutes
//! - [`model`] - Schedule entities and slot policy
//! - [`clock`] - `YYYY-MM-DD` / `HH:MM` parsing and serde adapters
//! - [`error`] - Error types

pub mod availability;
pub mod clock;
pub mod conflict;
pub mod duration;
pub mod error;
pub mod hours;
pub mod model;
pub mod slots;
pub mod source;

pub use availability::{find_available_days, get_available_slots, DaySummary};
pub use conflict::mark_conflicts;
pub use duration::parse_duration_label;
pub use error::SalonError;
pub use hours::resolve_hours;
pub use model::{
    Booking, BookingStatus, BreakWindow, BusinessHours, OpenWindow, ResolvedHours, Service,
    SlotPolicy, SpecialDate, TimeSlot,
};
pub use slots::enumerate_slots;
pub use source::{BookingRequest, InMemorySchedule, ScheduleSource};
