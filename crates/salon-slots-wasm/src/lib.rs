//! WASM bindings for salon-slots.
//!
//! Exposes slot availability, calendar summaries, and duration label parsing
//! to the booking wizard via `wasm-bindgen`. All complex types are passed as
//! JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p salon-slots-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/salon-slots-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/salon_slots_wasm.wasm
//! ```
//!
//! The schedule JSON is the shape the web client already fetches:
//!
//! ```json
//! {
//!   "business_hours": [{"day_of_week": 1, "is_open": true, "open_time": "09:00", "close_time": "17:00"}],
//!   "special_dates": [{"date": "2026-03-18", "is_open": false, "name": "Staff Training"}],
//!   "bookings": [{"date": "2026-03-16", "time": "10:00", "service_type": "trim", "status": "confirmed"}],
//!   "services": [{"id": "trim", "name": "Trim", "duration_minutes": 60}]
//! }
//! ```

use salon_slots::{InMemorySchedule, SalonError, SlotPolicy};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out, errors as strings
// ---------------------------------------------------------------------------

/// Everything the exports need, decoded from the JSON arguments.
///
/// Kept free of `JsValue` so it runs in native unit tests.
struct Inputs {
    schedule: InMemorySchedule,
    policy: SlotPolicy,
}

impl Inputs {
    fn parse(schedule_json: &str, policy_json: Option<&str>) -> Result<Self, String> {
        let schedule = InMemorySchedule::from_json(schedule_json).map_err(|e| e.to_string())?;
        let policy = match policy_json.map(str::trim) {
            None | Some("") => SlotPolicy::default(),
            Some(json) => serde_json::from_str(json)
                .map_err(|e| format!("Invalid policy JSON: {}", e))?,
        };
        Ok(Self { schedule, policy })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn slots_json(
    schedule_json: &str,
    date: &str,
    service_id: &str,
    policy_json: Option<&str>,
) -> Result<String, String> {
    let inputs = Inputs::parse(schedule_json, policy_json)?;
    let slots =
        salon_slots::get_available_slots(date, service_id, &inputs.schedule, &inputs.policy)
            .map_err(|e: SalonError| e.to_string())?;
    to_json(&slots)
}

fn days_json(
    schedule_json: &str,
    from: &str,
    days: u32,
    service_id: &str,
    policy_json: Option<&str>,
) -> Result<String, String> {
    let inputs = Inputs::parse(schedule_json, policy_json)?;
    let summaries = salon_slots::find_available_days(
        from,
        days,
        service_id,
        &inputs.schedule,
        &inputs.policy,
    )
    .map_err(|e| e.to_string())?;
    to_json(&summaries)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Bookable slots for a service on a date.
///
/// Returns a JSON array of `{time, available}` objects with `time` as `HH:MM`.
/// An empty array means the salon is closed or the service does not fit.
///
/// # Arguments
/// - `schedule_json` -- business hours, special dates, bookings, and services
/// - `date` -- `YYYY-MM-DD`
/// - `service_id` -- id of a service in the schedule
/// - `policy_json` -- optional `{granularity_minutes, fallback_open, fallback_close}`
#[wasm_bindgen(js_name = "getAvailableSlots")]
pub fn get_available_slots(
    schedule_json: &str,
    date: &str,
    service_id: &str,
    policy_json: Option<String>,
) -> Result<String, JsValue> {
    slots_json(schedule_json, date, service_id, policy_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Per-day availability for `days` consecutive dates starting at `from`.
///
/// Returns a JSON array of `{date, open, closed_reason?, total_slots,
/// available_slots}` objects for the booking calendar.
#[wasm_bindgen(js_name = "findAvailableDays")]
pub fn find_available_days(
    schedule_json: &str,
    from: &str,
    days: u32,
    service_id: &str,
    policy_json: Option<String>,
) -> Result<String, JsValue> {
    days_json(schedule_json, from, days, service_id, policy_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Convert a duration label such as `"4-6 hours"` to minutes (upper bound).
#[wasm_bindgen(js_name = "parseDurationLabel")]
pub fn parse_duration_label(label: &str) -> Result<u32, JsValue> {
    salon_slots::parse_duration_label(label).map_err(|e| JsValue::from_str(&e.to_string()))
}
