//! Tests for resolving a date to its effective opening hours.

use chrono::{NaiveDate, NaiveTime};
use salon_slots::hours::{day_of_week, find_special_date, resolve_hours};
use salon_slots::{BreakWindow, BusinessHours, OpenWindow, ResolvedHours, SlotPolicy, SpecialDate};

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn weekly() -> Vec<BusinessHours> {
    vec![
        BusinessHours {
            day_of_week: 0,
            is_open: false,
            open_time: t(0, 0),
            close_time: t(0, 0),
            break_start: None,
            break_end: None,
        },
        BusinessHours {
            day_of_week: 1,
            is_open: true,
            open_time: t(9, 0),
            close_time: t(17, 0),
            break_start: Some(t(12, 0)),
            break_end: Some(t(13, 0)),
        },
        BusinessHours {
            day_of_week: 6,
            is_open: true,
            open_time: t(8, 0),
            close_time: t(14, 0),
            break_start: None,
            break_end: None,
        },
    ]
}

fn special(date: &str, is_open: bool, name: &str) -> SpecialDate {
    SpecialDate {
        date: d(date),
        is_open,
        name: name.to_string(),
        open_time: None,
        close_time: None,
    }
}

#[test]
fn day_of_week_counts_from_sunday() {
    assert_eq!(day_of_week(d("2026-03-15")), 0);
    assert_eq!(day_of_week(d("2026-03-16")), 1);
    assert_eq!(day_of_week(d("2026-03-21")), 6);
}

#[test]
fn weekday_hours_carry_their_break() {
    let resolved = resolve_hours(d("2026-03-16"), None, &weekly(), &SlotPolicy::default());
    assert_eq!(
        resolved,
        ResolvedHours::Open(OpenWindow {
            open: t(9, 0),
            close: t(17, 0),
            break_window: Some(BreakWindow {
                start: t(12, 0),
                end: t(13, 0),
            }),
        })
    );
}

#[test]
fn closed_and_missing_weekdays_resolve_closed_without_reason() {
    let policy = SlotPolicy::default();
    // Sunday is explicitly closed, Tuesday has no entry.
    for date in ["2026-03-15", "2026-03-17"] {
        assert_eq!(
            resolve_hours(d(date), None, &weekly(), &policy),
            ResolvedHours::Closed { reason: None },
            "{}",
            date
        );
    }
}

#[test]
fn closed_special_date_reports_its_name() {
    let holiday = special("2026-03-16", false, "Staff Training");
    let resolved = resolve_hours(
        d("2026-03-16"),
        Some(&holiday),
        &weekly(),
        &SlotPolicy::default(),
    );
    assert_eq!(
        resolved,
        ResolvedHours::Closed {
            reason: Some("Staff Training".to_string())
        }
    );
}

#[test]
fn open_special_date_has_no_break_and_fills_missing_times() {
    let mut late = special("2026-03-16", true, "Late Night");
    late.close_time = Some(t(21, 0));

    let resolved = resolve_hours(d("2026-03-16"), Some(&late), &weekly(), &SlotPolicy::default());
    assert_eq!(
        resolved,
        ResolvedHours::Open(OpenWindow {
            open: t(9, 0),
            close: t(21, 0),
            break_window: None,
        })
    );
}

#[test]
fn fallback_window_comes_from_the_policy() {
    let policy = SlotPolicy {
        fallback_open: t(10, 0),
        fallback_close: t(16, 0),
        ..SlotPolicy::default()
    };
    let open = special("2026-03-15", true, "Sunday Special");
    let resolved = resolve_hours(d("2026-03-15"), Some(&open), &weekly(), &policy);
    assert_eq!(resolved.window().map(|w| (w.open, w.close)), Some((t(10, 0), t(16, 0))));
}

#[test]
fn special_date_for_another_day_is_ignored() {
    let other = special("2026-03-21", false, "Inventory");
    let resolved = resolve_hours(d("2026-03-16"), Some(&other), &weekly(), &SlotPolicy::default());
    assert!(resolved.window().is_some());
}

#[test]
fn find_special_date_matches_exact_date() {
    let dates = vec![
        special("2026-12-25", false, "Christmas"),
        special("2026-12-31", true, "New Year's Eve"),
    ];
    assert_eq!(
        find_special_date(d("2026-12-31"), &dates).map(|s| s.name.as_str()),
        Some("New Year's Eve")
    );
    assert!(find_special_date(d("2026-12-30"), &dates).is_none());
}
