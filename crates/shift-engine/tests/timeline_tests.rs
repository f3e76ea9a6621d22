//! Tests for operating-day time normalization and slot overlap.

use shift_engine::catalog::{end_time_options, time_options, DEFAULT_TIME_SLOT};
use shift_engine::timeline::CLOSING_MINUTES;
use shift_engine::{overlap, time_to_minutes, ShiftError, SlotTime, TimeSlot};

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(start, end).unwrap()
}

// ── Normalization ───────────────────────────────────────────────────────────

#[test]
fn opening_time_is_timeline_zero() {
    assert_eq!(time_to_minutes("18:00").unwrap(), 0);
}

#[test]
fn six_in_the_morning_is_closing() {
    assert_eq!(time_to_minutes("06:00").unwrap(), 720);
    assert_eq!(CLOSING_MINUTES, 720);
}

#[test]
fn chiusura_equals_six_in_the_morning() {
    assert_eq!(time_to_minutes("Chiusura").unwrap(), 720);
    assert_eq!(
        time_to_minutes("Chiusura").unwrap(),
        time_to_minutes("06:00").unwrap()
    );
}

#[test]
fn midnight_belongs_to_the_next_day() {
    // 00:00 next day = 1440, minus the 1080 anchor = 360
    assert_eq!(time_to_minutes("00:00").unwrap(), 360);
}

#[test]
fn late_evening_and_early_morning_values() {
    assert_eq!(time_to_minutes("23:45").unwrap(), 345);
    assert_eq!(time_to_minutes("21:30").unwrap(), 210);
    assert_eq!(time_to_minutes("03:00").unwrap(), 540);
}

#[test]
fn label_outside_operating_window_is_not_rejected() {
    // 12:00 is treated like any hour before 18: pushed to the next day.
    let noon: SlotTime = "12:00".parse().unwrap();
    assert_eq!(noon.minutes(), 1080);
    assert!(!noon.is_within_operating_day());
}

#[test]
fn malformed_label_is_an_error() {
    assert_eq!(
        time_to_minutes("late"),
        Err(ShiftError::InvalidTime("late".to_string()))
    );
}

#[test]
fn every_selectable_time_is_inside_the_operating_day() {
    let options = time_options();
    assert_eq!(options.first(), Some(&SlotTime::clock(18, 0)));
    assert_eq!(options.last(), Some(&SlotTime::clock(6, 0)));
    // 24 quarter hours 18-23, 24 quarter hours 00-05, plus 06:00
    assert_eq!(options.len(), 49);
    assert!(options.iter().all(|t| t.is_within_operating_day()));
}

#[test]
fn selectable_times_are_strictly_increasing() {
    let minutes: Vec<i32> = time_options().into_iter().map(SlotTime::minutes).collect();
    assert!(minutes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn end_options_start_with_chiusura() {
    let options = end_time_options();
    assert_eq!(options[0], SlotTime::Closing);
    assert_eq!(options.len(), time_options().len() + 1);
}

#[test]
fn default_slot_runs_from_nine_to_three() {
    assert_eq!(DEFAULT_TIME_SLOT, slot("21:00", "03:00"));
    assert_eq!(DEFAULT_TIME_SLOT.duration_minutes(), 360);
}

// ── Overlap ─────────────────────────────────────────────────────────────────

#[test]
fn touching_slots_do_not_overlap() {
    assert!(!overlap(&slot("21:00", "22:00"), &slot("22:00", "23:00")));
    assert!(!overlap(&slot("22:00", "23:00"), &slot("21:00", "22:00")));
}

#[test]
fn slot_running_until_close_overlaps_earlier_one() {
    assert!(overlap(&slot("21:00", "23:00"), &slot("22:00", "Chiusura")));
}

#[test]
fn overlap_across_midnight() {
    assert!(overlap(&slot("21:00", "01:00"), &slot("00:00", "02:00")));
    assert!(!overlap(&slot("18:00", "23:00"), &slot("00:00", "02:00")));
}

#[test]
fn contained_slot_overlaps() {
    assert!(overlap(&slot("20:00", "04:00"), &slot("23:00", "00:30")));
}

#[test]
fn overlap_is_symmetric() {
    let a = slot("19:00", "00:15");
    let b = slot("00:00", "Chiusura");
    assert_eq!(overlap(&a, &b), overlap(&b, &a));
}

// ── Serialization ───────────────────────────────────────────────────────────

#[test]
fn time_slot_serializes_as_labels() {
    let json = serde_json::to_string(&slot("21:00", "Chiusura")).unwrap();
    assert_eq!(json, r#"{"start":"21:00","end":"Chiusura"}"#);
}

#[test]
fn time_slot_rejects_malformed_label_on_deserialize() {
    let err = serde_json::from_str::<TimeSlot>(r#"{"start":"9pm","end":"03:00"}"#);
    assert!(err.is_err());
}
