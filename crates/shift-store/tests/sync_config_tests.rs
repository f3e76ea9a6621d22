use std::path::PathBuf;
use std::thread;

use chrono::NaiveDate;
use serde_json::json;
use shift_engine::{Role, TimeSlot, Venue};
use shift_store::config::{DATA_DIR, DEFAULT_END, DEFAULT_START, LOG_FORMAT};
use shift_store::{
    AppState, LogFormat, MemoryStore, RemoteSnapshot, StoreConfig, StoreError, SyncFeed, Workspace,
};

// ── Sync ────────────────────────────────────────────────────────────────────

#[test]
fn snapshots_from_another_thread_replace_state() {
    let feed = SyncFeed::new();
    let tx = feed.sender();
    thread::spawn(move || {
        tx.send(RemoteSnapshot::Employees(json!({
            "list": { "0": { "id": "e1", "name": "Anna", "roles": ["bar"], "active": true } },
            "initialized": true
        })))
        .unwrap();
        tx.send(RemoteSnapshot::Schedules(json!({
            "2026-03-14": { "venues": [{ "venueId": "studios", "assignments": [{
                "id": "3f0c7d4e-5a6b-4c8d-9e0f-1a2b3c4d5e6f",
                "employeeId": "e1",
                "venueId": "studios",
                "roleId": "bar",
                "timeSlot": { "start": "21:00", "end": "03:00" }
            }] }] }
        })))
        .unwrap();
    })
    .join()
    .unwrap();

    let mut state = AppState::default();
    let applied = feed.drain_into(&mut state).unwrap();

    assert_eq!(applied, 2);
    assert_eq!(state.employees().name_of("e1"), Some("Anna"));
    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    assert_eq!(state.assignments_for_employee("e1")[0].date, date);
}

#[test]
fn empty_feed_applies_nothing() {
    let feed = SyncFeed::default();
    let mut state = AppState::default();
    state.add_assignment(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(), Venue::Studios, Role::Bar);

    assert_eq!(feed.drain_into(&mut state).unwrap(), 0);
    assert_eq!(state.schedules().len(), 1);
}

#[test]
fn remote_schedules_replace_local_ones_wholesale() {
    let mut ws = Workspace::open(MemoryStore::new(), &StoreConfig::default()).unwrap();
    let local = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    ws.add_assignment(local, Venue::Studios, Role::Bar).unwrap();
    let feed = SyncFeed::new();
    feed.sender()
        .send(RemoteSnapshot::Schedules(json!({ "2026-03-14": { "venues": [] } })))
        .unwrap();

    ws.sync(&feed).unwrap();

    assert!(ws.state().day(local).is_none());
    assert!(ws.state().day(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()).is_some());
    // Remote data is not echoed back into the local store.
    assert!(ws.store().day_document(local).is_some());
}

#[test]
fn malformed_snapshot_stops_the_drain() {
    let feed = SyncFeed::new();
    let tx = feed.sender();
    tx.send(RemoteSnapshot::Schedules(json!("garbage"))).unwrap();
    tx.send(RemoteSnapshot::Employees(json!({ "list": [], "initialized": true }))).unwrap();
    let mut state = AppState::default();

    let err = feed.drain_into(&mut state).unwrap_err();
    assert!(matches!(err, StoreError::MalformedDocument(_)));

    assert_eq!(feed.drain_into(&mut state).unwrap(), 1);
    assert!(state.employees().is_initialized());
}

// ── Config ──────────────────────────────────────────────────────────────────

fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn defaults_without_environment() {
    let config = StoreConfig::from_lookup(lookup(&[]));
    assert_eq!(config, StoreConfig::default());
    assert_eq!(config.data_dir, PathBuf::from("./shift-data"));
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert_eq!(config.default_slot, TimeSlot::parse("21:00", "03:00").unwrap());
}

#[test]
fn environment_overrides_every_setting() {
    let config = StoreConfig::from_lookup(lookup(&[
        (DATA_DIR, "/var/lib/shifts"),
        (LOG_FORMAT, "JSON"),
        (DEFAULT_START, "22:30"),
        (DEFAULT_END, "Chiusura"),
    ]));

    assert_eq!(config.data_dir, PathBuf::from("/var/lib/shifts"));
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.default_slot, TimeSlot::parse("22:30", "Chiusura").unwrap());
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let config = StoreConfig::from_lookup(lookup(&[
        (DATA_DIR, "   "),
        (LOG_FORMAT, "xml"),
        (DEFAULT_START, "25:00"),
        (DEFAULT_END, "4"),
    ]));

    assert_eq!(config, StoreConfig::default());
}
