//! Turn loosely shaped remote documents into typed schedules and rosters.
//!
//! The realtime document store does not preserve JSON arrays faithfully: a list
//! may come back as an object keyed `"0"`, `"1"`, …, deleted elements leave
//! `null` holes, and empty lists vanish entirely. Everything read from a store
//! passes through here before it reaches [`AppState`](crate::AppState).
//!
//! Rules:
//! - object-encoded lists become arrays (numeric keys in numeric order),
//! - `null` elements are dropped,
//! - a day without `venues` is skipped, a venue without `assignments` is empty,
//!   an employee without `roles` has none,
//! - a day without `date` takes the date from its key,
//! - an assignment, venue or employee that still fails to parse is dropped
//!   on its own with a warning; its siblings are kept,
//! - every day ends up with one roster per known venue.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use shift_engine::{Assignment, DaySchedule, Employee, Venue, VenueSchedule};

use crate::error::{Result, StoreError};
use crate::roster::EmployeeRoster;

/// Normalize the `schedules` document (date → day) into typed day schedules.
///
/// # Errors
/// Returns `StoreError::MalformedDocument` if the document is neither `null`
/// nor an object.
pub fn schedules_from_value(raw: Value) -> Result<BTreeMap<NaiveDate, DaySchedule>> {
    let days = match raw {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(days) => days,
        other => {
            return Err(StoreError::MalformedDocument(format!(
                "schedules must be an object keyed by date, got {}",
                kind(&other)
            )))
        }
    };

    let mut schedules = BTreeMap::new();
    for (key, day) in days {
        if let Some(day) = day_from_value(&key, day) {
            schedules.insert(day.date, day);
        }
    }
    Ok(schedules)
}

/// Normalize a single day document stored under `key`.
///
/// Returns `None` (after logging) when the day has no `venues` or no readable
/// date. Venues and assignments are read one by one: an unreadable entry is
/// dropped on its own and the rest of the day is kept.
pub fn day_from_value(key: &str, raw: Value) -> Option<DaySchedule> {
    let Value::Object(mut day) = raw else {
        tracing::debug!(key, "skipping non-object day entry");
        return None;
    };
    let Some(raw_venues) = day.remove("venues") else {
        tracing::debug!(key, "skipping day without venues");
        return None;
    };

    let label = match day.get("date") {
        Some(Value::String(d)) if !d.is_empty() => d.as_str(),
        _ => key,
    };
    let date = match label.parse::<NaiveDate>() {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(key, date = label, error = %e, "dropping day with unreadable date");
            return None;
        }
    };

    let venues = into_list(raw_venues)
        .into_iter()
        .filter_map(|venue| venue_from_value(date, venue))
        .collect();
    let mut schedule = DaySchedule { date, venues };
    schedule.ensure_all_venues();
    Some(schedule)
}

fn venue_from_value(date: NaiveDate, raw: Value) -> Option<VenueSchedule> {
    let Value::Object(mut venue) = raw else {
        tracing::warn!(%date, "dropping non-object venue entry");
        return None;
    };
    let venue_id = match venue.remove("venueId").map(serde_json::from_value::<Venue>) {
        Some(Ok(venue_id)) => venue_id,
        Some(Err(e)) => {
            tracing::warn!(%date, error = %e, "dropping venue with unknown id");
            return None;
        }
        None => {
            tracing::warn!(%date, "dropping venue without venueId");
            return None;
        }
    };

    let assignments = venue
        .remove("assignments")
        .map(into_list)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Assignment>(raw) {
            Ok(assignment) => Some(assignment),
            Err(e) => {
                tracing::warn!(%date, venue = %venue_id, error = %e, "dropping unreadable assignment");
                None
            }
        })
        .collect();

    Some(VenueSchedule {
        venue_id,
        assignments,
    })
}

/// Normalize the employees document (`{ list, initialized }`).
///
/// # Errors
/// Returns `StoreError::MalformedDocument` if the document is neither `null`
/// nor an object.
pub fn employees_from_value(raw: Value) -> Result<EmployeeRoster> {
    let mut doc = match raw {
        Value::Null => return Ok(EmployeeRoster::default()),
        Value::Object(doc) => doc,
        other => {
            return Err(StoreError::MalformedDocument(format!(
                "employees must be an object, got {}",
                kind(&other)
            )))
        }
    };

    let initialized = doc.get("initialized").and_then(Value::as_bool).unwrap_or(false);
    let list = doc
        .remove("list")
        .map(into_list)
        .unwrap_or_default()
        .into_iter()
        .map(|raw| match raw {
            Value::Object(mut employee) => {
                let roles = employee.remove("roles").map(into_list).unwrap_or_default();
                employee.insert("roles".to_string(), Value::Array(roles));
                Value::Object(employee)
            }
            other => other,
        })
        .filter_map(|raw| match serde_json::from_value::<Employee>(raw) {
            Ok(employee) => Some(employee),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unreadable employee");
                None
            }
        })
        .collect();

    Ok(EmployeeRoster::new(list, initialized))
}

/// Coerce an array-or-object-with-numeric-keys into a list without `null` holes.
fn into_list(raw: Value) -> Vec<Value> {
    match raw {
        Value::Array(items) => items.into_iter().filter(|v| !v.is_null()).collect(),
        Value::Object(entries) => object_values_in_key_order(entries),
        _ => Vec::new(),
    }
}

fn object_values_in_key_order(entries: Map<String, Value>) -> Vec<Value> {
    let mut pairs: Vec<(String, Value)> = entries.into_iter().filter(|(_, v)| !v.is_null()).collect();
    if pairs.iter().all(|(k, _)| k.parse::<u64>().is_ok()) {
        pairs.sort_by_key(|(k, _)| k.parse::<u64>().unwrap_or(u64::MAX));
    }
    pairs.into_iter().map(|(_, v)| v).collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
