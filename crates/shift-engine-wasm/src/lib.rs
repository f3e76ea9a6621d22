//! WASM bindings for shift-engine.
//!
//! Exposes time normalization, the overlap test, conflict lookup and the
//! availability split to the roster editor in the browser via `wasm-bindgen`.
//! Slots and assignments cross the boundary as JSON strings in the same
//! camelCase shape the schedules are stored in:
//!
//! ```json
//! { "id": "…", "employeeId": "emp-1", "venueId": "studios",
//!   "roleId": "bar", "timeSlot": { "start": "21:00", "end": "Chiusura" } }
//! ```
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p shift-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/shift_engine_wasm.wasm
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use shift_engine::catalog::{end_time_options, time_options};
use shift_engine::{Assignment, TimeSlot};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_id(id: Option<String>) -> Result<Option<Uuid>, JsValue> {
    id.filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(&s)
                .map_err(|e| JsValue::from_str(&format!("Invalid assignment id '{}': {}", s, e)))
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Minutes since the 18:00 opening for a time label (`"HH:MM"` or `"Chiusura"`).
#[wasm_bindgen(js_name = "timeToMinutes")]
pub fn time_to_minutes(label: &str) -> Result<i32, JsValue> {
    shift_engine::time_to_minutes(label).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether two `{start, end}` slots intersect on the operating-day timeline.
#[wasm_bindgen(js_name = "overlap")]
pub fn overlap(a_json: &str, b_json: &str) -> Result<bool, JsValue> {
    let a: TimeSlot = parse_json("time slot", a_json)?;
    let b: TimeSlot = parse_json("time slot", b_json)?;
    Ok(shift_engine::overlap(&a, &b))
}

/// The first assignment in `assignments_json` that `employee_id` already holds
/// and that overlaps `candidate_json`.
///
/// Returns the assignment as JSON, or `"null"` when the employee is free.
/// `exclude` is the id of the assignment being edited.
#[wasm_bindgen(js_name = "findConflict")]
pub fn find_conflict(
    employee_id: &str,
    candidate_json: &str,
    assignments_json: &str,
    exclude: Option<String>,
) -> Result<String, JsValue> {
    let candidate: TimeSlot = parse_json("time slot", candidate_json)?;
    let assignments: Vec<Assignment> = parse_json("assignments", assignments_json)?;
    let exclude = parse_id(exclude)?;

    to_json(&shift_engine::find_conflict(employee_id, &candidate, &assignments, exclude))
}

/// Split `employee_ids_json` (an array of ids) into free and booked employees
/// for `candidate_json`.
///
/// Returns `{ "available": [...], "conflicting": [{ "employeeId", "conflictWith" }] }`.
#[wasm_bindgen(js_name = "getAvailableEmployees")]
pub fn get_available_employees(
    employee_ids_json: &str,
    candidate_json: &str,
    assignments_json: &str,
    current_assignment: Option<String>,
) -> Result<String, JsValue> {
    let employee_ids: Vec<String> = parse_json("employee ids", employee_ids_json)?;
    let candidate: TimeSlot = parse_json("time slot", candidate_json)?;
    let assignments: Vec<Assignment> = parse_json("assignments", assignments_json)?;
    let current = parse_id(current_assignment)?;

    to_json(&shift_engine::get_available_employees(
        &employee_ids,
        &candidate,
        &assignments,
        current,
    ))
}

/// Every pair of overlapping assignments held by the same employee.
#[wasm_bindgen(js_name = "findDoubleBookings")]
pub fn find_double_bookings(assignments_json: &str) -> Result<String, JsValue> {
    let assignments: Vec<Assignment> = parse_json("assignments", assignments_json)?;
    to_json(&shift_engine::find_double_bookings(&assignments))
}

/// Selectable start (`"start"`) or end (`"end"`) times as a JSON array of labels.
#[wasm_bindgen(js_name = "timeOptions")]
pub fn time_options_json(kind: &str) -> Result<String, JsValue> {
    match kind {
        "start" => to_json(&time_options()),
        "end" => to_json(&end_time_options()),
        other => Err(JsValue::from_str(&format!(
            "Unknown time option list '{}': expected 'start' or 'end'",
            other
        ))),
    }
}
