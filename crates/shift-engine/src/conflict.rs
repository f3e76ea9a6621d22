//! Detect double-booked employees within one operating day.
//!
//! Conflicts are advisory: callers warn about them but never refuse to store
//! an overlapping assignment. Adjacent slots (one ends exactly when the other
//! starts) are NOT conflicts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Assignment, EmployeeId};
use crate::timeline::TimeSlot;

/// Find the first assignment that keeps `employee_id` busy during `candidate`.
///
/// Scans every assignment of the day (all venues) in the order given and skips:
/// - the assignment identified by `exclude`, usually the one being edited,
/// - unassigned slots and slots held by other employees.
///
/// When several assignments overlap, the first one in `assignments` wins.
pub fn find_conflict<'a>(
    employee_id: &str,
    candidate: &TimeSlot,
    assignments: &'a [Assignment],
    exclude: Option<Uuid>,
) -> Option<&'a Assignment> {
    assignments
        .iter()
        .filter(|a| Some(a.id) != exclude)
        .filter(|a| a.is_held_by(employee_id))
        .find(|a| candidate.overlaps(&a.time_slot))
}

/// Two assignments of the same employee whose slots overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleBooking {
    pub employee_id: EmployeeId,
    pub first: Assignment,
    pub second: Assignment,
    pub overlap_minutes: i32,
}

/// Audit a day for every pair of overlapping assignments held by one employee.
///
/// Pairs are reported once, in input order (`first` precedes `second`). The
/// overlap duration is `min(ends) - max(starts)` on the operating-day timeline.
pub fn find_double_bookings(assignments: &[Assignment]) -> Vec<DoubleBooking> {
    let mut bookings = Vec::new();

    for (i, a) in assignments.iter().enumerate() {
        let Some(employee_id) = a.employee_id.as_deref() else {
            continue;
        };
        for b in &assignments[i + 1..] {
            if !b.is_held_by(employee_id) || !a.time_slot.overlaps(&b.time_slot) {
                continue;
            }
            let (a_start, a_end) = a.time_slot.bounds();
            let (b_start, b_end) = b.time_slot.bounds();
            bookings.push(DoubleBooking {
                employee_id: employee_id.to_string(),
                first: a.clone(),
                second: b.clone(),
                overlap_minutes: a_end.min(b_end) - a_start.max(b_start),
            });
        }
    }

    bookings
}
