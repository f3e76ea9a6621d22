//! Split a pool of employees into those free for a slot and those booked elsewhere.
//!
//! The pool is normally "every active employee holding the role being filled".
//! Each booked employee carries the assignment that blocks them, so the caller
//! can show where they already are ("in Studios 21:00-01:00").

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conflict::find_conflict;
use crate::model::{Assignment, EmployeeId};
use crate::timeline::TimeSlot;

/// An employee who cannot take the candidate slot, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingEmployee {
    pub employee_id: EmployeeId,
    pub conflict_with: Assignment,
}

/// Exhaustive, disjoint partition of a candidate pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// Free employees, in pool order.
    pub available: Vec<EmployeeId>,
    /// Booked employees, in pool order.
    pub conflicting: Vec<ConflictingEmployee>,
}

impl Availability {
    pub fn is_available(&self, employee_id: &str) -> bool {
        self.available.iter().any(|id| id == employee_id)
    }

    /// The assignment blocking `employee_id`, if they are booked.
    pub fn conflict_for(&self, employee_id: &str) -> Option<&Assignment> {
        self.conflicting
            .iter()
            .find(|c| c.employee_id == employee_id)
            .map(|c| &c.conflict_with)
    }

    pub fn len(&self) -> usize {
        self.available.len() + self.conflicting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every employee in `employee_ids` as available or conflicting for
/// `candidate`, given all assignments of the day.
///
/// `current_assignment` is the slot being edited; it never conflicts with itself.
/// The function is pure: identical arguments always produce identical results.
pub fn get_available_employees<S: AsRef<str>>(
    employee_ids: &[S],
    candidate: &TimeSlot,
    assignments: &[Assignment],
    current_assignment: Option<Uuid>,
) -> Availability {
    let mut result = Availability::default();

    for employee_id in employee_ids {
        let employee_id = employee_id.as_ref();
        match find_conflict(employee_id, candidate, assignments, current_assignment) {
            Some(conflict) => result.conflicting.push(ConflictingEmployee {
                employee_id: employee_id.to_string(),
                conflict_with: conflict.clone(),
            }),
            None => result.available.push(employee_id.to_string()),
        }
    }

    result
}
