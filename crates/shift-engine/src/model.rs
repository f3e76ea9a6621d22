//! Roster data model: assignments grouped per venue, per calendar date.
//!
//! The JSON shape is camelCase and mirrors the persisted documents:
//!
//! ```json
//! { "date": "2026-03-14",
//!   "venues": [ { "venueId": "studios",
//!                 "assignments": [ { "id": "…", "employeeId": "", "venueId": "studios",
//!                                    "roleId": "bar",
//!                                    "timeSlot": { "start": "21:00", "end": "Chiusura" } } ] } ] }
//! ```
//!
//! An empty `employeeId` means the slot has not been filled yet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Role, Venue};
use crate::timeline::TimeSlot;

/// Employee identifiers are opaque strings.
pub type EmployeeId = String;

/// One employee-to-role-to-timeslot binding within a venue's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    /// `None` while the slot is unassigned (stored as `""`).
    #[serde(default, with = "blank_as_none")]
    pub employee_id: Option<EmployeeId>,
    pub venue_id: Venue,
    pub role_id: Role,
    pub time_slot: TimeSlot,
}

impl Assignment {
    /// A new, unfilled slot with a fresh id.
    pub fn unassigned(venue_id: Venue, role_id: Role, time_slot: TimeSlot) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: None,
            venue_id,
            role_id,
            time_slot,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.employee_id.is_some()
    }

    pub fn is_held_by(&self, employee_id: &str) -> bool {
        self.employee_id.as_deref() == Some(employee_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSchedule {
    pub venue_id: Venue,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl VenueSchedule {
    pub fn empty(venue_id: Venue) -> Self {
        Self {
            venue_id,
            assignments: Vec::new(),
        }
    }

    pub fn assignment_mut(&mut self, id: Uuid) -> Option<&mut Assignment> {
        self.assignments.iter_mut().find(|a| a.id == id)
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_assigned()).count()
    }
}

/// All venues' rosters for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub venues: Vec<VenueSchedule>,
}

impl DaySchedule {
    /// An empty day with one roster per known venue.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            venues: Venue::ALL.into_iter().map(VenueSchedule::empty).collect(),
        }
    }

    /// Append an empty roster for every known venue the day is missing.
    pub fn ensure_all_venues(&mut self) {
        for venue in Venue::ALL {
            if self.venue(venue).is_none() {
                self.venues.push(VenueSchedule::empty(venue));
            }
        }
    }

    pub fn venue(&self, venue: Venue) -> Option<&VenueSchedule> {
        self.venues.iter().find(|vs| vs.venue_id == venue)
    }

    pub fn venue_mut(&mut self, venue: Venue) -> Option<&mut VenueSchedule> {
        self.venues.iter_mut().find(|vs| vs.venue_id == venue)
    }

    /// Every assignment of the day, venue by venue, in stored order.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.venues.iter().flat_map(|vs| vs.assignments.iter())
    }

    pub fn all_assignments(&self) -> Vec<Assignment> {
        self.assignments().cloned().collect()
    }

    pub fn has_assignments(&self) -> bool {
        self.venues.iter().any(|vs| !vs.assignments.is_empty())
    }
}

/// A staff member. Removal only clears `active`, so past rosters still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub active: bool,
}

impl Employee {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|id| !id.is_empty()))
    }
}
