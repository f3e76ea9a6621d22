//! Every filled assignment ever stored, newest date first.

use chrono::NaiveDate;
use serde::Serialize;
use shift_engine::{Role, SlotTime, Venue};

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub employee_id: String,
    pub employee_name: String,
    pub venue: Venue,
    pub role: Role,
    pub start: SlotTime,
    pub end: SlotTime,
}

/// Restrict the history to one role and/or one venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub role: Option<Role>,
    pub venue: Option<Venue>,
}

impl HistoryFilter {
    fn matches(&self, venue: Venue, role: Role) -> bool {
        self.role.is_none_or(|r| r == role) && self.venue.is_none_or(|v| v == venue)
    }
}

/// One row per filled assignment, sorted by date descending.
///
/// Within a date, rows keep venue order then stored order. Assignments whose
/// employee is missing from the roster are left out; deactivated employees
/// still appear.
pub fn history(state: &AppState, filter: &HistoryFilter) -> Vec<HistoryEntry> {
    let roster = state.employees();

    state
        .schedules()
        .values()
        .rev()
        .flat_map(|day| {
            day.venues.iter().flat_map(move |vs| {
                vs.assignments.iter().filter_map(move |a| {
                    let employee_id = a.employee_id.as_deref()?;
                    if !filter.matches(vs.venue_id, a.role_id) {
                        return None;
                    }
                    let employee = roster.get(employee_id)?;
                    Some(HistoryEntry {
                        date: day.date,
                        employee_id: employee.id.clone(),
                        employee_name: employee.name.clone(),
                        venue: vs.venue_id,
                        role: a.role_id,
                        start: a.time_slot.start,
                        end: a.time_slot.end,
                    })
                })
            })
        })
        .collect()
}
