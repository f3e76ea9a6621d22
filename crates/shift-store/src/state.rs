//! In-memory roster state: one day schedule per date plus the employee roster.
//!
//! `AppState` is an ordinary value owned by the caller; there is no global
//! store. Mutations return the day snapshot they changed so the caller can
//! persist exactly that document.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use shift_engine::catalog::DEFAULT_TIME_SLOT;
use shift_engine::{
    find_double_bookings, get_available_employees, Assignment, Availability, DaySchedule,
    DoubleBooking, Role, TimeSlot, Venue, VenueSchedule,
};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::normalize;
use crate::roster::EmployeeRoster;
use crate::sync::RemoteSnapshot;

/// An assignment tagged with the date it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedAssignment {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub assignment: Assignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    schedules: BTreeMap<NaiveDate, DaySchedule>,
    employees: EmployeeRoster,
    default_slot: TimeSlot,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BTreeMap::new(), EmployeeRoster::default())
    }
}

impl AppState {
    pub fn new(schedules: BTreeMap<NaiveDate, DaySchedule>, employees: EmployeeRoster) -> Self {
        Self {
            schedules,
            employees,
            default_slot: DEFAULT_TIME_SLOT,
        }
    }

    /// Use `slot` for assignments created from now on.
    pub fn with_default_slot(mut self, slot: TimeSlot) -> Self {
        self.default_slot = slot;
        self
    }

    pub fn schedules(&self) -> &BTreeMap<NaiveDate, DaySchedule> {
        &self.schedules
    }

    pub fn employees(&self) -> &EmployeeRoster {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut EmployeeRoster {
        &mut self.employees
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.schedules.get(&date)
    }

    /// Replace schedules and roster wholesale (backup restore).
    pub fn replace_all(&mut self, schedules: BTreeMap<NaiveDate, DaySchedule>, employees: EmployeeRoster) {
        self.schedules = schedules;
        self.employees = employees;
    }

    // ── Days and assignments ────────────────────────────────────────────────

    /// The day for `date`, created empty (one roster per venue) on first access.
    pub fn get_or_create_day(&mut self, date: NaiveDate) -> &DaySchedule {
        self.day_entry(date)
    }

    /// Add an unfilled `role` slot at `venue` with the default time slot.
    ///
    /// Creates the day if needed. Returns the new assignment id and the
    /// updated day.
    pub fn add_assignment(&mut self, date: NaiveDate, venue: Venue, role: Role) -> (Uuid, &DaySchedule) {
        let assignment = Assignment::unassigned(venue, role, self.default_slot);
        let id = assignment.id;
        let day = self.day_entry(date);
        venue_entry(day, venue).assignments.push(assignment);
        (id, &*day)
    }

    /// Fill (or clear, with `None`) the employee of an assignment.
    pub fn update_assignment_employee(
        &mut self,
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        employee_id: Option<String>,
    ) -> Result<&DaySchedule> {
        self.edit_assignment(date, venue, id, |a| a.employee_id = employee_id)
    }

    pub fn update_assignment_time(
        &mut self,
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        time_slot: TimeSlot,
    ) -> Result<&DaySchedule> {
        self.edit_assignment(date, venue, id, |a| a.time_slot = time_slot)
    }

    pub fn remove_assignment(&mut self, date: NaiveDate, venue: Venue, id: Uuid) -> Result<&DaySchedule> {
        let day = self.schedules.get_mut(&date).ok_or(StoreError::DayNotFound(date))?;
        let roster = day
            .venue_mut(venue)
            .ok_or(StoreError::AssignmentNotFound { date, venue, id })?;
        let before = roster.assignments.len();
        roster.assignments.retain(|a| a.id != id);
        if roster.assignments.len() == before {
            return Err(StoreError::AssignmentNotFound { date, venue, id });
        }
        Ok(&*day)
    }

    /// Every assignment of the day, venue by venue. Empty for unknown dates.
    pub fn all_assignments_for_day(&self, date: NaiveDate) -> Vec<Assignment> {
        self.day(date).map(DaySchedule::all_assignments).unwrap_or_default()
    }

    pub fn find_assignment(&self, date: NaiveDate, id: Uuid) -> Option<&Assignment> {
        self.day(date)?.assignments().find(|a| a.id == id)
    }

    /// Dates that have at least one assignment, ascending.
    pub fn dates_with_schedules(&self) -> Vec<NaiveDate> {
        self.schedules
            .values()
            .filter(|day| day.has_assignments())
            .map(|day| day.date)
            .collect()
    }

    /// Every assignment held by `employee_id`, across all dates.
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<DatedAssignment> {
        self.schedules
            .values()
            .flat_map(|day| {
                day.assignments()
                    .filter(move |a| a.is_held_by(employee_id))
                    .map(move |a| DatedAssignment {
                        date: day.date,
                        assignment: a.clone(),
                    })
            })
            .collect()
    }

    // ── Conflict queries ────────────────────────────────────────────────────

    /// Which active `role` holders are free for `slot` on `date`.
    ///
    /// `current` is the assignment being edited and never blocks its holder.
    pub fn availability_for(
        &self,
        date: NaiveDate,
        role: Role,
        slot: &TimeSlot,
        current: Option<Uuid>,
    ) -> Availability {
        let pool: Vec<&str> = self
            .employees
            .by_role(role)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        get_available_employees(&pool, slot, &self.all_assignments_for_day(date), current)
    }

    /// Every double booking already stored for `date`.
    pub fn day_conflicts(&self, date: NaiveDate) -> Vec<DoubleBooking> {
        find_double_bookings(&self.all_assignments_for_day(date))
    }

    // ── Remote updates ──────────────────────────────────────────────────────

    /// Replace the part of the state covered by a remote snapshot.
    pub fn apply_remote(&mut self, snapshot: RemoteSnapshot) -> Result<()> {
        match snapshot {
            RemoteSnapshot::Schedules(raw) => {
                self.schedules = normalize::schedules_from_value(raw)?;
                tracing::debug!(days = self.schedules.len(), "applied remote schedules");
            }
            RemoteSnapshot::Employees(raw) => {
                self.employees = normalize::employees_from_value(raw)?;
                tracing::debug!(employees = self.employees.all().len(), "applied remote employees");
            }
        }
        Ok(())
    }

    fn day_entry(&mut self, date: NaiveDate) -> &mut DaySchedule {
        self.schedules.entry(date).or_insert_with(|| {
            tracing::debug!(%date, "creating empty day schedule");
            DaySchedule::empty(date)
        })
    }

    fn edit_assignment(
        &mut self,
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        edit: impl FnOnce(&mut Assignment),
    ) -> Result<&DaySchedule> {
        let day = self.schedules.get_mut(&date).ok_or(StoreError::DayNotFound(date))?;
        let assignment = day
            .venue_mut(venue)
            .and_then(|vs| vs.assignment_mut(id))
            .ok_or(StoreError::AssignmentNotFound { date, venue, id })?;
        edit(assignment);
        Ok(&*day)
    }
}

fn venue_entry(day: &mut DaySchedule, venue: Venue) -> &mut VenueSchedule {
    let index = match day.venues.iter().position(|vs| vs.venue_id == venue) {
        Some(index) => index,
        None => {
            day.venues.push(VenueSchedule::empty(venue));
            day.venues.len() - 1
        }
    };
    &mut day.venues[index]
}
