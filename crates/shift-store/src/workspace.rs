//! An [`AppState`] bound to a [`DocumentStore`]: every change is written through.
//!
//! Conflicts never block a write. Operations that can create a double booking
//! return the conflicting assignment (if any) after saving, and log it, so the
//! caller can warn.

use chrono::NaiveDate;
use shift_engine::{find_conflict, Assignment, DaySchedule, Employee, Role, TimeSlot, Venue};
use uuid::Uuid;

use crate::backup::Backup;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::persist::DocumentStore;
use crate::state::AppState;
use crate::sync::SyncFeed;

pub struct Workspace<S> {
    store: S,
    state: AppState,
}

impl<S: DocumentStore> Workspace<S> {
    /// Load schedules and roster from `store`.
    pub fn open(store: S, config: &StoreConfig) -> Result<Self> {
        let schedules = store.load_schedules()?;
        let employees = store.load_employees()?;
        tracing::info!(
            days = schedules.len(),
            employees = employees.all().len(),
            "workspace loaded"
        );
        let state = AppState::new(schedules, employees).with_default_slot(config.default_slot);
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Days and assignments ────────────────────────────────────────────────

    /// The day for `date`, created and saved if it did not exist yet.
    pub fn open_day(&mut self, date: NaiveDate) -> Result<&DaySchedule> {
        let created = self.state.day(date).is_none();
        let day = self.state.get_or_create_day(date);
        if created {
            self.store.save_day(day)?;
        }
        Ok(day)
    }

    pub fn add_assignment(&mut self, date: NaiveDate, venue: Venue, role: Role) -> Result<Uuid> {
        let (id, day) = self.state.add_assignment(date, venue, role);
        self.store.save_day(day)?;
        tracing::info!(%date, %venue, %role, %id, "assignment added");
        Ok(id)
    }

    /// Put `employee_id` on an assignment (or clear it with `None`).
    ///
    /// Returns the assignment the employee is already booked on, if any.
    pub fn assign_employee(
        &mut self,
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        employee_id: Option<&str>,
    ) -> Result<Option<Assignment>> {
        if let Some(employee_id) = employee_id {
            if self.state.employees().get(employee_id).is_none() {
                return Err(StoreError::EmployeeNotFound(employee_id.to_string()));
            }
        }
        let day = self
            .state
            .update_assignment_employee(date, venue, id, employee_id.map(str::to_string))?;
        self.store.save_day(day)?;
        Ok(self.conflict_of(date, id))
    }

    /// Change the slot of an assignment.
    ///
    /// Returns the assignment the holder is already booked on, if any.
    pub fn set_time(
        &mut self,
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        slot: TimeSlot,
    ) -> Result<Option<Assignment>> {
        if !slot.start.is_within_operating_day() || !slot.end.is_within_operating_day() {
            tracing::warn!(%date, %slot, "time slot lies outside the 18:00-06:00 operating day");
        }
        let day = self.state.update_assignment_time(date, venue, id, slot)?;
        self.store.save_day(day)?;
        Ok(self.conflict_of(date, id))
    }

    pub fn remove_assignment(&mut self, date: NaiveDate, venue: Venue, id: Uuid) -> Result<()> {
        let day = self.state.remove_assignment(date, venue, id)?;
        self.store.save_day(day)?;
        tracing::info!(%date, %venue, %id, "assignment removed");
        Ok(())
    }

    fn conflict_of(&self, date: NaiveDate, id: Uuid) -> Option<Assignment> {
        let assignment = self.state.find_assignment(date, id)?;
        let employee_id = assignment.employee_id.as_deref()?;
        let day = self.state.all_assignments_for_day(date);
        let conflict = find_conflict(employee_id, &assignment.time_slot, &day, Some(id))?.clone();
        tracing::warn!(
            %date,
            employee = employee_id,
            slot = %assignment.time_slot,
            conflict_venue = %conflict.venue_id,
            conflict_slot = %conflict.time_slot,
            "employee is double-booked"
        );
        Some(conflict)
    }

    // ── Employees ───────────────────────────────────────────────────────────

    pub fn add_employee(&mut self, name: &str, roles: &[Role]) -> Result<Employee> {
        let employee = self.state.employees_mut().add(name, roles).clone();
        self.store.save_employees(self.state.employees())?;
        tracing::info!(id = %employee.id, name = %employee.name, "employee added");
        Ok(employee)
    }

    pub fn update_employee(&mut self, id: &str, name: &str, roles: &[Role]) -> Result<Employee> {
        let employee = self.state.employees_mut().update(id, name, roles)?.clone();
        self.store.save_employees(self.state.employees())?;
        Ok(employee)
    }

    pub fn deactivate_employee(&mut self, id: &str) -> Result<Employee> {
        let employee = self.state.employees_mut().deactivate(id)?.clone();
        self.store.save_employees(self.state.employees())?;
        tracing::info!(id, "employee deactivated");
        Ok(employee)
    }

    pub fn add_role(&mut self, id: &str, role: Role) -> Result<Employee> {
        let employee = self.state.employees_mut().add_role(id, role)?.clone();
        self.store.save_employees(self.state.employees())?;
        Ok(employee)
    }

    pub fn remove_role(&mut self, id: &str, role: Role) -> Result<Employee> {
        let employee = self.state.employees_mut().remove_role(id, role)?.clone();
        self.store.save_employees(self.state.employees())?;
        Ok(employee)
    }

    // ── Whole-state operations ──────────────────────────────────────────────

    /// Replace everything with the contents of `backup` and rewrite the store.
    pub fn restore(&mut self, backup: Backup) -> Result<()> {
        let (schedules, employees) = backup.into_state_parts();
        // Old days are only removed once every new document is written.
        for day in schedules.values() {
            self.store.save_day(day)?;
        }
        self.store.save_employees(&employees)?;
        self.store.prune_schedules(&schedules.keys().copied().collect())?;
        tracing::info!(days = schedules.len(), employees = employees.all().len(), "backup restored");
        self.state.replace_all(schedules, employees);
        Ok(())
    }

    /// Apply pending remote snapshots. Remote data is already persisted on the
    /// remote side, so nothing is written back.
    pub fn sync(&mut self, feed: &SyncFeed) -> Result<usize> {
        feed.drain_into(&mut self.state)
    }
}
