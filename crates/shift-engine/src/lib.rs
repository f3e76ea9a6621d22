//! # shift-engine
//!
//! Overnight-aware time slots and staff availability for venue rosters.
//!
//! Venues open at 18:00 and close at 06:00 the next morning. A shift such as
//! 21:00 → 01:00 crosses midnight, so plain wall-clock comparison gives the
//! wrong answer. This crate maps every label onto a single timeline that starts
//! at 18:00, then uses half-open interval intersection to decide whether an
//! employee is free for a candidate slot or already booked elsewhere that day.
//!
//! ## Quick start
//!
//! ```rust
//! use shift_engine::{get_available_employees, Assignment, Role, TimeSlot, Venue};
//!
//! let mut booked = Assignment::unassigned(Venue::Studios, Role::Bar, TimeSlot::parse("21:00", "01:00").unwrap());
//! booked.employee_id = Some("marco".to_string());
//!
//! let candidate = TimeSlot::parse("00:00", "02:00").unwrap();
//! let result = get_available_employees(&["marco", "giulia"], &candidate, &[booked], None);
//!
//! assert_eq!(result.available, vec!["giulia".to_string()]);
//! assert_eq!(result.conflicting[0].employee_id, "marco");
//! ```
//!
//! ## Modules
//!
//! - [`timeline`]: time labels → minutes on the operating-day timeline, overlap test
//! - [`conflict`]: first conflicting assignment for an employee, double-booking audit
//! - [`availability`]: partition a pool of employees into free / booked
//! - [`model`]: assignments, venue and day schedules, employees
//! - [`catalog`]: venues, roles, selectable times and defaults
//! - [`error`]: Error types

pub mod availability;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod model;
pub mod timeline;

pub use availability::{get_available_employees, Availability, ConflictingEmployee};
pub use catalog::{Role, Venue};
pub use conflict::{find_conflict, find_double_bookings, DoubleBooking};
pub use error::ShiftError;
pub use model::{Assignment, DaySchedule, Employee, EmployeeId, VenueSchedule};
pub use timeline::{overlap, time_to_minutes, SlotTime, TimeSlot};
