//! # shift-store
//!
//! Application state and persistence around [`shift_engine`].
//!
//! [`AppState`] is an explicit value owned by the caller: every mutation hands
//! back the day (or roster) snapshot that has to be written, and a
//! [`Workspace`] pairs the state with a [`DocumentStore`] so those snapshots
//! reach disk. Remote updates arrive through a [`SyncFeed`] and replace the
//! matching part of the state after normalization.
//!
//! ## Modules
//!
//! - [`state`]: days, assignments and availability queries
//! - [`roster`]: employees and their roles (soft delete only)
//! - [`persist`]: `DocumentStore` trait, JSON directory and in-memory stores
//! - [`workspace`]: state + store, write-through on every change
//! - [`normalize`]: turn loosely shaped remote documents into typed values
//! - [`sync`]: channel of remote snapshots
//! - [`backup`]: versioned whole-state export/import
//! - [`history`]: every past assignment, filterable by role and venue
//! - [`report`]: printable roster table for one day
//! - [`config`]: environment-driven settings
//! - [`error`]: Error types

pub mod backup;
pub mod config;
pub mod error;
pub mod history;
pub mod normalize;
pub mod persist;
pub mod report;
pub mod roster;
pub mod state;
pub mod sync;
pub mod workspace;

pub use backup::Backup;
pub use config::{LogFormat, StoreConfig};
pub use error::StoreError;
pub use history::{history, HistoryEntry, HistoryFilter};
pub use persist::{DocumentStore, JsonDirStore, MemoryStore};
pub use report::RosterReport;
pub use roster::EmployeeRoster;
pub use state::{AppState, DatedAssignment};
pub use sync::{RemoteSnapshot, SyncFeed};
pub use workspace::Workspace;
