//! Error types for shift-store operations.

use std::path::PathBuf;

use chrono::NaiveDate;
use shift_engine::{ShiftError, Venue};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No schedule for {0}")]
    DayNotFound(NaiveDate),

    #[error("Assignment {id} not found at {venue} on {date}")]
    AssignmentNotFound {
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
    },

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// Backups are only readable when written by format version 1.0.
    #[error("Unsupported backup version: '{0}'")]
    UnsupportedBackupVersion(String),

    /// A stored or remote document does not have the expected shape.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Shift(#[from] ShiftError),
}

/// Convenience alias used throughout shift-store.
pub type Result<T> = std::result::Result<T, StoreError>;
