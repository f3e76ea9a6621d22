//! Error types for shift-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    /// A time label that is neither `HH:MM` nor the closing sentinel.
    #[error("Invalid time label: '{0}'")]
    InvalidTime(String),

    #[error("Unknown venue: '{0}'")]
    UnknownVenue(String),

    #[error("Unknown role: '{0}'")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, ShiftError>;
