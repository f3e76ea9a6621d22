//! Environment-driven settings.
//!
//! Every variable is optional. Invalid values are reported with
//! `tracing::warn!` and the default is kept, so a typo never stops the tool.

use std::path::PathBuf;
use std::str::FromStr;

use shift_engine::catalog::DEFAULT_TIME_SLOT;
use shift_engine::{SlotTime, TimeSlot};

/// Directory holding `schedules/` and `employees.json`.
pub const DATA_DIR: &str = "SHIFTS_DATA_DIR";
/// `pretty` (default) or `json`.
pub const LOG_FORMAT: &str = "SHIFTS_LOG_FORMAT";
/// Start time given to new assignments.
pub const DEFAULT_START: &str = "SHIFTS_DEFAULT_START";
/// End time given to new assignments.
pub const DEFAULT_END: &str = "SHIFTS_DEFAULT_END";

pub const DEFAULT_DATA_DIR: &str = "./shift-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
    /// Slot given to freshly added assignments.
    pub default_slot: TimeSlot,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_format: LogFormat::default(),
            default_slot: DEFAULT_TIME_SLOT,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        let data_dir = lookup(DATA_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(default.data_dir);

        let log_format = parse_or(&lookup, LOG_FORMAT, default.log_format);
        let start: SlotTime = parse_or(&lookup, DEFAULT_START, default.default_slot.start);
        let end: SlotTime = parse_or(&lookup, DEFAULT_END, default.default_slot.end);

        Self {
            data_dir,
            log_format,
            default_slot: TimeSlot::new(start, end),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(env_var = key, value = %raw, error = %e, "ignoring invalid configuration value");
            default
        }),
    }
}
