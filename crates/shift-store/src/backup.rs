//! Whole-state backup files.
//!
//! ```json
//! { "version": "1.0",
//!   "exportDate": "2026-03-15T10:12:00Z",
//!   "employees": [ ... ],
//!   "schedules": { "2026-03-14": { "date": "2026-03-14", "venues": [ ... ] } } }
//! ```
//!
//! Only version `1.0` is understood. Restoring replaces employees and
//! schedules wholesale; nothing is merged.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shift_engine::{DaySchedule, Employee};

use crate::error::{Result, StoreError};
use crate::normalize;
use crate::roster::EmployeeRoster;
use crate::state::AppState;

pub const BACKUP_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub employees: Vec<Employee>,
    pub schedules: BTreeMap<NaiveDate, DaySchedule>,
}

impl Backup {
    /// Snapshot `state` as of `export_date`.
    pub fn from_state(state: &AppState, export_date: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            export_date,
            employees: state.employees().all().to_vec(),
            schedules: state.schedules().clone(),
        }
    }

    /// Parse a backup file.
    ///
    /// # Errors
    /// - `StoreError::Json` if the text is not JSON,
    /// - `StoreError::UnsupportedBackupVersion` if `version` is not `"1.0"`,
    /// - `StoreError::MalformedDocument` if required fields are missing.
    pub fn parse(text: &str) -> Result<Self> {
        let mut raw: Value = serde_json::from_str(text)?;

        match raw.get("version") {
            Some(Value::String(v)) if v == BACKUP_VERSION => {}
            Some(Value::String(v)) => return Err(StoreError::UnsupportedBackupVersion(v.clone())),
            Some(other) => return Err(StoreError::UnsupportedBackupVersion(other.to_string())),
            None => {
                return Err(StoreError::MalformedDocument(
                    "backup has no version field".to_string(),
                ))
            }
        }

        let obj = raw
            .as_object_mut()
            .ok_or_else(|| StoreError::MalformedDocument("backup must be an object".to_string()))?;
        let schedules = normalize::schedules_from_value(obj.remove("schedules").unwrap_or(Value::Null))?;
        obj.insert("schedules".to_string(), Value::Object(Default::default()));

        let mut backup: Backup = serde_json::from_value(raw)
            .map_err(|e| StoreError::MalformedDocument(format!("invalid backup: {}", e)))?;
        backup.schedules = schedules;
        Ok(backup)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `staff-scheduler-backup-<YYYY-MM-DD>.json`, dated by the export.
    pub fn file_name(&self) -> String {
        format!(
            "staff-scheduler-backup-{}.json",
            self.export_date.date_naive()
        )
    }

    pub fn into_state_parts(self) -> (BTreeMap<NaiveDate, DaySchedule>, EmployeeRoster) {
        (self.schedules, EmployeeRoster::new(self.employees, true))
    }
}
