//! Where schedules and the roster live between runs.
//!
//! Both implementations hand their raw documents to [`normalize`](crate::normalize)
//! on load, so a file written by hand or copied from the remote store is read
//! with the same tolerance as a pushed snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::{Map, Value};
use shift_engine::DaySchedule;

use crate::error::{Result, StoreError};
use crate::normalize;
use crate::roster::EmployeeRoster;

pub trait DocumentStore {
    fn load_schedules(&self) -> Result<BTreeMap<NaiveDate, DaySchedule>>;

    /// Write one day document, replacing any previous version.
    fn save_day(&mut self, day: &DaySchedule) -> Result<()>;

    /// Drop every stored day whose date is not in `keep`.
    fn prune_schedules(&mut self, keep: &BTreeSet<NaiveDate>) -> Result<()>;

    fn load_employees(&self) -> Result<EmployeeRoster>;

    fn save_employees(&mut self, roster: &EmployeeRoster) -> Result<()>;
}

// ── JSON directory ──────────────────────────────────────────────────────────

/// Local persistence as pretty-printed JSON files:
///
/// ```text
/// <root>/employees.json            { "list": [...], "initialized": true }
/// <root>/schedules/2026-03-14.json { "date": "2026-03-14", "venues": [...] }
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    const SCHEDULES_DIR: &'static str = "schedules";
    const EMPLOYEES_FILE: &'static str = "employees.json";

    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let schedules = root.join(Self::SCHEDULES_DIR);
        fs::create_dir_all(&schedules).map_err(|source| StoreError::Io {
            path: schedules.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    fn schedules_dir(&self) -> PathBuf {
        self.root.join(Self::SCHEDULES_DIR)
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.schedules_dir().join(format!("{}.json", date))
    }

    fn employees_path(&self) -> PathBuf {
        self.root.join(Self::EMPLOYEES_FILE)
    }
}

impl DocumentStore for JsonDirStore {
    fn load_schedules(&self) -> Result<BTreeMap<NaiveDate, DaySchedule>> {
        let dir = self.schedules_dir();
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut documents = Map::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Io {
                    path: dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match read_json(&path) {
                Ok(value) => {
                    documents.insert(key, value);
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable day file"),
            }
        }

        normalize::schedules_from_value(Value::Object(documents))
    }

    fn save_day(&mut self, day: &DaySchedule) -> Result<()> {
        let path = self.day_path(day.date);
        write_json(&path, &serde_json::to_value(day)?)?;
        tracing::debug!(date = %day.date, path = %path.display(), "saved day schedule");
        Ok(())
    }

    fn prune_schedules(&mut self, keep: &BTreeSet<NaiveDate>) -> Result<()> {
        let dir = self.schedules_dir();
        let io = |source: std::io::Error| StoreError::Io {
            path: dir.clone(),
            source,
        };
        for entry in fs::read_dir(&dir).map_err(io)? {
            let path = entry.map_err(io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let kept = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|stem| stem.parse::<NaiveDate>().ok())
                .is_some_and(|date| keep.contains(&date));
            if !kept {
                fs::remove_file(&path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
                tracing::debug!(path = %path.display(), "removed stale day file");
            }
        }
        Ok(())
    }

    fn load_employees(&self) -> Result<EmployeeRoster> {
        let path = self.employees_path();
        if !path.exists() {
            return Ok(EmployeeRoster::default());
        }
        normalize::employees_from_value(read_json(&path)?)
    }

    fn save_employees(&mut self, roster: &EmployeeRoster) -> Result<()> {
        let path = self.employees_path();
        write_json(&path, &serde_json::to_value(roster)?)?;
        tracing::debug!(employees = roster.all().len(), "saved employees");
        Ok(())
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Write through a sibling `.json.tmp` file and rename it into place, so a
/// failed write never leaves a truncated document behind.
fn write_json(path: &Path, value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── In memory ───────────────────────────────────────────────────────────────

/// Raw documents kept in memory, shaped like the remote store's tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    schedules: Map<String, Value>,
    employees: Value,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw documents, e.g. an export of the remote tree.
    pub fn from_documents(schedules: Value, employees: Value) -> Self {
        let schedules = match schedules {
            Value::Object(days) => days,
            _ => Map::new(),
        };
        Self { schedules, employees }
    }

    pub fn day_document(&self, date: NaiveDate) -> Option<&Value> {
        self.schedules.get(&date.to_string())
    }

    pub fn employees_document(&self) -> &Value {
        &self.employees
    }
}

impl DocumentStore for MemoryStore {
    fn load_schedules(&self) -> Result<BTreeMap<NaiveDate, DaySchedule>> {
        normalize::schedules_from_value(Value::Object(self.schedules.clone()))
    }

    fn save_day(&mut self, day: &DaySchedule) -> Result<()> {
        self.schedules.insert(day.date.to_string(), serde_json::to_value(day)?);
        Ok(())
    }

    fn prune_schedules(&mut self, keep: &BTreeSet<NaiveDate>) -> Result<()> {
        self.schedules
            .retain(|key, _| key.parse::<NaiveDate>().is_ok_and(|date| keep.contains(&date)));
        Ok(())
    }

    fn load_employees(&self) -> Result<EmployeeRoster> {
        normalize::employees_from_value(self.employees.clone())
    }

    fn save_employees(&mut self, roster: &EmployeeRoster) -> Result<()> {
        self.employees = serde_json::to_value(roster)?;
        Ok(())
    }
}
