//! `shifts` CLI: plan nightly staff rosters across the venues from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Register staff and the roles they can cover
//! shifts employee add "Anna Bianchi" --role bar,cassa
//! shifts employee list --role bar
//!
//! # Open a bar slot at Studios on 14 March and give it to Anna
//! shifts assign add 2026-03-14 studios bar          # prints the assignment id
//! shifts assign employee 2026-03-14 studios <id> "Anna Bianchi"
//! shifts assign time 2026-03-14 studios <id> 22:00 Chiusura
//!
//! # Who else can work the bar from 22:00 to 04:00 that night?
//! shifts available 2026-03-14 bar 22:00 04:00
//!
//! # Review the night, print the roster, look back
//! shifts day 2026-03-14
//! shifts conflicts 2026-03-14
//! shifts report 2026-03-14 -o ./out/
//! shifts history --venue too-late
//!
//! # Back up and restore everything
//! shifts backup export -o ./backups/
//! shifts backup import -i staff-scheduler-backup-2026-03-15.json
//! ```
//!
//! Data lives in `--data-dir` (or `SHIFTS_DATA_DIR`, default `./shift-data`).
//! Logs go to stderr; set `RUST_LOG=info` for more detail and
//! `SHIFTS_LOG_FORMAT=json` for JSON lines.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use shift_engine::{Assignment, DaySchedule, Employee, Role, SlotTime, TimeSlot, Venue};
use shift_store::config::{self, LogFormat};
use shift_store::report::italian_long_date;
use shift_store::{
    history, Backup, EmployeeRoster, HistoryFilter, JsonDirStore, RosterReport, StoreConfig,
    Workspace,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

type Store = Workspace<JsonDirStore>;

#[derive(Parser)]
#[command(name = "shifts", version, about = "Nightly staff rosters for a group of venues")]
struct Cli {
    /// Directory holding `schedules/` and `employees.json`
    #[arg(long, global = true, env = "SHIFTS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every assignment of one day
    Day {
        date: NaiveDate,
        /// Print the stored day document as JSON
        #[arg(long)]
        json: bool,
    },
    /// List dates that have at least one assignment
    Dates,
    /// Add, fill, retime or remove assignments
    Assign {
        #[command(subcommand)]
        command: AssignCommand,
    },
    /// Split the holders of a role into free and already booked for a slot
    Available {
        date: NaiveDate,
        role: Role,
        start: SlotTime,
        end: SlotTime,
        /// Assignment being edited; it never blocks its own holder
        #[arg(long)]
        exclude: Option<Uuid>,
        #[arg(long)]
        json: bool,
    },
    /// List employees booked twice at overlapping times on a day
    Conflicts { date: NaiveDate },
    /// Manage staff and their roles
    Employee {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Every past assignment, newest first
    History {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        venue: Option<Venue>,
        #[arg(long)]
        json: bool,
    },
    /// Printable roster of one day
    Report {
        date: NaiveDate,
        /// Output file or directory (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export or restore the whole data set
    Backup {
        #[command(subcommand)]
        command: BackupCommand,
    },
}

#[derive(Subcommand)]
enum AssignCommand {
    /// Open an empty slot for a role at a venue
    Add { date: NaiveDate, venue: Venue, role: Role },
    /// Put an employee (id or name) on a slot, or clear it when omitted
    Employee {
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        employee: Option<String>,
    },
    /// Change the start and end of a slot
    Time {
        date: NaiveDate,
        venue: Venue,
        id: Uuid,
        start: SlotTime,
        end: SlotTime,
    },
    /// Delete a slot
    Remove { date: NaiveDate, venue: Venue, id: Uuid },
}

#[derive(Subcommand)]
enum EmployeeCommand {
    /// Register a new employee
    Add {
        name: String,
        /// Roles the employee can cover (comma-separated or repeated)
        #[arg(long = "role", value_delimiter = ',')]
        roles: Vec<Role>,
    },
    /// List employees
    List {
        #[arg(long)]
        role: Option<Role>,
        /// Include deactivated employees
        #[arg(long)]
        all: bool,
    },
    /// Rename an employee or replace their roles
    Update {
        employee: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "role", value_delimiter = ',')]
        roles: Option<Vec<Role>>,
    },
    /// Hide an employee from new rosters; past rosters keep the name
    Deactivate { employee: String },
    AddRole { employee: String, role: Role },
    RemoveRole { employee: String, role: Role },
}

#[derive(Subcommand)]
enum BackupCommand {
    /// Write every employee and schedule to a versioned JSON file
    Export {
        /// Output file or directory (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all data with the contents of a backup file
    Import {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(log_format_from_env());

    let mut config = StoreConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let store = JsonDirStore::open(config.data_dir.clone()).with_context(|| {
        format!("Failed to open data directory: {}", config.data_dir.display())
    })?;
    let mut ws = Workspace::open(store, &config).context("Failed to load stored data")?;
    tracing::debug!(data_dir = %config.data_dir.display(), "data directory ready");

    match cli.command {
        Commands::Day { date, json } => show_day(&ws, date, json)?,
        Commands::Dates => {
            for date in ws.state().dates_with_schedules() {
                println!("{}", date);
            }
        }
        Commands::Assign { command } => assign(&mut ws, command)?,
        Commands::Available {
            date,
            role,
            start,
            end,
            exclude,
            json,
        } => {
            let slot = TimeSlot::new(start, end);
            let result = ws.state().availability_for(date, role, &slot, exclude);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let roster = ws.state().employees();
                println!("Available ({}):", result.available.len());
                for id in &result.available {
                    println!("  {:<20}  {}", roster.name_of(id).unwrap_or(id), id);
                }
                println!("Already booked ({}):", result.conflicting.len());
                for c in &result.conflicting {
                    println!(
                        "  {:<20}  {}  {} {}",
                        roster.name_of(&c.employee_id).unwrap_or(&c.employee_id),
                        c.employee_id,
                        c.conflict_with.venue_id.name(),
                        c.conflict_with.time_slot
                    );
                }
            }
        }
        Commands::Conflicts { date } => {
            let conflicts = ws.state().day_conflicts(date);
            if conflicts.is_empty() {
                println!("No conflicts on {}", date);
            }
            let roster = ws.state().employees();
            for c in &conflicts {
                println!(
                    "{}: {} {} overlaps {} {} ({} min)",
                    roster.name_of(&c.employee_id).unwrap_or(&c.employee_id),
                    c.first.venue_id.name(),
                    c.first.time_slot,
                    c.second.venue_id.name(),
                    c.second.time_slot,
                    c.overlap_minutes
                );
            }
        }
        Commands::Employee { command } => employee(&mut ws, command)?,
        Commands::History { role, venue, json } => {
            let rows = history(ws.state(), &HistoryFilter { role, venue });
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!(
                        "{}  {:<20}  {:<22}  {:<10}  {}-{}",
                        row.date,
                        row.employee_name,
                        row.venue.name(),
                        row.role.name(),
                        row.start,
                        row.end
                    );
                }
            }
        }
        Commands::Report { date, output } => {
            let day = ws
                .state()
                .day(date)
                .with_context(|| format!("No schedule for {}", date))?;
            let report = RosterReport::for_day(day, ws.state().employees());
            write_output(output.as_deref(), &report.file_name(), &report.render_text())?;
        }
        Commands::Backup { command } => match command {
            BackupCommand::Export { output } => {
                let backup = Backup::from_state(ws.state(), Utc::now());
                let json = backup.to_json_pretty().context("Failed to serialize backup")?;
                write_output(output.as_deref(), &backup.file_name(), &format!("{}\n", json))?;
            }
            BackupCommand::Import { input } => {
                let text = fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read file: {}", input.display()))?;
                let backup = Backup::parse(&text).context("Invalid backup file")?;
                let (employees, days) = (backup.employees.len(), backup.schedules.len());
                ws.restore(backup).context("Failed to restore backup")?;
                println!("Restored {} employees and {} days", employees, days);
            }
        },
    }

    Ok(())
}

fn show_day(ws: &Store, date: NaiveDate, json: bool) -> Result<()> {
    let empty;
    let day = match ws.state().day(date) {
        Some(day) => day,
        None => {
            empty = DaySchedule::empty(date);
            &empty
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(day)?);
        return Ok(());
    }

    println!("{}", italian_long_date(date));
    if !day.has_assignments() {
        println!("Nothing scheduled");
        return Ok(());
    }
    let roster = ws.state().employees();
    for vs in day.venues.iter().filter(|vs| !vs.assignments.is_empty()) {
        println!();
        println!("{}", vs.venue_id.name());
        for a in &vs.assignments {
            println!(
                "  {}  {:<10}  {:<20}  {}",
                a.id,
                a.role_id.name(),
                employee_label(a, roster),
                a.time_slot
            );
        }
    }
    Ok(())
}

fn assign(ws: &mut Store, command: AssignCommand) -> Result<()> {
    match command {
        AssignCommand::Add { date, venue, role } => {
            let id = ws.add_assignment(date, venue, role)?;
            println!("{}", id);
        }
        AssignCommand::Employee {
            date,
            venue,
            id,
            employee,
        } => {
            let employee_id = employee
                .as_deref()
                .map(|key| resolve_employee(ws.state().employees(), key))
                .transpose()?;
            let conflict = ws
                .assign_employee(date, venue, id, employee_id.as_deref())
                .context("Failed to update assignment")?;
            if let Some(conflict) = conflict {
                warn_conflict(ws.state().employees(), &conflict);
            }
        }
        AssignCommand::Time {
            date,
            venue,
            id,
            start,
            end,
        } => {
            let conflict = ws
                .set_time(date, venue, id, TimeSlot::new(start, end))
                .context("Failed to update assignment")?;
            if let Some(conflict) = conflict {
                warn_conflict(ws.state().employees(), &conflict);
            }
        }
        AssignCommand::Remove { date, venue, id } => {
            ws.remove_assignment(date, venue, id)
                .context("Failed to remove assignment")?;
        }
    }
    Ok(())
}

fn employee(ws: &mut Store, command: EmployeeCommand) -> Result<()> {
    match command {
        EmployeeCommand::Add { name, roles } => {
            if name.trim().is_empty() {
                bail!("Employee name must not be empty");
            }
            let employee = ws.add_employee(&name, &roles)?;
            println!("{}", employee.id);
        }
        EmployeeCommand::List { role, all } => {
            let roster = ws.state().employees();
            let listed = roster
                .all()
                .iter()
                .filter(|e| all || e.active)
                .filter(|e| role.is_none_or(|r| e.has_role(r)));
            for e in listed {
                println!("{}", employee_line(e));
            }
        }
        EmployeeCommand::Update {
            employee,
            name,
            roles,
        } => {
            if name.is_none() && roles.is_none() {
                bail!("Nothing to update: pass --name and/or --role");
            }
            let id = resolve_employee(ws.state().employees(), &employee)?;
            let current = ws
                .state()
                .employees()
                .get(&id)
                .cloned()
                .with_context(|| format!("No employee with id '{}'", id))?;
            let name = name.unwrap_or(current.name);
            let roles = roles.unwrap_or(current.roles);
            let updated = ws.update_employee(&id, &name, &roles)?;
            println!("{}", employee_line(&updated));
        }
        EmployeeCommand::Deactivate { employee } => {
            let id = resolve_employee(ws.state().employees(), &employee)?;
            let updated = ws.deactivate_employee(&id)?;
            println!("{}", employee_line(&updated));
        }
        EmployeeCommand::AddRole { employee, role } => {
            let id = resolve_employee(ws.state().employees(), &employee)?;
            let updated = ws.add_role(&id, role)?;
            println!("{}", employee_line(&updated));
        }
        EmployeeCommand::RemoveRole { employee, role } => {
            let id = resolve_employee(ws.state().employees(), &employee)?;
            let updated = ws.remove_role(&id, role)?;
            println!("{}", employee_line(&updated));
        }
    }
    Ok(())
}

/// Accept either an employee id or the (case-insensitive) name of exactly one
/// active employee.
fn resolve_employee(roster: &EmployeeRoster, key: &str) -> Result<String> {
    if let Some(employee) = roster.get(key) {
        return Ok(employee.id.clone());
    }
    let key = key.trim();
    let matches: Vec<&Employee> = roster
        .active()
        .filter(|e| e.name.eq_ignore_ascii_case(key))
        .collect();
    match matches.as_slice() {
        [one] => Ok(one.id.clone()),
        [] => bail!("No employee with id or name '{}'", key),
        _ => bail!(
            "'{}' matches {} employees; use the id instead",
            key,
            matches.len()
        ),
    }
}

fn employee_label(assignment: &Assignment, roster: &EmployeeRoster) -> String {
    match assignment.employee_id.as_deref() {
        None => "-".to_string(),
        Some(id) => roster.name_of(id).unwrap_or(id).to_string(),
    }
}

fn employee_line(employee: &Employee) -> String {
    let roles: Vec<&str> = employee.roles.iter().map(|r| r.name()).collect();
    format!(
        "{}  {:<20}  {}{}",
        employee.id,
        employee.name,
        roles.join(", "),
        if employee.active { "" } else { "  (inactive)" }
    )
}

/// The write has already happened; double bookings are only reported.
fn warn_conflict(roster: &EmployeeRoster, conflict: &Assignment) {
    let who = conflict
        .employee_id
        .as_deref()
        .map(|id| roster.name_of(id).unwrap_or(id))
        .unwrap_or("-");
    eprintln!(
        "warning: {} is already booked at {} ({}) {}",
        who,
        conflict.venue_id.name(),
        conflict.role_id.name(),
        conflict.time_slot
    );
}

fn write_output(path: Option<&Path>, default_name: &str, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            let target = if path.is_dir() {
                path.join(default_name)
            } else {
                path.to_path_buf()
            };
            fs::write(&target, content)
                .with_context(|| format!("Failed to write file: {}", target.display()))?;
            eprintln!("Wrote {}", target.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

fn log_format_from_env() -> LogFormat {
    std::env::var(config::LOG_FORMAT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Logs go to stderr so stdout stays clean for piping. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
