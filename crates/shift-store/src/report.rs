//! Printable roster for one day.
//!
//! Builds the table a manager hands out at the door: one section per venue
//! with at least one filled slot, rows grouped by role in catalog order. The
//! layout engine is somebody else's job; [`RosterReport::render_text`] gives a
//! plain aligned rendering for terminals and text files.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shift_engine::{DaySchedule, Role, SlotTime, Venue};

use crate::roster::EmployeeRoster;

const HEADERS: [&str; 4] = ["Ruolo", "Dipendente", "Inizio", "Fine"];

const WEEKDAYS: [&str; 7] = [
    "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato", "domenica",
];

const MONTHS: [&str; 12] = [
    "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
    "settembre", "ottobre", "novembre", "dicembre",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    pub role: Role,
    pub employee: String,
    pub start: SlotTime,
    pub end: SlotTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSection {
    pub venue: Venue,
    pub rows: Vec<RosterRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterReport {
    pub date: NaiveDate,
    pub title: String,
    pub sections: Vec<VenueSection>,
}

impl RosterReport {
    /// Unknown employee ids are printed as-is.
    pub fn for_day(day: &DaySchedule, roster: &EmployeeRoster) -> Self {
        let sections = Venue::ALL
            .into_iter()
            .filter_map(|venue| day.venue(venue))
            .filter(|vs| vs.assigned_count() > 0)
            .map(|vs| {
                let rows = Role::ALL
                    .into_iter()
                    .flat_map(move |role| {
                        vs.assignments
                            .iter()
                            .filter(move |a| a.role_id == role)
                            .filter_map(move |a| {
                                let id = a.employee_id.as_deref()?;
                                Some(RosterRow {
                                    role: a.role_id,
                                    employee: roster.name_of(id).unwrap_or(id).to_string(),
                                    start: a.time_slot.start,
                                    end: a.time_slot.end,
                                })
                            })
                    })
                    .collect();
                VenueSection {
                    venue: vs.venue_id,
                    rows,
                }
            })
            .collect();

        Self {
            date: day.date,
            title: format!("Programmazione - {}", italian_long_date(day.date)),
            sections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// `programmazione-<YYYY-MM-DD>.txt`
    pub fn file_name(&self) -> String {
        format!("programmazione-{}.txt", self.date)
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.title);

        for section in &self.sections {
            let cells: Vec<[String; 4]> = section
                .rows
                .iter()
                .map(|row| {
                    [
                        row.role.name().to_string(),
                        row.employee.clone(),
                        row.start.to_string(),
                        row.end.to_string(),
                    ]
                })
                .collect();

            let mut widths = HEADERS.map(|h| h.chars().count());
            for row in &cells {
                for (w, cell) in widths.iter_mut().zip(row) {
                    *w = (*w).max(cell.chars().count());
                }
            }

            out.push('\n');
            out.push_str(section.venue.name());
            out.push('\n');
            out.push_str(&format_line(&HEADERS.map(str::to_string), &widths));
            for row in &cells {
                out.push_str(&format_line(row, &widths));
            }
        }

        out
    }
}

fn format_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w - cell.chars().count();
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

/// `sabato 14 marzo 2026`
pub fn italian_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}
