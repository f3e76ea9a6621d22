//! Past-assignment history and the printable day roster.

use chrono::{Datelike, NaiveDate};
use shift_engine::{Role, TimeSlot, Venue};
use shift_store::report::italian_long_date;
use shift_store::{history, AppState, HistoryFilter, RosterReport};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn assign(state: &mut AppState, day: u32, venue: Venue, role: Role, who: Option<&str>, slot: (&str, &str)) {
    let (id, _) = state.add_assignment(date(day), venue, role);
    state
        .update_assignment_employee(date(day), venue, id, who.map(str::to_string))
        .unwrap();
    state
        .update_assignment_time(date(day), venue, id, TimeSlot::parse(slot.0, slot.1).unwrap())
        .unwrap();
}

/// Anna works bar on the 13th and cassa on the 14th, Luca works sala on the
/// 14th, one slot is left open and one points at a deleted employee.
fn sample() -> (AppState, String, String) {
    let mut state = AppState::default();
    let anna = state.employees_mut().add("Anna", &[Role::Bar, Role::Cassa]).id.clone();
    let luca = state.employees_mut().add("Luca", &[Role::Sala]).id.clone();

    assign(&mut state, 13, Venue::Studios, Role::Bar, Some(anna.as_str()), ("21:00", "03:00"));
    assign(&mut state, 14, Venue::TooLate, Role::Sala, Some(luca.as_str()), ("22:00", "Chiusura"));
    assign(&mut state, 14, Venue::TooLate, Role::Cassa, Some(anna.as_str()), ("21:30", "02:00"));
    assign(&mut state, 14, Venue::TooLate, Role::Bar, None, ("21:00", "03:00"));
    assign(&mut state, 14, Venue::Studios, Role::Pass, Some("deleted-id"), ("21:00", "03:00"));
    (state, anna, luca)
}

// ── History ─────────────────────────────────────────────────────────────────

#[test]
fn history_is_newest_first_and_skips_unresolvable_rows() {
    let (state, anna, luca) = sample();

    let rows = history(&state, &HistoryFilter::default());

    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.date.day(), r.employee_id.clone(), r.role))
        .collect();
    assert_eq!(
        summary,
        vec![
            (14, luca, Role::Sala),
            (14, anna.clone(), Role::Cassa),
            (13, anna, Role::Bar),
        ]
    );
    assert_eq!(rows[0].employee_name, "Luca");
    assert_eq!(rows[0].end.to_string(), "Chiusura");
}

#[test]
fn history_filters_by_role_and_venue() {
    let (state, anna, _) = sample();

    let by_role = history(&state, &HistoryFilter { role: Some(Role::Bar), venue: None });
    assert_eq!(by_role.len(), 1);
    assert_eq!(by_role[0].employee_id, anna);

    let by_venue = history(&state, &HistoryFilter { role: None, venue: Some(Venue::TooLate) });
    assert_eq!(by_venue.len(), 2);

    let both = history(
        &state,
        &HistoryFilter { role: Some(Role::Bar), venue: Some(Venue::TooLate) },
    );
    assert!(both.is_empty());
}

#[test]
fn deactivated_employees_stay_in_history() {
    let (mut state, anna, _) = sample();
    state.employees_mut().deactivate(&anna).unwrap();

    let rows = history(&state, &HistoryFilter { role: Some(Role::Cassa), venue: None });

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_name, "Anna");
}

// ── Report ──────────────────────────────────────────────────────────────────

#[test]
fn italian_dates() {
    assert_eq!(italian_long_date(date(14)), "sabato 14 marzo 2026");
    assert_eq!(
        italian_long_date(NaiveDate::from_ymd_opt(2026, 12, 28).unwrap()),
        "lunedì 28 dicembre 2026"
    );
}

#[test]
fn report_groups_by_venue_then_role() {
    let (state, _, _) = sample();
    let day = state.day(date(14)).unwrap();

    let report = RosterReport::for_day(day, state.employees());

    assert_eq!(report.title, "Programmazione - sabato 14 marzo 2026");
    assert_eq!(report.file_name(), "programmazione-2026-03-14.txt");
    let venues: Vec<_> = report.sections.iter().map(|s| s.venue).collect();
    assert_eq!(venues, vec![Venue::Studios, Venue::TooLate]);

    let too_late = &report.sections[1];
    let rows: Vec<_> = too_late.rows.iter().map(|r| (r.role, r.employee.as_str())).collect();
    assert_eq!(rows, vec![(Role::Sala, "Luca"), (Role::Cassa, "Anna")]);
    assert_eq!(report.sections[0].rows[0].employee, "deleted-id");
}

#[test]
fn report_text_is_aligned() {
    let (state, _, _) = sample();
    let report = RosterReport::for_day(state.day(date(13)).unwrap(), state.employees());

    let text = report.render_text();

    assert_eq!(
        text,
        "Programmazione - venerdì 13 marzo 2026\n\
         \n\
         Studios\n\
         Ruolo  Dipendente  Inizio  Fine\n\
         Bar    Anna        21:00   03:00\n"
    );
}

#[test]
fn day_without_filled_slots_gives_empty_report() {
    let mut state = AppState::default();
    state.add_assignment(date(20), Venue::Studios, Role::Bar);

    let report = RosterReport::for_day(state.day(date(20)).unwrap(), state.employees());

    assert!(report.is_empty());
    assert_eq!(report.render_text(), "Programmazione - venerdì 20 marzo 2026\n");
}
