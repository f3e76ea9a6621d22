//! Tests for the roster data model and its JSON document shape.

use chrono::NaiveDate;
use serde_json::json;
use shift_engine::{Assignment, DaySchedule, Employee, Role, TimeSlot, Venue, VenueSchedule};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

#[test]
fn empty_day_has_every_venue_in_catalog_order() {
    let day = DaySchedule::empty(date());

    let venues: Vec<Venue> = day.venues.iter().map(|vs| vs.venue_id).collect();
    assert_eq!(venues, Venue::ALL.to_vec());
    assert!(!day.has_assignments());
}

#[test]
fn ensure_all_venues_appends_missing_rosters() {
    let mut day = DaySchedule {
        date: date(),
        venues: vec![VenueSchedule::empty(Venue::TooLate)],
    };

    day.ensure_all_venues();

    assert_eq!(day.venues.len(), Venue::ALL.len());
    assert_eq!(day.venues[0].venue_id, Venue::TooLate);
}

#[test]
fn unassigned_slot_is_stored_with_blank_employee() {
    let a = Assignment::unassigned(Venue::Studios, Role::Bar, TimeSlot::parse("21:00", "03:00").unwrap());

    let value = serde_json::to_value(&a).unwrap();

    assert_eq!(value["employeeId"], "");
    assert_eq!(value["venueId"], "studios");
    assert_eq!(value["roleId"], "bar");
}

#[test]
fn blank_or_missing_employee_reads_as_unassigned() {
    let blank = json!({
        "id": "6f1c1f2e-3b1a-4c55-9d1e-6b0f3f0a9a11",
        "employeeId": "",
        "venueId": "villa-peggys",
        "roleId": "guardaroba",
        "timeSlot": {"start": "22:00", "end": "Chiusura"}
    });
    let mut missing = blank.clone();
    missing.as_object_mut().unwrap().remove("employeeId");

    for value in [blank, missing] {
        let a: Assignment = serde_json::from_value(value).unwrap();
        assert!(!a.is_assigned());
        assert_eq!(a.venue_id, Venue::VillaPeggys);
        assert_eq!(a.role_id, Role::Guardaroba);
    }
}

#[test]
fn day_date_uses_iso_format() {
    let value = serde_json::to_value(DaySchedule::empty(date())).unwrap();

    assert_eq!(value["date"], "2026-03-14");
    assert_eq!(value["venues"][2]["venueId"], "la-casa-dei-gelsi");
}

#[test]
fn all_assignments_walks_venues_in_order() {
    let mut day = DaySchedule::empty(date());
    let slot = TimeSlot::parse("21:00", "03:00").unwrap();
    let late = Assignment::unassigned(Venue::VillaPeggys, Role::Sala, slot);
    let early = Assignment::unassigned(Venue::Studios, Role::Sala, slot);
    day.venue_mut(Venue::VillaPeggys).unwrap().assignments.push(late.clone());
    day.venue_mut(Venue::Studios).unwrap().assignments.push(early.clone());

    assert_eq!(day.all_assignments(), vec![early, late]);
}

#[test]
fn venue_and_role_parse_from_ids() {
    assert_eq!("tenuta-villa-peggys".parse::<Venue>().unwrap(), Venue::TenutaVillaPeggys);
    assert_eq!("cassa".parse::<Role>().unwrap(), Role::Cassa);
    assert!("Bar".parse::<Role>().is_err());
    assert!("downtown".parse::<Venue>().is_err());
}

#[test]
fn employee_roles_round_trip_through_ids() {
    let employee: Employee = serde_json::from_value(json!({
        "id": "e-1",
        "name": "Giulia",
        "roles": ["sala", "pass"],
        "active": true
    }))
    .unwrap();

    assert!(employee.has_role(Role::Pass));
    assert!(!employee.has_role(Role::Bar));
}
