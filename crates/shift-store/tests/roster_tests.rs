use shift_engine::Role;
use shift_store::{EmployeeRoster, StoreError};

#[test]
fn add_trims_name_dedups_roles_and_marks_initialized() {
    let mut roster = EmployeeRoster::default();
    assert!(!roster.is_initialized());

    let employee = roster.add("  Giulia ", &[Role::Bar, Role::Sala, Role::Bar]).clone();

    assert_eq!(employee.name, "Giulia");
    assert_eq!(employee.roles, vec![Role::Bar, Role::Sala]);
    assert!(employee.active);
    assert!(roster.is_initialized());
    assert_eq!(roster.get(&employee.id), Some(&employee));
}

#[test]
fn ids_are_unique() {
    let mut roster = EmployeeRoster::default();
    let a = roster.add("Marco", &[]).id.clone();
    let b = roster.add("Marco", &[]).id.clone();
    assert_ne!(a, b);
}

#[test]
fn update_replaces_name_and_roles() {
    let mut roster = EmployeeRoster::default();
    let id = roster.add("Marco", &[Role::Bar]).id.clone();

    let updated = roster.update(&id, "Marco R.", &[Role::Cassa]).unwrap();

    assert_eq!(updated.name, "Marco R.");
    assert_eq!(updated.roles, vec![Role::Cassa]);
}

#[test]
fn deactivated_employee_stays_resolvable() {
    let mut roster = EmployeeRoster::default();
    let id = roster.add("Sara", &[Role::Guardaroba]).id.clone();

    roster.deactivate(&id).unwrap();

    assert_eq!(roster.name_of(&id), Some("Sara"));
    assert_eq!(roster.active().count(), 0);
    assert!(roster.by_role(Role::Guardaroba).is_empty());
    assert_eq!(roster.all().len(), 1);
}

#[test]
fn by_role_keeps_roster_order() {
    let mut roster = EmployeeRoster::default();
    let a = roster.add("A", &[Role::Pass]).id.clone();
    roster.add("B", &[Role::Sala]);
    let c = roster.add("C", &[Role::Sala, Role::Pass]).id.clone();

    let ids: Vec<_> = roster.by_role(Role::Pass).into_iter().map(|e| e.id.clone()).collect();

    assert_eq!(ids, vec![a, c]);
}

#[test]
fn add_and_remove_role() {
    let mut roster = EmployeeRoster::default();
    let id = roster.add("Elena", &[Role::Sala]).id.clone();

    roster.add_role(&id, Role::Bar).unwrap();
    roster.add_role(&id, Role::Bar).unwrap();
    assert_eq!(roster.get(&id).unwrap().roles, vec![Role::Sala, Role::Bar]);

    roster.remove_role(&id, Role::Sala).unwrap();
    assert_eq!(roster.get(&id).unwrap().roles, vec![Role::Bar]);
}

#[test]
fn unknown_id_is_reported() {
    let mut roster = EmployeeRoster::default();
    let err = roster.deactivate("ghost").unwrap_err();
    assert!(matches!(err, StoreError::EmployeeNotFound(ref id) if id == "ghost"));
    assert_eq!(err.to_string(), "Employee not found: ghost");
}

#[test]
fn serializes_as_list_document() {
    let mut roster = EmployeeRoster::default();
    roster.add("Luca", &[Role::Bar]);

    let json = serde_json::to_value(&roster).unwrap();

    assert_eq!(json["initialized"], true);
    assert_eq!(json["list"][0]["name"], "Luca");
    assert_eq!(json["list"][0]["roles"][0], "bar");
    assert_eq!(json["list"][0]["active"], true);
}
