// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional sync tests: plan persistence, soft delete guards,
//! resource status fan-out, and canonical code regeneration.

use airfis_core::{ChangeSet, CreationPlan, SyncPlan, apply, ChangeRequest};
use airfis_domain::{BeltStatus, FlightStatus, GateStatus};
use airfis_events::EventKind;
use diesel::prelude::*;

use crate::diesel_schema::airlines;
use crate::tests::{
    create_test_store, created_event, insert_flight, insert_flight_without_history, seed_topology,
    test_flight,
};
use crate::{BackendConnection, Persistence, PersistenceError};

fn boarding() -> FlightStatus {
    FlightStatus::with_id(2, "BRD", "Boarding")
}

/// Reads an airline row straight off the table: `None` when absent,
/// otherwise the stored display name.
fn airline_row(store: &mut Persistence, code: &str) -> Option<Option<String>> {
    let BackendConnection::Sqlite(conn) = &mut store.conn else {
        panic!("standard tests run against SQLite");
    };
    airlines::table
        .filter(airlines::airline_code.eq(code))
        .select(airlines::airline_name)
        .first::<Option<String>>(conn)
        .optional()
        .unwrap()
}

#[test]
fn test_persist_plan_applies_changes_and_events_together() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let state = store.load_flight_state(flight_id).unwrap();
    let plan = apply(&state, ChangeRequest::Status { new_status: boarding() }).unwrap();
    store.persist_plan(&plan).unwrap();

    let updated = store.get_flight(flight_id).unwrap();
    assert_eq!(updated.status_id, 2);

    let events = store.list_events(flight_id).unwrap();
    let status_events: Vec<_> = events
        .iter()
        .filter(|e| e.kind == EventKind::StatusChange)
        .collect();
    assert_eq!(status_events.len(), 1);
    assert_eq!(status_events[0].old_value.as_deref(), Some("Scheduled"));
    assert_eq!(status_events[0].new_value.as_deref(), Some("Boarding"));
}

#[test]
fn test_no_op_status_update_still_logs() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let state = store.load_flight_state(flight_id).unwrap();
    let plan = apply(
        &state,
        ChangeRequest::Status {
            new_status: FlightStatus::with_id(1, "SCH", "Scheduled"),
        },
    )
    .unwrap();
    assert!(plan.changes.is_empty());
    store.persist_plan(&plan).unwrap();

    // The record is untouched but the operator action is on the timeline.
    assert_eq!(store.get_flight(flight_id).unwrap().status_id, 1);
    assert_eq!(store.count_events(flight_id).unwrap(), 2);
}

#[test]
fn test_gate_assignment_round_trip() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let gate = store.get_gate(topology.gate_id).unwrap();
    let state = store.load_flight_state(flight_id).unwrap();
    let plan = apply(&state, ChangeRequest::Gate { new_gate: Some(gate) }).unwrap();
    store.persist_plan(&plan).unwrap();

    let updated = store.get_flight(flight_id).unwrap();
    assert_eq!(updated.gate_id, Some(topology.gate_id));
    assert_eq!(updated.terminal_id, Some(topology.terminal_id));

    let events = store.list_events(flight_id).unwrap();
    assert!(events.iter().any(|e| e.kind == EventKind::GateChange));
}

#[test]
fn test_soft_delete_is_blocked_by_event_history() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let result = store.soft_delete_flight(flight_id);
    assert!(matches!(
        result,
        Err(PersistenceError::FlightReferenced { .. })
    ));
    assert!(!store.get_flight(flight_id).unwrap().is_deleted());
}

#[test]
fn test_soft_delete_is_blocked_by_connections() {
    let mut store = create_test_store();
    let arrival = insert_flight_without_history(&mut store, test_flight("SQ910", Some("feed-a")));
    let departure = insert_flight_without_history(&mut store, test_flight("PR501", Some("feed-b")));
    store.add_connection(arrival, departure).unwrap();

    let result = store.soft_delete_flight(departure);
    assert!(matches!(
        result,
        Err(PersistenceError::FlightReferenced { .. })
    ));
}

#[test]
fn test_clean_soft_delete_and_repeat_delete() {
    let mut store = create_test_store();
    let flight_id = insert_flight_without_history(&mut store, test_flight("PR501", None));

    store.soft_delete_flight(flight_id).unwrap();
    assert!(store.get_flight(flight_id).unwrap().is_deleted());

    let again = store.soft_delete_flight(flight_id);
    assert!(matches!(again, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_gate_status_change_fans_out_to_assigned_flights() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);

    let mut assigned = test_flight("PR501", Some("feed-1"));
    assigned.gate_id = Some(topology.gate_id);
    let assigned_id = insert_flight(&mut store, assigned);

    let unassigned_id = insert_flight(&mut store, test_flight("PR502", Some("feed-2")));

    let notified = store
        .set_gate_status(topology.gate_id, GateStatus::Closed)
        .unwrap();
    assert_eq!(notified, 1);

    let gate = store.get_gate(topology.gate_id).unwrap();
    assert_eq!(gate.gate_status(), GateStatus::Closed);

    let events = store.list_events(assigned_id).unwrap();
    let gate_event = events
        .iter()
        .find(|e| e.kind == EventKind::GateChange)
        .unwrap();
    assert_eq!(gate_event.old_value.as_deref(), Some("Open"));
    assert_eq!(gate_event.new_value.as_deref(), Some("Closed"));

    assert_eq!(store.count_events(unassigned_id).unwrap(), 1);
}

#[test]
fn test_belt_status_change_fans_out_to_assigned_flights() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);

    let mut assigned = test_flight("SQ910", None);
    assigned.belt_id = Some(topology.belt_id);
    let assigned_id = insert_flight(&mut store, assigned);

    let notified = store
        .set_belt_status(topology.belt_id, BeltStatus::Maintenance)
        .unwrap();
    assert_eq!(notified, 1);

    let belt = store.get_belt(topology.belt_id).unwrap();
    assert_eq!(belt.belt_status(), BeltStatus::Maintenance);

    let events = store.list_events(assigned_id).unwrap();
    let belt_event = events
        .iter()
        .find(|e| e.kind == EventKind::ClaimChange)
        .unwrap();
    assert_eq!(belt_event.new_value.as_deref(), Some("Maintenance"));
}

#[test]
fn test_gate_status_change_unknown_gate_is_not_found() {
    let mut store = create_test_store();

    let result = store.set_gate_status(777, GateStatus::Closed);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_empty_plan_with_events_only_appends() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let plan = SyncPlan {
        flight_id,
        changes: ChangeSet::default(),
        events: Vec::new(),
    };
    store.persist_plan(&plan).unwrap();
    assert_eq!(store.count_events(flight_id).unwrap(), 1);
}

#[test]
fn test_rename_gate_regenerates_canonical_code() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);
    let old_canonical = format!("{}-A2", topology.terminal_id);

    let new_canonical = store.rename_gate(topology.gate_id, "b7").unwrap();
    assert_eq!(new_canonical, format!("{}-B7", topology.terminal_id));

    assert!(store.resolve_gate(&new_canonical).is_ok());
    assert!(matches!(
        store.resolve_gate(&old_canonical),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_rename_belt_regenerates_canonical_code() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);

    let new_canonical = store.rename_belt(topology.belt_id, "c9").unwrap();
    assert_eq!(new_canonical, format!("{}-C9", topology.terminal_id));
    assert!(store.resolve_belt(&new_canonical).is_ok());
}

#[test]
fn test_delete_terminal_refuses_while_resources_exist() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);

    let occupied = store.delete_terminal(topology.terminal_id);
    assert!(matches!(
        occupied,
        Err(PersistenceError::TerminalOccupied { .. })
    ));

    let empty_terminal = store
        .create_terminal(topology.airport_id, "5", None)
        .unwrap();
    store.delete_terminal(empty_terminal).unwrap();
}

#[test]
fn test_gate_airline_authorization() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);

    // No authorization rows means every airline is welcome.
    assert!(store.gate_allows_airline(topology.gate_id, "PR").unwrap());

    let airline_id = store.ensure_airline("SQ", Some("Singapore Airlines")).unwrap();
    store
        .authorize_airline_for_gate(topology.gate_id, airline_id)
        .unwrap();

    assert!(store.gate_allows_airline(topology.gate_id, "SQ").unwrap());
    assert!(!store.gate_allows_airline(topology.gate_id, "PR").unwrap());
}

#[test]
fn test_gate_aircraft_restrictions() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);

    assert!(store.gate_allows_aircraft(topology.gate_id, "A380").unwrap());

    store
        .restrict_gate_aircraft(topology.gate_id, "A380")
        .unwrap();

    assert!(!store.gate_allows_aircraft(topology.gate_id, "A380").unwrap());
    assert!(store.gate_allows_aircraft(topology.gate_id, "A321").unwrap());
}

#[test]
fn test_creation_upserts_airline_row() {
    let mut store = create_test_store();
    let mut flight = test_flight("SQ910", Some("feed-1"));
    flight.airline_code = String::from("SQ");

    store
        .persist_creation(&CreationPlan {
            flight,
            airline_name: Some(String::from("Singapore Airlines")),
            events: vec![created_event("SQ910")],
        })
        .unwrap();

    assert_eq!(
        airline_row(&mut store, "SQ"),
        Some(Some(String::from("Singapore Airlines")))
    );
}

#[test]
fn test_failed_creation_leaves_no_airline_row() {
    let mut store = create_test_store();
    insert_flight(&mut store, test_flight("PR501", Some("feed-1")));

    // Duplicate external_ref makes the flight insert fail after the
    // airline upsert; the transaction must take the airline row with it.
    let mut duplicate = test_flight("SQ910", Some("feed-1"));
    duplicate.airline_code = String::from("SQ");

    let result = store.persist_creation(&CreationPlan {
        flight: duplicate,
        airline_name: Some(String::from("Singapore Airlines")),
        events: Vec::new(),
    });
    assert!(result.is_err());
    assert_eq!(airline_row(&mut store, "SQ"), None);
}

#[test]
fn test_ensure_airline_is_idempotent() {
    let mut store = create_test_store();

    let first = store.ensure_airline("pr", Some("Philippine Airlines")).unwrap();
    let second = store.ensure_airline("PR", None).unwrap();
    assert_eq!(first, second);
}
