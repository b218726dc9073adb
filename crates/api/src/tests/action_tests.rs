// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! UI action endpoint tests: status, gate, and belt updates plus
//! deletion.

use crate::error::ApiError;
use crate::handlers::{
    delete_flight, flight_events, sync_flight, update_baggage_belt, update_belt_status,
    update_gate, update_gate_status, update_status,
};
use crate::tests::{create_test_store, home_airport, seed_topology, sync_request};

#[test]
fn test_repeated_identical_status_updates_both_log() {
    let mut store = create_test_store();
    let home = home_airport();
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    update_status(&mut store, created.flight_id, "BRD", &home).unwrap();
    update_status(&mut store, created.flight_id, "BRD", &home).unwrap();

    // An operator asked twice; the audit trail shows both requests.
    let timeline = flight_events(&mut store, created.flight_id).unwrap();
    let status_events: Vec<_> = timeline
        .events
        .iter()
        .filter(|e| e.kind == "STATUS_CHANGE")
        .collect();
    assert_eq!(status_events.len(), 2);
    assert_eq!(status_events[1].old_value.as_deref(), Some("Boarding"));
    assert_eq!(status_events[1].new_value.as_deref(), Some("Boarding"));
}

#[test]
fn test_gate_assignment_derives_terminal() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    let canonical = format!("{}-A2", topology.terminal_id);
    let details = update_gate(&mut store, created.flight_id, Some(&canonical), &home).unwrap();
    assert_eq!(details.gate.as_deref(), Some(canonical.as_str()));
    assert_eq!(details.terminal_id, Some(topology.terminal_id));
}

#[test]
fn test_clearing_gate_logs_unassigned() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    let canonical = format!("{}-A2", topology.terminal_id);
    update_gate(&mut store, created.flight_id, Some(&canonical), &home).unwrap();
    let details = update_gate(&mut store, created.flight_id, None, &home).unwrap();
    assert!(details.gate.is_none());
    assert!(details.terminal_id.is_none());

    let timeline = flight_events(&mut store, created.flight_id).unwrap();
    let last = timeline.events.last().unwrap();
    assert_eq!(last.kind, "GATE_CHANGE");
    assert_eq!(last.new_value.as_deref(), Some("Unassigned"));
}

#[test]
fn test_gate_rejects_unauthorized_airline() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    // Reserve the gate for another airline.
    let airline_id = store.ensure_airline("SQ", None).unwrap();
    store
        .authorize_airline_for_gate(topology.gate_id, airline_id)
        .unwrap();

    let canonical = format!("{}-A2", topology.terminal_id);
    let result = update_gate(&mut store, created.flight_id, Some(&canonical), &home);
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_gate_rejects_prohibited_aircraft() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    store
        .restrict_gate_aircraft(topology.gate_id, "A321")
        .unwrap();

    let canonical = format!("{}-A2", topology.terminal_id);
    let result = update_gate(&mut store, created.flight_id, Some(&canonical), &home);
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_belt_assignment_and_clear() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    let canonical = format!("{}-C1", topology.terminal_id);
    let assigned = update_baggage_belt(&mut store, created.flight_id, Some(&canonical), &home).unwrap();
    assert_eq!(assigned.baggage_belt.as_deref(), Some(canonical.as_str()));

    let cleared = update_baggage_belt(&mut store, created.flight_id, None, &home).unwrap();
    assert!(cleared.baggage_belt.is_none());

    let timeline = flight_events(&mut store, created.flight_id).unwrap();
    let last = timeline.events.last().unwrap();
    assert_eq!(last.kind, "CLAIM_CHANGE");
    assert_eq!(last.new_value.as_deref(), Some("Unassigned"));
}

#[test]
fn test_gate_status_update_notifies_assigned_flights() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();
    let canonical = format!("{}-A2", topology.terminal_id);
    update_gate(&mut store, created.flight_id, Some(&canonical), &home).unwrap();

    let response = update_gate_status(&mut store, &canonical, "Closed").unwrap();
    assert_eq!(response.canonical_code, canonical);
    assert_eq!(response.status, "Closed");
    assert_eq!(response.flights_notified, 1);

    let timeline = flight_events(&mut store, created.flight_id).unwrap();
    let last = timeline.events.last().unwrap();
    assert_eq!(last.kind, "GATE_CHANGE");
    assert_eq!(last.old_value.as_deref(), Some("Open"));
    assert_eq!(last.new_value.as_deref(), Some("Closed"));
}

#[test]
fn test_gate_status_rejects_unknown_status_string() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);
    let canonical = format!("{}-A2", topology.terminal_id);

    let result = update_gate_status(&mut store, &canonical, "Ajar");
    assert!(matches!(result, Err(ApiError::ValidationError { .. })));
}

#[test]
fn test_belt_status_update() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);
    let canonical = format!("{}-C1", topology.terminal_id);

    let response = update_belt_status(&mut store, &canonical, "Maintenance").unwrap();
    assert_eq!(response.status, "Maintenance");
    assert_eq!(response.flights_notified, 0);
}

#[test]
fn test_delete_with_history_conflicts() {
    let mut store = create_test_store();
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();

    let result = delete_flight(&mut store, created.flight_id);
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_delete_unknown_flight_is_not_found() {
    let mut store = create_test_store();

    let result = delete_flight(&mut store, 4242);
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}
