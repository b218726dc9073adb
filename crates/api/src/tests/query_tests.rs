// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read endpoint tests: flight details, listings, timelines, and gate
//! occupancy.

use crate::error::ApiError;
use crate::handlers::{
    FlightListQuery, flight_events, gate_occupancy, get_flight, list_flights, sync_flight,
    update_gate, update_status,
};
use crate::tests::{create_test_store, home_airport, seed_topology, sync_request};

#[test]
fn test_flight_details_are_classified_relative_to_home() {
    let mut store = create_test_store();
    let home = home_airport();

    let departure = sync_flight(&mut store, &sync_request("PR999", Some("feed-1"))).unwrap();
    let mut inbound = sync_request("SQ910", Some("feed-2"));
    inbound.origin = Some(String::from("SIN"));
    inbound.destination = Some(String::from("MNL"));
    let arrival = sync_flight(&mut store, &inbound).unwrap();

    let out = get_flight(&mut store, departure.flight_id, &home).unwrap();
    assert_eq!(out.role, "departure");
    assert!(!out.has_connections);

    let inb = get_flight(&mut store, arrival.flight_id, &home).unwrap();
    assert_eq!(inb.role, "arrival");
}

#[test]
fn test_flight_details_carry_connection_counts() {
    let mut store = create_test_store();
    let home = home_airport();

    let mut inbound = sync_request("SQ910", Some("feed-1"));
    inbound.origin = Some(String::from("SIN"));
    inbound.destination = Some(String::from("MNL"));
    let feeder = sync_flight(&mut store, &inbound).unwrap();
    let onward = sync_flight(&mut store, &sync_request("PR999", Some("feed-2"))).unwrap();
    store
        .add_connection(feeder.flight_id, onward.flight_id)
        .unwrap();

    let details = get_flight(&mut store, onward.flight_id, &home).unwrap();
    assert_eq!(details.connections.outbound, 1);
    assert_eq!(details.connections.inbound, 0);
    assert!(details.has_connections);

    let feeder_details = get_flight(&mut store, feeder.flight_id, &home).unwrap();
    assert_eq!(feeder_details.connections.inbound, 1);
    assert_eq!(feeder_details.connections.outbound, 0);
}

#[test]
fn test_list_flights_filters_by_role() {
    let mut store = create_test_store();
    let home = home_airport();
    sync_flight(&mut store, &sync_request("PR999", Some("feed-1"))).unwrap();
    let mut inbound = sync_request("SQ910", Some("feed-2"));
    inbound.origin = Some(String::from("SIN"));
    inbound.destination = Some(String::from("MNL"));
    sync_flight(&mut store, &inbound).unwrap();

    let arrivals = list_flights(
        &mut store,
        &FlightListQuery {
            role: Some(String::from("arrival")),
            ..FlightListQuery::default()
        },
        &home,
    )
    .unwrap();
    assert_eq!(arrivals.count, 1);
    assert_eq!(arrivals.flights[0].flight_number, "SQ910");
    assert_eq!(arrivals.flights[0].role, "arrival");

    let everything = list_flights(&mut store, &FlightListQuery::default(), &home).unwrap();
    assert_eq!(everything.count, 2);
}

#[test]
fn test_list_flights_rejects_unknown_role() {
    let mut store = create_test_store();
    let home = home_airport();

    let result = list_flights(
        &mut store,
        &FlightListQuery {
            role: Some(String::from("sideways")),
            ..FlightListQuery::default()
        },
        &home,
    );
    assert!(matches!(result, Err(ApiError::ValidationError { .. })));
}

#[test]
fn test_event_timeline_for_unknown_flight_is_not_found() {
    let mut store = create_test_store();

    let result = flight_events(&mut store, 4242);
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_gate_occupancy_reflects_boarding_flights() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);
    let created = sync_flight(&mut store, &sync_request("PR999", None)).unwrap();
    let canonical = format!("{}-A2", topology.terminal_id);
    update_gate(&mut store, created.flight_id, Some(&canonical), &home).unwrap();

    let before = gate_occupancy(
        &mut store,
        &canonical,
        "2025-11-20T09:00:00Z",
        "2025-11-20T11:00:00Z",
    )
    .unwrap();
    assert!(!before.occupied);

    update_status(&mut store, created.flight_id, "BRD", &home).unwrap();

    let during = gate_occupancy(
        &mut store,
        &canonical,
        "2025-11-20T09:00:00Z",
        "2025-11-20T11:00:00Z",
    )
    .unwrap();
    assert!(during.occupied);
    assert_eq!(during.canonical_code, canonical);
}

#[test]
fn test_gate_occupancy_rejects_inverted_window() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);
    let canonical = format!("{}-A2", topology.terminal_id);

    let result = gate_occupancy(
        &mut store,
        &canonical,
        "2025-11-20T11:00:00Z",
        "2025-11-20T09:00:00Z",
    );
    assert!(matches!(result, Err(ApiError::ValidationError { .. })));
}

#[test]
fn test_end_to_end_departure_scenario() {
    let mut store = create_test_store();
    let home = home_airport();
    let topology = seed_topology(&mut store);

    // The feed announces PR999 out of the home airport.
    let created = sync_flight(&mut store, &sync_request("PR999", Some("ext-pr999"))).unwrap();
    assert!(created.created);

    // Operations assign a gate and start boarding.
    let canonical = format!("{}-A2", topology.terminal_id);
    update_gate(&mut store, created.flight_id, Some(&canonical), &home).unwrap();
    let details = update_status(&mut store, created.flight_id, "BRD", &home).unwrap();

    assert_eq!(details.status_code, "BRD");
    assert_eq!(details.role, "departure");
    assert_eq!(details.gate.as_deref(), Some(canonical.as_str()));

    let timeline = flight_events(&mut store, created.flight_id).unwrap();
    let kinds: Vec<&str> = timeline.events.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["created", "GATE_CHANGE", "STATUS_CHANGE"]);
}
