// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight record store tests: lookups, listing filters, and soft
//! delete semantics.

use time::macros::datetime;

use airfis_domain::{FlightRole, IataCode};

use crate::tests::{
    create_test_store, insert_flight, insert_flight_without_history, seed_topology, test_flight,
};
use crate::{FlightFilter, PersistenceError};

fn arrival_flight(number: &str, external_ref: Option<&str>) -> airfis_domain::Flight {
    let mut flight = test_flight(number, external_ref);
    flight.origin = IataCode::new("SIN").unwrap();
    flight.destination = IataCode::new("MNL").unwrap();
    flight
}

#[test]
fn test_insert_and_get_flight_round_trip() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", Some("feed-501")));

    let stored = store.get_flight(flight_id).unwrap();
    assert_eq!(stored.flight_id, Some(flight_id));
    assert_eq!(stored.flight_number.value(), "PR501");
    assert_eq!(stored.origin.value(), "MNL");
    assert_eq!(stored.destination.value(), "SIN");
    assert_eq!(stored.scheduled_departure, datetime!(2025-11-20 10:00 UTC));
    assert_eq!(stored.external_ref.as_deref(), Some("feed-501"));
    assert!(!stored.is_deleted());
}

#[test]
fn test_get_flight_unknown_id_is_not_found() {
    let mut store = create_test_store();

    let result = store.get_flight(9999);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_duplicate_external_ref_is_rejected() {
    let mut store = create_test_store();
    insert_flight(&mut store, test_flight("PR501", Some("feed-501")));

    let mut duplicate = test_flight("PR502", Some("feed-501"));
    duplicate.scheduled_departure = datetime!(2025-11-21 10:00 UTC);
    duplicate.scheduled_arrival = None;
    let result = store.persist_creation(&airfis_core::CreationPlan {
        flight: duplicate,
        airline_name: None,
        events: Vec::new(),
    });
    assert!(result.is_err());
}

#[test]
fn test_find_by_external_ref() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", Some("feed-501")));

    let found = store.find_by_external_ref("feed-501").unwrap();
    assert_eq!(found.and_then(|f| f.flight_id), Some(flight_id));

    let missing = store.find_by_external_ref("feed-999").unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_find_by_number_and_departure() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let found = store
        .find_by_number_and_departure("PR501", "2025-11-20T10:00:00Z")
        .unwrap();
    assert_eq!(found.and_then(|f| f.flight_id), Some(flight_id));

    let wrong_day = store
        .find_by_number_and_departure("PR501", "2025-11-21T10:00:00Z")
        .unwrap();
    assert!(wrong_day.is_none());
}

#[test]
fn test_resolve_unique_by_number_single_match() {
    let mut store = create_test_store();
    let flight_id = insert_flight(&mut store, test_flight("PR501", None));

    let flight = store.resolve_unique_by_number(" pr501 ").unwrap();
    assert_eq!(flight.flight_id, Some(flight_id));
}

#[test]
fn test_resolve_unique_by_number_zero_matches() {
    let mut store = create_test_store();

    let result = store.resolve_unique_by_number("PR501");
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_resolve_unique_by_number_rejects_ambiguity() {
    let mut store = create_test_store();
    insert_flight(&mut store, test_flight("PR501", Some("feed-1")));
    let mut tomorrow = test_flight("PR501", Some("feed-2"));
    tomorrow.scheduled_departure = datetime!(2025-11-21 10:00 UTC);
    tomorrow.scheduled_arrival = Some(datetime!(2025-11-21 14:00 UTC));
    insert_flight(&mut store, tomorrow);

    let result = store.resolve_unique_by_number("PR501");
    assert!(matches!(
        result,
        Err(PersistenceError::AmbiguousFlightNumber { matches: 2, .. })
    ));
}

#[test]
fn test_list_flights_classifies_by_home_airport() {
    let mut store = create_test_store();
    insert_flight(&mut store, test_flight("PR501", None));
    insert_flight(&mut store, arrival_flight("SQ910", None));

    let home = IataCode::new("MNL").unwrap();

    let arrivals = store
        .list_flights(&FlightFilter {
            role: Some(FlightRole::Arrival),
            home: Some(home.clone()),
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(arrivals.len(), 1);
    assert_eq!(arrivals[0].flight_number.value(), "SQ910");

    let departures = store
        .list_flights(&FlightFilter {
            role: Some(FlightRole::Departure),
            home: Some(home),
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].flight_number.value(), "PR501");
}

#[test]
fn test_list_flights_filters_by_departure_date() {
    let mut store = create_test_store();
    insert_flight(&mut store, test_flight("PR501", None));
    let mut other_day = test_flight("PR777", None);
    other_day.scheduled_departure = datetime!(2025-12-01 08:00 UTC);
    other_day.scheduled_arrival = None;
    insert_flight(&mut store, other_day);

    let listed = store
        .list_flights(&FlightFilter {
            date: Some(String::from("2025-11-20")),
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].flight_number.value(), "PR501");
}

#[test]
fn test_list_flights_search_matches_number_and_route() {
    let mut store = create_test_store();
    insert_flight(&mut store, test_flight("PR501", None));
    insert_flight(&mut store, arrival_flight("SQ910", None));

    let by_number = store
        .list_flights(&FlightFilter {
            search: Some(String::from("sq9")),
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(by_number.len(), 1);

    let by_route = store
        .list_flights(&FlightFilter {
            search: Some(String::from("SIN")),
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(by_route.len(), 2);
}

#[test]
fn test_list_flights_orders_by_departure_and_paginates() {
    let mut store = create_test_store();
    let mut late = test_flight("PR900", None);
    late.scheduled_departure = datetime!(2025-11-20 18:00 UTC);
    late.scheduled_arrival = None;
    insert_flight(&mut store, late);
    insert_flight(&mut store, test_flight("PR501", None));

    let first_page = store
        .list_flights(&FlightFilter {
            limit: 1,
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(first_page.len(), 1);
    assert_eq!(first_page[0].flight_number.value(), "PR501");

    let second_page = store
        .list_flights(&FlightFilter {
            limit: 1,
            offset: 1,
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].flight_number.value(), "PR900");
}

#[test]
fn test_deleted_flights_are_hidden_unless_requested() {
    let mut store = create_test_store();
    let flight_id = insert_flight_without_history(&mut store, test_flight("PR501", Some("feed-1")));
    store.soft_delete_flight(flight_id).unwrap();

    let live = store.list_flights(&FlightFilter::default()).unwrap();
    assert!(live.is_empty());

    let all = store
        .list_flights(&FlightFilter {
            include_deleted: true,
            ..FlightFilter::default()
        })
        .unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_deleted());

    // The idempotency key also stops matching once the record is gone.
    let by_ref = store.find_by_external_ref("feed-1").unwrap();
    assert!(by_ref.is_none());
}

#[test]
fn test_load_flight_state_resolves_assignments() {
    let mut store = create_test_store();
    let topology = seed_topology(&mut store);
    let mut flight = test_flight("PR501", None);
    flight.gate_id = Some(topology.gate_id);
    flight.belt_id = Some(topology.belt_id);
    flight.terminal_id = Some(topology.terminal_id);
    let flight_id = insert_flight(&mut store, flight);

    let state = store.load_flight_state(flight_id).unwrap();
    assert_eq!(state.status.status_code(), "SCH");
    assert_eq!(state.gate.map(|g| g.canonical_code()), Some(format!("{}-A2", topology.terminal_id)));
    assert_eq!(state.belt.map(|b| b.canonical_code()), Some(format!("{}-C1", topology.terminal_id)));
}

#[test]
fn test_load_flight_state_refuses_deleted_flight() {
    let mut store = create_test_store();
    let flight_id = insert_flight_without_history(&mut store, test_flight("PR501", None));
    store.soft_delete_flight(flight_id).unwrap();

    let result = store.load_flight_state(flight_id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    // The raw record remains readable for audits.
    assert!(store.get_flight(flight_id).unwrap().is_deleted());
}
