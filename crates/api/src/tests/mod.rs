// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod action_tests;
mod query_tests;

use airfis_domain::IataCode;
use airfis_persistence::Persistence;

use crate::request_response::FlightSyncRequest;

/// Identifiers for the seeded airport topology.
pub struct Topology {
    pub terminal_id: i64,
    pub gate_id: i64,
    pub belt_id: i64,
}

pub fn create_test_store() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn home_airport() -> IataCode {
    IataCode::new("MNL").unwrap()
}

/// Seeds one airport with one terminal holding gate A2 and belt C1.
pub fn seed_topology(store: &mut Persistence) -> Topology {
    let airport_id = store
        .create_airport("MNL", "Ninoy Aquino International", None, None)
        .unwrap();
    let terminal_id = store.create_terminal(airport_id, "3", None).unwrap();
    let gate_id = store.create_gate(terminal_id, "A2").unwrap();
    let belt_id = store.create_belt(terminal_id, "C1").unwrap();

    Topology {
        terminal_id,
        gate_id,
        belt_id,
    }
}

/// A complete, valid sync payload for a departure out of the home
/// airport.
pub fn sync_request(number: &str, external_ref: Option<&str>) -> FlightSyncRequest {
    FlightSyncRequest {
        external_ref: external_ref.map(String::from),
        flight_number: Some(number.to_string()),
        airline_code: Some(String::from("PR")),
        airline_name: Some(String::from("Philippine Airlines")),
        origin: Some(String::from("MNL")),
        destination: Some(String::from("SIN")),
        aircraft_type: Some(String::from("A321")),
        scheduled_departure: Some(String::from("2025-11-20T10:00:00Z")),
        scheduled_arrival: Some(String::from("2025-11-20T14:00:00Z")),
        status: None,
        gate: None,
        baggage_belt: None,
    }
}
