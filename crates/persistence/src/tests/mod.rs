// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod flight_store_tests;
mod sync_tests;

use time::OffsetDateTime;
use time::macros::datetime;

use airfis_core::CreationPlan;
use airfis_domain::{Flight, FlightNumber, IataCode};
use airfis_events::{EventDraft, EventKind};

use crate::Persistence;

/// Identifiers for the seeded airport topology.
pub struct Topology {
    pub airport_id: i64,
    pub terminal_id: i64,
    pub gate_id: i64,
    pub belt_id: i64,
}

pub fn create_test_store() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// Seeds one airport with one terminal holding gate A2 and belt C1.
pub fn seed_topology(store: &mut Persistence) -> Topology {
    let airport_id = store
        .create_airport(
            "MNL",
            "Ninoy Aquino International",
            Some("Manila"),
            Some("Philippines"),
        )
        .unwrap();
    let terminal_id = store
        .create_terminal(airport_id, "3", Some("Terminal 3"))
        .unwrap();
    let gate_id = store.create_gate(terminal_id, "A2").unwrap();
    let belt_id = store.create_belt(terminal_id, "C1").unwrap();

    Topology {
        airport_id,
        terminal_id,
        gate_id,
        belt_id,
    }
}

pub fn test_departure() -> OffsetDateTime {
    datetime!(2025-11-20 10:00 UTC)
}

/// Builds an unpersisted flight referencing the seeded Scheduled
/// status (ID 1 from the seed migration).
pub fn test_flight(number: &str, external_ref: Option<&str>) -> Flight {
    Flight {
        flight_id: None,
        flight_number: FlightNumber::new(number).unwrap(),
        airline_code: String::from("PR"),
        origin: IataCode::new("MNL").unwrap(),
        destination: IataCode::new("SIN").unwrap(),
        aircraft_type: Some(String::from("A321")),
        scheduled_departure: test_departure(),
        scheduled_arrival: Some(datetime!(2025-11-20 14:00 UTC)),
        status_id: 1,
        gate_id: None,
        belt_id: None,
        terminal_id: None,
        external_ref: external_ref.map(String::from),
        deleted_at: None,
    }
}

pub fn created_event(flight_number: &str) -> EventDraft {
    EventDraft::new(
        EventKind::Created,
        None,
        Some(flight_number.to_string()),
        Some(String::from("Flight record created")),
    )
}

/// Persists a flight together with its `created` event.
pub fn insert_flight(store: &mut Persistence, flight: Flight) -> i64 {
    let event = created_event(flight.flight_number.value());
    store
        .persist_creation(&CreationPlan {
            flight,
            airline_name: None,
            events: vec![event],
        })
        .unwrap()
}

/// Persists a flight with an empty event list. Only flights without
/// history can be soft-deleted, so tests that exercise the clean
/// delete path use this.
pub fn insert_flight_without_history(store: &mut Persistence, flight: Flight) -> i64 {
    store
        .persist_creation(&CreationPlan {
            flight,
            airline_name: None,
            events: Vec::new(),
        })
        .unwrap()
}
