// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classify::{ConnectionCounts, FlightRole, classify, classify_flight};
use crate::types::{Flight, FlightNumber, IataCode};
use time::macros::datetime;

fn sample_flight(origin: &str, destination: &str) -> Flight {
    Flight {
        flight_id: Some(1),
        flight_number: FlightNumber::new("PR999").expect("valid number"),
        airline_code: String::from("PR"),
        origin: IataCode::new(origin).expect("valid origin"),
        destination: IataCode::new(destination).expect("valid destination"),
        aircraft_type: None,
        scheduled_departure: datetime!(2025-11-20 10:00:00 UTC),
        scheduled_arrival: Some(datetime!(2025-11-20 14:00:00 UTC)),
        status_id: 1,
        gate_id: None,
        belt_id: None,
        terminal_id: None,
        external_ref: None,
        deleted_at: None,
    }
}

#[test]
fn test_flight_into_home_is_arrival() {
    let home = IataCode::new("MNL").expect("valid");
    let destination = IataCode::new("MNL").expect("valid");
    assert_eq!(classify(&destination, &home), FlightRole::Arrival);
}

#[test]
fn test_flight_out_of_home_is_departure() {
    let home = IataCode::new("MNL").expect("valid");
    let flight = sample_flight("MNL", "SIN");
    assert_eq!(classify_flight(&flight, &home), FlightRole::Departure);
}

#[test]
fn test_classification_is_two_valued() {
    // Every flight in the tracked set touches the home airport, so a
    // flight that does not terminate at home is a departure by
    // definition. There is no "neither" case.
    let home = IataCode::new("MNL").expect("valid");
    let flight = sample_flight("SIN", "HND");
    assert_eq!(classify_flight(&flight, &home), FlightRole::Departure);
}

#[test]
fn test_role_string_representation() {
    assert_eq!(FlightRole::Arrival.as_str(), "arrival");
    assert_eq!(FlightRole::Departure.as_str(), "departure");
}

#[test]
fn test_connection_counts_default_has_no_connections() {
    let counts = ConnectionCounts::default();
    assert_eq!(counts.inbound, 0);
    assert_eq!(counts.outbound, 0);
    assert!(!counts.has_connections());
}

#[test]
fn test_connection_counts_either_direction_counts() {
    let inbound_only = ConnectionCounts {
        inbound: 1,
        outbound: 0,
    };
    assert!(inbound_only.has_connections());

    let outbound_only = ConnectionCounts {
        inbound: 0,
        outbound: 2,
    };
    assert!(outbound_only.has_connections());
}
