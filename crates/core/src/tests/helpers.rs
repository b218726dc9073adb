// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airfis_domain::{BaggageBelt, BeltStatus, Flight, FlightNumber, FlightStatus, Gate, GateStatus, IataCode};
use time::macros::datetime;

use crate::state::FlightState;

pub fn scheduled_status() -> FlightStatus {
    FlightStatus::with_id(1, "SCH", "Scheduled")
}

pub fn boarding_status() -> FlightStatus {
    FlightStatus::with_id(2, "BRD", "Boarding")
}

pub fn gate_a2() -> Gate {
    Gate::with_id(10, 1, "A2", GateStatus::Open)
}

pub fn gate_b5() -> Gate {
    Gate::with_id(11, 2, "B5", GateStatus::Open)
}

pub fn belt_c1() -> BaggageBelt {
    BaggageBelt::with_id(20, 1, "C1", BeltStatus::Active)
}

pub fn base_flight() -> Flight {
    Flight {
        flight_id: Some(42),
        flight_number: FlightNumber::new("PR999").expect("valid number"),
        airline_code: String::from("PR"),
        origin: IataCode::new("MNL").expect("valid origin"),
        destination: IataCode::new("SIN").expect("valid destination"),
        aircraft_type: Some(String::from("A321")),
        scheduled_departure: datetime!(2025-11-20 10:00:00 UTC),
        scheduled_arrival: Some(datetime!(2025-11-20 14:00:00 UTC)),
        status_id: 1,
        gate_id: None,
        belt_id: None,
        terminal_id: None,
        external_ref: Some(String::from("ext-42")),
        deleted_at: None,
    }
}

pub fn base_state() -> FlightState {
    FlightState {
        flight: base_flight(),
        status: scheduled_status(),
        gate: None,
        belt: None,
    }
}
