// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gate, belt, and status lookups by ID, plus gate assignment rule
//! checks.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use airfis_domain::{BaggageBelt, FlightStatus, Gate};

use crate::data_models::{BeltRow, GateRow, StatusRow};
use crate::diesel_schema::{
    airlines, baggage_belts, flight_statuses, gate_aircraft_restrictions, gate_airlines, gates,
};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a flight status by ID.
///
/// # Errors
///
/// Returns `NotFound` if the status does not exist.
pub fn get_status(conn: &mut _, status_id: i64) -> Result<FlightStatus, PersistenceError> {
    let row = flight_statuses::table
        .filter(flight_statuses::status_id.eq(status_id))
        .first::<StatusRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Flight status {status_id}")))?;
    Ok(row.into())
}
}

backend_fn! {
/// Retrieves a gate by ID.
///
/// # Errors
///
/// Returns `NotFound` if the gate does not exist.
pub fn get_gate(conn: &mut _, gate_id: i64) -> Result<Gate, PersistenceError> {
    gates::table
        .filter(gates::gate_id.eq(gate_id))
        .first::<GateRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Gate {gate_id}")))?
        .try_into()
}
}

backend_fn! {
/// Retrieves a baggage belt by ID.
///
/// # Errors
///
/// Returns `NotFound` if the belt does not exist.
pub fn get_belt(conn: &mut _, belt_id: i64) -> Result<BaggageBelt, PersistenceError> {
    baggage_belts::table
        .filter(baggage_belts::belt_id.eq(belt_id))
        .first::<BeltRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Baggage belt {belt_id}")))?
        .try_into()
}
}

backend_fn! {
/// Checks whether an airline may be assigned to a gate.
///
/// A gate with no authorization rows accepts every airline; once any
/// row exists, only listed airlines are allowed.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn gate_allows_airline(
    conn: &mut _,
    gate_id: i64,
    airline_code: &str,
) -> Result<bool, PersistenceError> {
    let total: i64 = gate_airlines::table
        .filter(gate_airlines::gate_id.eq(gate_id))
        .select(count_star())
        .first(conn)?;

    if total == 0 {
        return Ok(true);
    }

    let matching: i64 = gate_airlines::table
        .inner_join(airlines::table)
        .filter(gate_airlines::gate_id.eq(gate_id))
        .filter(airlines::airline_code.eq(airline_code.to_uppercase()))
        .select(count_star())
        .first(conn)?;

    Ok(matching > 0)
}
}

backend_fn! {
/// Checks whether an aircraft type may use a gate.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn gate_allows_aircraft(
    conn: &mut _,
    gate_id: i64,
    aircraft_type: &str,
) -> Result<bool, PersistenceError> {
    let prohibited: i64 = gate_aircraft_restrictions::table
        .filter(gate_aircraft_restrictions::gate_id.eq(gate_id))
        .filter(gate_aircraft_restrictions::aircraft_type.eq(aircraft_type.to_uppercase()))
        .filter(gate_aircraft_restrictions::restriction_type.eq("PROHIBITED"))
        .select(count_star())
        .first(conn)?;

    Ok(prohibited == 0)
}
}
