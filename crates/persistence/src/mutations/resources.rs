// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Airport, terminal, gate, belt, and airline maintenance.
//!
//! Canonical composite codes are regenerated here on every write that
//! touches a parent reference or local code; nothing else in the
//! system ever recomputes them.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use airfis_domain::composite_code;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{
    airlines, airports, baggage_belts, gate_aircraft_restrictions, gate_airlines, gates, terminals,
};
use crate::error::PersistenceError;

backend_fn! {
/// Creates an airport.
///
/// # Errors
///
/// Returns an error if the IATA code already exists.
pub fn create_airport(
    conn: &mut _,
    iata_code: &str,
    name: &str,
    city: Option<&str>,
    country: Option<&str>,
) -> Result<i64, PersistenceError> {
    let normalized = iata_code.trim().to_uppercase();
    info!(iata_code = %normalized, "Creating airport");

    diesel::insert_into(airports::table)
        .values((
            airports::iata_code.eq(&normalized),
            airports::name.eq(name),
            airports::city.eq(city),
            airports::country.eq(country),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Creates a terminal under an airport.
///
/// The canonical code is `{iata_code}-{terminal_code}`.
///
/// # Errors
///
/// Returns `NotFound` if the airport does not exist.
pub fn create_terminal(
    conn: &mut _,
    airport_id: i64,
    terminal_code: &str,
    name: Option<&str>,
) -> Result<i64, PersistenceError> {
    let code = terminal_code.trim().to_uppercase();
    let iata: String = airports::table
        .filter(airports::airport_id.eq(airport_id))
        .select(airports::iata_code)
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Airport {airport_id}")))?;

    let canonical = composite_code(&iata, &code);
    info!(airport_id, canonical_code = %canonical, "Creating terminal");

    diesel::insert_into(terminals::table)
        .values((
            terminals::airport_id.eq(airport_id),
            terminals::terminal_code.eq(&code),
            terminals::canonical_code.eq(&canonical),
            terminals::name.eq(name),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Deletes a terminal that owns no gates or belts.
///
/// # Errors
///
/// Returns `TerminalOccupied` while dependent resources exist and
/// `NotFound` if the terminal does not exist.
pub fn delete_terminal(conn: &mut _, terminal_id: i64) -> Result<(), PersistenceError> {
    let gate_count: i64 = gates::table
        .filter(gates::terminal_id.eq(terminal_id))
        .select(count_star())
        .first(conn)?;
    let belt_count: i64 = baggage_belts::table
        .filter(baggage_belts::terminal_id.eq(terminal_id))
        .select(count_star())
        .first(conn)?;

    if gate_count > 0 || belt_count > 0 {
        return Err(PersistenceError::TerminalOccupied { terminal_id });
    }

    let rows_affected: usize = diesel::delete(terminals::table)
        .filter(terminals::terminal_id.eq(terminal_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Terminal {terminal_id}")));
    }

    info!(terminal_id, "Terminal deleted");
    Ok(())
}
}

backend_fn! {
/// Creates a gate under a terminal with `Open` status.
///
/// # Errors
///
/// Returns an error if the gate code already exists in the terminal.
pub fn create_gate(
    conn: &mut _,
    terminal_id: i64,
    gate_code: &str,
) -> Result<i64, PersistenceError> {
    let code = gate_code.trim().to_uppercase();
    let canonical = composite_code(terminal_id, &code);
    info!(terminal_id, canonical_code = %canonical, "Creating gate");

    diesel::insert_into(gates::table)
        .values((
            gates::terminal_id.eq(terminal_id),
            gates::gate_code.eq(&code),
            gates::canonical_code.eq(&canonical),
            gates::gate_status.eq("Open"),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Renames a gate, regenerating its canonical code.
///
/// # Errors
///
/// Returns `NotFound` if the gate does not exist.
pub fn rename_gate(
    conn: &mut _,
    gate_id: i64,
    new_gate_code: &str,
) -> Result<String, PersistenceError> {
    let code = new_gate_code.trim().to_uppercase();
    let terminal_id: i64 = gates::table
        .filter(gates::gate_id.eq(gate_id))
        .select(gates::terminal_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Gate {gate_id}")))?;

    let canonical = composite_code(terminal_id, &code);

    diesel::update(gates::table)
        .filter(gates::gate_id.eq(gate_id))
        .set((
            gates::gate_code.eq(&code),
            gates::canonical_code.eq(&canonical),
        ))
        .execute(conn)?;

    info!(gate_id, canonical_code = %canonical, "Gate renamed");
    Ok(canonical)
}
}

backend_fn! {
/// Creates a baggage belt under a terminal with `Active` status.
///
/// # Errors
///
/// Returns an error if the belt code already exists in the terminal.
pub fn create_belt(
    conn: &mut _,
    terminal_id: i64,
    belt_code: &str,
) -> Result<i64, PersistenceError> {
    let code = belt_code.trim().to_uppercase();
    let canonical = composite_code(terminal_id, &code);
    info!(terminal_id, canonical_code = %canonical, "Creating baggage belt");

    diesel::insert_into(baggage_belts::table)
        .values((
            baggage_belts::terminal_id.eq(terminal_id),
            baggage_belts::belt_code.eq(&code),
            baggage_belts::canonical_code.eq(&canonical),
            baggage_belts::belt_status.eq("Active"),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Renames a baggage belt, regenerating its canonical code.
///
/// # Errors
///
/// Returns `NotFound` if the belt does not exist.
pub fn rename_belt(
    conn: &mut _,
    belt_id: i64,
    new_belt_code: &str,
) -> Result<String, PersistenceError> {
    let code = new_belt_code.trim().to_uppercase();
    let terminal_id: i64 = baggage_belts::table
        .filter(baggage_belts::belt_id.eq(belt_id))
        .select(baggage_belts::terminal_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Baggage belt {belt_id}")))?;

    let canonical = composite_code(terminal_id, &code);

    diesel::update(baggage_belts::table)
        .filter(baggage_belts::belt_id.eq(belt_id))
        .set((
            baggage_belts::belt_code.eq(&code),
            baggage_belts::canonical_code.eq(&canonical),
        ))
        .execute(conn)?;

    info!(belt_id, canonical_code = %canonical, "Baggage belt renamed");
    Ok(canonical)
}
}

backend_fn! {
/// Looks up an airline by code, creating it on first sight.
///
/// The sync feed references airlines it never declares, so rows are
/// created lazily.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or written.
pub fn ensure_airline(
    conn: &mut _,
    airline_code: &str,
    airline_name: Option<&str>,
) -> Result<i64, PersistenceError> {
    let normalized = airline_code.trim().to_uppercase();

    if let Some(id) = airlines::table
        .filter(airlines::airline_code.eq(&normalized))
        .select(airlines::airline_id)
        .first::<i64>(conn)
        .optional()?
    {
        return Ok(id);
    }

    diesel::insert_into(airlines::table)
        .values((
            airlines::airline_code.eq(&normalized),
            airlines::airline_name.eq(airline_name),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Authorizes an airline to use a gate.
///
/// # Errors
///
/// Returns an error if either side does not exist or the pair is
/// already authorized.
pub fn authorize_airline_for_gate(
    conn: &mut _,
    gate_id: i64,
    airline_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(gate_airlines::table)
        .values((
            gate_airlines::gate_id.eq(gate_id),
            gate_airlines::airline_id.eq(airline_id),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Prohibits an aircraft type from a gate.
///
/// # Errors
///
/// Returns an error if the gate does not exist or the restriction is
/// already recorded.
pub fn restrict_gate_aircraft(
    conn: &mut _,
    gate_id: i64,
    aircraft_type: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(gate_aircraft_restrictions::table)
        .values((
            gate_aircraft_restrictions::gate_id.eq(gate_id),
            gate_aircraft_restrictions::aircraft_type.eq(aircraft_type.trim().to_uppercase()),
            gate_aircraft_restrictions::restriction_type.eq("PROHIBITED"),
        ))
        .execute(conn)?;
    Ok(())
}
}
