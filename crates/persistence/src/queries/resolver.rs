// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tiered canonical identifier resolution.
//!
//! External payloads reference statuses, gates, belts, and terminals in
//! three historical formats. Resolution tries, in order:
//!
//! 1. the stored canonical composite code (e.g. `1-SCH`, `2-A4`)
//! 2. a bare numeric database ID (`1`)
//! 3. a bare local code (`SCH`, `A4`)
//!
//! Composite codes are matched against the stored `canonical_code`
//! column, never reconstructed by splitting the input — local codes may
//! themselves contain the separator. An input that resolves in no tier
//! is `NotFound`, and the caller performs no write.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use airfis_domain::{Airport, BaggageBelt, FlightStatus, Gate, Terminal};

use crate::data_models::{AirportRow, BeltRow, GateRow, StatusRow, TerminalRow};
use crate::diesel_schema::{airports, baggage_belts, flight_statuses, gates, terminals};
use crate::error::PersistenceError;

backend_fn! {
/// Resolves a flight status reference.
///
/// # Errors
///
/// Returns `NotFound` if no tier matches.
pub fn resolve_status(conn: &mut _, reference: &str) -> Result<FlightStatus, PersistenceError> {
    let trimmed = reference.trim();
    debug!(reference = trimmed, "Resolving flight status");

    if let Some(row) = flight_statuses::table
        .filter(flight_statuses::canonical_code.eq(trimmed))
        .first::<StatusRow>(conn)
        .optional()?
    {
        return Ok(row.into());
    }

    if let Ok(id) = trimmed.parse::<i64>()
        && let Some(row) = flight_statuses::table
            .filter(flight_statuses::status_id.eq(id))
            .first::<StatusRow>(conn)
            .optional()?
    {
        return Ok(row.into());
    }

    if let Some(row) = flight_statuses::table
        .filter(flight_statuses::status_code.eq(trimmed.to_uppercase()))
        .first::<StatusRow>(conn)
        .optional()?
    {
        return Ok(row.into());
    }

    Err(PersistenceError::NotFound(format!(
        "No flight status matches reference '{trimmed}'"
    )))
}
}

backend_fn! {
/// Resolves a gate reference.
///
/// Bare local codes are not unique across terminals; the lowest gate ID
/// wins, matching the behavior callers relied on historically.
///
/// # Errors
///
/// Returns `NotFound` if no tier matches.
pub fn resolve_gate(conn: &mut _, reference: &str) -> Result<Gate, PersistenceError> {
    let trimmed = reference.trim();
    debug!(reference = trimmed, "Resolving gate");

    if let Some(row) = gates::table
        .filter(gates::canonical_code.eq(trimmed))
        .first::<GateRow>(conn)
        .optional()?
    {
        return row.try_into();
    }

    if let Ok(id) = trimmed.parse::<i64>()
        && let Some(row) = gates::table
            .filter(gates::gate_id.eq(id))
            .first::<GateRow>(conn)
            .optional()?
    {
        return row.try_into();
    }

    if let Some(row) = gates::table
        .filter(gates::gate_code.eq(trimmed.to_uppercase()))
        .order(gates::gate_id.asc())
        .first::<GateRow>(conn)
        .optional()?
    {
        return row.try_into();
    }

    Err(PersistenceError::NotFound(format!(
        "No gate matches reference '{trimmed}'"
    )))
}
}

backend_fn! {
/// Resolves a baggage belt reference.
///
/// # Errors
///
/// Returns `NotFound` if no tier matches.
pub fn resolve_belt(conn: &mut _, reference: &str) -> Result<BaggageBelt, PersistenceError> {
    let trimmed = reference.trim();
    debug!(reference = trimmed, "Resolving baggage belt");

    if let Some(row) = baggage_belts::table
        .filter(baggage_belts::canonical_code.eq(trimmed))
        .first::<BeltRow>(conn)
        .optional()?
    {
        return row.try_into();
    }

    if let Ok(id) = trimmed.parse::<i64>()
        && let Some(row) = baggage_belts::table
            .filter(baggage_belts::belt_id.eq(id))
            .first::<BeltRow>(conn)
            .optional()?
    {
        return row.try_into();
    }

    if let Some(row) = baggage_belts::table
        .filter(baggage_belts::belt_code.eq(trimmed.to_uppercase()))
        .order(baggage_belts::belt_id.asc())
        .first::<BeltRow>(conn)
        .optional()?
    {
        return row.try_into();
    }

    Err(PersistenceError::NotFound(format!(
        "No baggage belt matches reference '{trimmed}'"
    )))
}
}

backend_fn! {
/// Resolves a terminal reference.
///
/// # Errors
///
/// Returns `NotFound` if no tier matches.
pub fn resolve_terminal(conn: &mut _, reference: &str) -> Result<Terminal, PersistenceError> {
    let trimmed = reference.trim();
    debug!(reference = trimmed, "Resolving terminal");

    if let Some(row) = terminals::table
        .filter(terminals::canonical_code.eq(trimmed))
        .first::<TerminalRow>(conn)
        .optional()?
    {
        return Ok(row.into());
    }

    if let Ok(id) = trimmed.parse::<i64>()
        && let Some(row) = terminals::table
            .filter(terminals::terminal_id.eq(id))
            .first::<TerminalRow>(conn)
            .optional()?
    {
        return Ok(row.into());
    }

    if let Some(row) = terminals::table
        .filter(terminals::terminal_code.eq(trimmed.to_uppercase()))
        .order(terminals::terminal_id.asc())
        .first::<TerminalRow>(conn)
        .optional()?
    {
        return Ok(row.into());
    }

    Err(PersistenceError::NotFound(format!(
        "No terminal matches reference '{trimmed}'"
    )))
}
}

backend_fn! {
/// Resolves an airport by IATA code.
///
/// # Errors
///
/// Returns `NotFound` if no airport carries the code.
pub fn resolve_airport(conn: &mut _, iata_code: &str) -> Result<Airport, PersistenceError> {
    let normalized = iata_code.trim().to_uppercase();

    airports::table
        .filter(airports::iata_code.eq(&normalized))
        .first::<AirportRow>(conn)
        .optional()?
        .map_or_else(
            || {
                Err(PersistenceError::NotFound(format!(
                    "No airport matches IATA code '{normalized}'"
                )))
            },
            TryInto::try_into,
        )
}
}
