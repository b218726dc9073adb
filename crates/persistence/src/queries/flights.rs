// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight record lookups and filtered listings.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use airfis_core::FlightState;
use airfis_domain::{Flight, FlightRole, IataCode};

use crate::data_models::FlightRow;
use crate::diesel_schema::flights;
use crate::error::PersistenceError;
use crate::queries::resources;

/// Filters for the flight listing query.
///
/// `role` classification filters on the destination column: an arrival
/// terminates at the home airport, anything else is a departure. `date`
/// matches the scheduled departure's calendar day; the RFC 3339 text
/// columns are UTC-normalized, so a plain text range is correct.
#[derive(Debug, Clone)]
pub struct FlightFilter {
    /// Restrict to arrivals or departures relative to `home`.
    pub role: Option<FlightRole>,
    /// The configured home airport, required when `role` is set.
    pub home: Option<IataCode>,
    /// Calendar day (`YYYY-MM-DD`) of the scheduled departure.
    pub date: Option<String>,
    /// Substring match on flight number, airline, origin, or destination.
    pub search: Option<String>,
    /// Include soft-deleted flights.
    pub include_deleted: bool,
    /// Page size.
    pub limit: i64,
    /// Page offset.
    pub offset: i64,
}

impl Default for FlightFilter {
    fn default() -> Self {
        Self {
            role: None,
            home: None,
            date: None,
            search: None,
            include_deleted: false,
            limit: 100,
            offset: 0,
        }
    }
}

backend_fn! {
/// Retrieves a flight by ID, including soft-deleted records.
///
/// # Errors
///
/// Returns `NotFound` if no row exists for the ID.
pub fn get_flight(conn: &mut _, flight_id: i64) -> Result<Flight, PersistenceError> {
    flights::table
        .filter(flights::flight_id.eq(flight_id))
        .first::<FlightRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Flight {flight_id}")))?
        .try_into()
}
}

// Composite lookups call other generated functions, so both backend
// variants are written by hand rather than through `backend_fn!`.

/// Loads a flight together with its resolved status, gate, and belt.
///
/// # Errors
///
/// Returns `NotFound` if the flight does not exist or is soft-deleted.
pub fn load_flight_state_sqlite(
    conn: &mut SqliteConnection,
    flight_id: i64,
) -> Result<FlightState, PersistenceError> {
    let flight = get_flight_sqlite(conn, flight_id)?;
    if flight.is_deleted() {
        return Err(PersistenceError::NotFound(format!("Flight {flight_id}")));
    }

    let status = resources::get_status_sqlite(conn, flight.status_id)?;
    let gate = flight
        .gate_id
        .map(|id| resources::get_gate_sqlite(conn, id))
        .transpose()?;
    let belt = flight
        .belt_id
        .map(|id| resources::get_belt_sqlite(conn, id))
        .transpose()?;

    Ok(FlightState {
        flight,
        status,
        gate,
        belt,
    })
}

/// Loads a flight together with its resolved status, gate, and belt.
///
/// # Errors
///
/// Returns `NotFound` if the flight does not exist or is soft-deleted.
pub fn load_flight_state_mysql(
    conn: &mut MysqlConnection,
    flight_id: i64,
) -> Result<FlightState, PersistenceError> {
    let flight = get_flight_mysql(conn, flight_id)?;
    if flight.is_deleted() {
        return Err(PersistenceError::NotFound(format!("Flight {flight_id}")));
    }

    let status = resources::get_status_mysql(conn, flight.status_id)?;
    let gate = flight
        .gate_id
        .map(|id| resources::get_gate_mysql(conn, id))
        .transpose()?;
    let belt = flight
        .belt_id
        .map(|id| resources::get_belt_mysql(conn, id))
        .transpose()?;

    Ok(FlightState {
        flight,
        status,
        gate,
        belt,
    })
}

backend_fn! {
/// Finds a live flight by its external reference (webhook idempotency
/// key).
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_by_external_ref(
    conn: &mut _,
    external_ref: &str,
) -> Result<Option<Flight>, PersistenceError> {
    flights::table
        .filter(flights::external_ref.eq(external_ref))
        .filter(flights::deleted_at.is_null())
        .first::<FlightRow>(conn)
        .optional()?
        .map(TryInto::try_into)
        .transpose()
}
}

backend_fn! {
/// Finds a live flight by number and exact scheduled departure.
///
/// This is the sync upsert fallback key when the feed supplies no
/// external reference.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_by_number_and_departure(
    conn: &mut _,
    flight_number: &str,
    scheduled_departure: &str,
) -> Result<Option<Flight>, PersistenceError> {
    flights::table
        .filter(flights::flight_number.eq(flight_number.to_uppercase()))
        .filter(flights::scheduled_departure.eq(scheduled_departure))
        .filter(flights::deleted_at.is_null())
        .order(flights::flight_id.asc())
        .first::<FlightRow>(conn)
        .optional()?
        .map(TryInto::try_into)
        .transpose()
}
}

backend_fn! {
/// Resolves a live flight by bare flight number, rejecting ambiguity.
///
/// Flight numbers recur across schedule dates, so a bare number is a
/// safe lookup key only when exactly one live flight carries it.
/// Anything else must not guess which physical flight the caller
/// meant.
///
/// # Errors
///
/// Returns `NotFound` for zero matches and `AmbiguousFlightNumber` for
/// more than one.
pub fn resolve_unique_by_number(
    conn: &mut _,
    flight_number: &str,
) -> Result<Flight, PersistenceError> {
    let normalized = flight_number.trim().to_uppercase();
    let rows: Vec<FlightRow> = flights::table
        .filter(flights::flight_number.eq(&normalized))
        .filter(flights::deleted_at.is_null())
        .order(flights::scheduled_departure.asc())
        .load(conn)?;

    debug!(
        flight_number = %normalized,
        matches = rows.len(),
        "Resolved flight number"
    );

    match rows.len() {
        0 => Err(PersistenceError::NotFound(format!(
            "No flight matches number '{normalized}'"
        ))),
        1 => rows
            .into_iter()
            .next()
            .ok_or_else(|| PersistenceError::Other("Vec emptied between len and next".to_string()))?
            .try_into(),
        matches => Err(PersistenceError::AmbiguousFlightNumber {
            flight_number: normalized,
            matches,
        }),
    }
}
}

backend_fn! {
/// Lists flights matching a filter, ordered by scheduled departure.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_flights(
    conn: &mut _,
    filter: &FlightFilter,
) -> Result<Vec<Flight>, PersistenceError> {
    let mut query = flights::table.into_boxed();

    if !filter.include_deleted {
        query = query.filter(flights::deleted_at.is_null());
    }

    if let (Some(role), Some(home)) = (filter.role, &filter.home) {
        query = match role {
            FlightRole::Arrival => {
                query.filter(flights::destination_code.eq(home.value().to_string()))
            }
            FlightRole::Departure => {
                query.filter(flights::destination_code.ne(home.value().to_string()))
            }
        };
    }

    if let Some(date) = &filter.date {
        query = query
            .filter(flights::scheduled_departure.ge(format!("{date}T00:00:00Z")))
            .filter(flights::scheduled_departure.le(format!("{date}T23:59:59Z")));
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.trim().to_uppercase());
        query = query.filter(
            flights::flight_number
                .like(pattern.clone())
                .or(flights::airline_code.like(pattern.clone()))
                .or(flights::origin_code.like(pattern.clone()))
                .or(flights::destination_code.like(pattern)),
        );
    }

    let rows: Vec<FlightRow> = query
        .order(flights::scheduled_departure.asc())
        .limit(filter.limit)
        .offset(filter.offset)
        .load(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}
}

backend_fn! {
/// Lists the live flights currently assigned to a gate.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn flights_assigned_to_gate(
    conn: &mut _,
    gate_id: i64,
) -> Result<Vec<Flight>, PersistenceError> {
    let rows: Vec<FlightRow> = flights::table
        .filter(flights::gate_id.eq(gate_id))
        .filter(flights::deleted_at.is_null())
        .order(flights::flight_id.asc())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}
}

backend_fn! {
/// Lists the live flights currently assigned to a baggage belt.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn flights_assigned_to_belt(
    conn: &mut _,
    belt_id: i64,
) -> Result<Vec<Flight>, PersistenceError> {
    let rows: Vec<FlightRow> = flights::table
        .filter(flights::belt_id.eq(belt_id))
        .filter(flights::deleted_at.is_null())
        .order(flights::flight_id.asc())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}
}
