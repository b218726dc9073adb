// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight row write primitives.
//!
//! These functions perform single-statement writes only; transactional
//! composition with event appends happens in `mutations::sync`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use airfis_domain::Flight;

use crate::backend::PersistenceBackend;
use crate::data_models::{FlightChangesRow, NewFlightRow};
use crate::diesel_schema::{flight_connections, flights};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new flight row and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate
/// `external_ref`).
pub fn insert_flight(conn: &mut _, flight: &Flight) -> Result<i64, PersistenceError> {
    let row = NewFlightRow::from(flight);
    info!(
        flight_number = %flight.flight_number,
        origin = %flight.origin,
        destination = %flight.destination,
        "Inserting flight"
    );

    diesel::insert_into(flights::table).values(&row).execute(conn)?;

    let flight_id: i64 = conn.get_last_insert_rowid()?;
    debug!(flight_id, "Flight inserted");
    Ok(flight_id)
}
}

backend_fn! {
/// Applies a non-empty changeset to a flight row.
///
/// # Errors
///
/// Returns `NotFound` if no row was updated.
pub fn apply_changes(
    conn: &mut _,
    flight_id: i64,
    changes: &FlightChangesRow,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(flights::table)
        .filter(flights::flight_id.eq(flight_id))
        .set(changes)
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Flight {flight_id}")));
    }
    Ok(())
}
}

backend_fn! {
/// Marks a flight as soft-deleted.
///
/// # Errors
///
/// Returns `NotFound` if no live row was updated.
pub fn mark_deleted(
    conn: &mut _,
    flight_id: i64,
    deleted_at: &str,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(flights::table)
        .filter(flights::flight_id.eq(flight_id))
        .filter(flights::deleted_at.is_null())
        .set(flights::deleted_at.eq(deleted_at))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Flight {flight_id}")));
    }

    info!(flight_id, "Flight soft-deleted");
    Ok(())
}
}

backend_fn! {
/// Records a connection between an arriving and a departing flight.
///
/// # Errors
///
/// Returns an error if either flight does not exist or the pair is
/// already recorded.
pub fn add_connection(
    conn: &mut _,
    arrival_flight_id: i64,
    departure_flight_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(flight_connections::table)
        .values((
            flight_connections::arrival_flight_id.eq(arrival_flight_id),
            flight_connections::departure_flight_id.eq(departure_flight_id),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}
