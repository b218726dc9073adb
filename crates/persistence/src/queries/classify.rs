// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side schedule queries: connection counts, derived gate
//! occupancy, and dependent-record checks.

use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::BTreeMap;

use airfis_domain::ConnectionCounts;

use crate::diesel_schema::{flight_connections, flight_events, flight_statuses, flights};
use crate::error::PersistenceError;

/// Status code that makes a gate count as occupied.
const BOARDING_STATUS_CODE: &str = "BRD";

backend_fn! {
/// Returns per-flight connection counts for a set of flights.
///
/// Inbound counts the rows where the flight is the arrival leg;
/// outbound counts the rows where it is the departure leg. Flights with
/// no connection rows get the zero default.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn connection_counts(
    conn: &mut _,
    flight_ids: &[i64],
) -> Result<BTreeMap<i64, ConnectionCounts>, PersistenceError> {
    let mut counts: BTreeMap<i64, ConnectionCounts> = flight_ids
        .iter()
        .map(|id| (*id, ConnectionCounts::default()))
        .collect();

    let inbound: Vec<(i64, i64)> = flight_connections::table
        .filter(flight_connections::arrival_flight_id.eq_any(flight_ids))
        .group_by(flight_connections::arrival_flight_id)
        .select((
            flight_connections::arrival_flight_id,
            sql::<BigInt>("count(*)"),
        ))
        .load(conn)?;

    for (flight_id, inbound_count) in inbound {
        if let Some(entry) = counts.get_mut(&flight_id) {
            entry.inbound = inbound_count;
        }
    }

    let outbound: Vec<(i64, i64)> = flight_connections::table
        .filter(flight_connections::departure_flight_id.eq_any(flight_ids))
        .group_by(flight_connections::departure_flight_id)
        .select((
            flight_connections::departure_flight_id,
            sql::<BigInt>("count(*)"),
        ))
        .load(conn)?;

    for (flight_id, outbound_count) in outbound {
        if let Some(entry) = counts.get_mut(&flight_id) {
            entry.outbound = outbound_count;
        }
    }

    Ok(counts)
}
}

backend_fn! {
/// Determines whether a gate is occupied inside a departure window.
///
/// A gate is occupied when some live flight assigned to it holds
/// Boarding status and departs inside the window. This is a derived
/// fact about flights; it never reads or alters the gate's own
/// configured `gate_status`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn gate_occupancy(
    conn: &mut _,
    gate_id: i64,
    window_start: &str,
    window_end: &str,
) -> Result<bool, PersistenceError> {
    let occupied: i64 = flights::table
        .inner_join(flight_statuses::table)
        .filter(flights::gate_id.eq(gate_id))
        .filter(flights::deleted_at.is_null())
        .filter(flight_statuses::status_code.eq(BOARDING_STATUS_CODE))
        .filter(flights::scheduled_departure.ge(window_start))
        .filter(flights::scheduled_departure.le(window_end))
        .select(count_star())
        .first(conn)?;

    Ok(occupied > 0)
}
}

backend_fn! {
/// Checks whether dependent records reference a flight.
///
/// Event rows and connection rows both block deletion; history must
/// never be orphaned by removing its flight.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn has_dependents(conn: &mut _, flight_id: i64) -> Result<bool, PersistenceError> {
    let event_count: i64 = flight_events::table
        .filter(flight_events::flight_id.eq(flight_id))
        .select(count_star())
        .first(conn)?;

    if event_count > 0 {
        return Ok(true);
    }

    let connection_count: i64 = flight_connections::table
        .filter(
            flight_connections::arrival_flight_id
                .eq(flight_id)
                .or(flight_connections::departure_flight_id.eq(flight_id)),
        )
        .select(count_star())
        .first(conn)?;

    Ok(connection_count > 0)
}
}
