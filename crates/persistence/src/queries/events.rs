// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight event log reads.
//!
//! The log is append-only; these queries never observe anything but a
//! growing, stably-ordered sequence per flight.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use airfis_events::FlightEvent;

use crate::data_models::EventRow;
use crate::diesel_schema::flight_events;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a flight's full event timeline, oldest first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_events(conn: &mut _, flight_id: i64) -> Result<Vec<FlightEvent>, PersistenceError> {
    let rows: Vec<EventRow> = flight_events::table
        .filter(flight_events::flight_id.eq(flight_id))
        .order(flight_events::event_id.asc())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}
}

backend_fn! {
/// Counts the events recorded for a flight.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_events(conn: &mut _, flight_id: i64) -> Result<i64, PersistenceError> {
    Ok(flight_events::table
        .filter(flight_events::flight_id.eq(flight_id))
        .select(count_star())
        .first(conn)?)
}
}
