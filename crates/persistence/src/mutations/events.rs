// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only event log writes.
//!
//! There is deliberately no update or delete function in this module;
//! the event log's integrity rests on inserts being the only write
//! path.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use time::OffsetDateTime;
use tracing::debug;

use airfis_domain::format_timestamp;
use airfis_events::EventDraft;

use crate::backend::PersistenceBackend;
use crate::data_models::NewEventRow;
use crate::diesel_schema::flight_events;
use crate::error::PersistenceError;

backend_fn! {
/// Appends one immutable event to a flight's log.
///
/// The timestamp is server-assigned unless the caller supplies one
/// (the ingest path may carry source-system timestamps).
///
/// # Errors
///
/// Returns an error if the insert fails; the caller's enclosing
/// transaction then rolls back the whole operation.
pub fn append_event(
    conn: &mut _,
    flight_id: i64,
    draft: &EventDraft,
    created_at: Option<&str>,
) -> Result<i64, PersistenceError> {
    let timestamp = created_at.map_or_else(
        || format_timestamp(OffsetDateTime::now_utc()),
        ToString::to_string,
    );

    let row = NewEventRow {
        flight_id,
        event_kind: draft.kind.as_str().to_string(),
        old_value: draft.old_value.clone(),
        new_value: draft.new_value.clone(),
        description: draft.description.clone(),
        created_at: timestamp,
    };

    diesel::insert_into(flight_events::table)
        .values(&row)
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    debug!(flight_id, event_id, kind = draft.kind.as_str(), "Appended flight event");
    Ok(event_id)
}
}
