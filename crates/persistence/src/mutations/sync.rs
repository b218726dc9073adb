// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional orchestration of synchronization plans.
//!
//! Each function here wraps its work in exactly one diesel
//! transaction: field mutations and their event appends commit
//! together or not at all. A failed event append therefore unwinds the
//! field change, keeping the record and its history consistent.
//!
//! These functions compose other generated pairs, so both backend
//! variants are written by hand rather than through `backend_fn!`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use time::OffsetDateTime;
use tracing::info;

use airfis_core::{CreationPlan, SyncPlan};
use airfis_domain::{BeltStatus, GateStatus, format_timestamp};
use airfis_events::{EventDraft, EventKind};

use crate::data_models::FlightChangesRow;
use crate::diesel_schema::{baggage_belts, gates};
use crate::error::PersistenceError;
use crate::mutations::{events, flights, resources};
use crate::queries;

/// Persists a creation plan: upserts the airline row, inserts the
/// flight, and appends its `created` event atomically.
///
/// # Errors
///
/// Returns an error if any part fails; nothing is persisted then.
pub fn persist_creation_sqlite(
    conn: &mut SqliteConnection,
    plan: &CreationPlan,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        resources::ensure_airline_sqlite(
            conn,
            &plan.flight.airline_code,
            plan.airline_name.as_deref(),
        )?;
        let flight_id = flights::insert_flight_sqlite(conn, &plan.flight)?;
        for draft in &plan.events {
            events::append_event_sqlite(conn, flight_id, draft, None)?;
        }
        info!(flight_id, events = plan.events.len(), "Flight creation persisted");
        Ok(flight_id)
    })
}

/// Persists a creation plan: upserts the airline row, inserts the
/// flight, and appends its `created` event atomically.
///
/// # Errors
///
/// Returns an error if any part fails; nothing is persisted then.
pub fn persist_creation_mysql(
    conn: &mut MysqlConnection,
    plan: &CreationPlan,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        resources::ensure_airline_mysql(
            conn,
            &plan.flight.airline_code,
            plan.airline_name.as_deref(),
        )?;
        let flight_id = flights::insert_flight_mysql(conn, &plan.flight)?;
        for draft in &plan.events {
            events::append_event_mysql(conn, flight_id, draft, None)?;
        }
        info!(flight_id, events = plan.events.len(), "Flight creation persisted");
        Ok(flight_id)
    })
}

/// Persists a sync plan: applies the changeset (if non-empty) and
/// appends every event atomically.
///
/// # Errors
///
/// Returns an error if any part fails; the transaction rolls back.
pub fn persist_plan_sqlite(
    conn: &mut SqliteConnection,
    plan: &SyncPlan,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        if !plan.changes.is_empty() {
            let changes = FlightChangesRow::from(&plan.changes);
            flights::apply_changes_sqlite(conn, plan.flight_id, &changes)?;
        }
        for draft in &plan.events {
            events::append_event_sqlite(conn, plan.flight_id, draft, None)?;
        }
        info!(
            flight_id = plan.flight_id,
            events = plan.events.len(),
            "Sync plan persisted"
        );
        Ok(())
    })
}

/// Persists a sync plan: applies the changeset (if non-empty) and
/// appends every event atomically.
///
/// # Errors
///
/// Returns an error if any part fails; the transaction rolls back.
pub fn persist_plan_mysql(
    conn: &mut MysqlConnection,
    plan: &SyncPlan,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        if !plan.changes.is_empty() {
            let changes = FlightChangesRow::from(&plan.changes);
            flights::apply_changes_mysql(conn, plan.flight_id, &changes)?;
        }
        for draft in &plan.events {
            events::append_event_mysql(conn, plan.flight_id, draft, None)?;
        }
        info!(
            flight_id = plan.flight_id,
            events = plan.events.len(),
            "Sync plan persisted"
        );
        Ok(())
    })
}

/// Soft-deletes a flight, refusing while dependent records exist.
///
/// # Errors
///
/// Returns `NotFound` for missing or already-deleted flights and
/// `FlightReferenced` while events or connections reference it.
pub fn soft_delete_flight_sqlite(
    conn: &mut SqliteConnection,
    flight_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let flight = queries::flights::get_flight_sqlite(conn, flight_id)?;
        if flight.is_deleted() {
            return Err(PersistenceError::NotFound(format!("Flight {flight_id}")));
        }
        if queries::classify::has_dependents_sqlite(conn, flight_id)? {
            return Err(PersistenceError::FlightReferenced { flight_id });
        }
        flights::mark_deleted_sqlite(
            conn,
            flight_id,
            &format_timestamp(OffsetDateTime::now_utc()),
        )
    })
}

/// Soft-deletes a flight, refusing while dependent records exist.
///
/// # Errors
///
/// Returns `NotFound` for missing or already-deleted flights and
/// `FlightReferenced` while events or connections reference it.
pub fn soft_delete_flight_mysql(
    conn: &mut MysqlConnection,
    flight_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let flight = queries::flights::get_flight_mysql(conn, flight_id)?;
        if flight.is_deleted() {
            return Err(PersistenceError::NotFound(format!("Flight {flight_id}")));
        }
        if queries::classify::has_dependents_mysql(conn, flight_id)? {
            return Err(PersistenceError::FlightReferenced { flight_id });
        }
        flights::mark_deleted_mysql(conn, flight_id, &format_timestamp(OffsetDateTime::now_utc()))
    })
}

/// Sets a gate's operational status and logs a `GATE_CHANGE` event
/// against every live flight assigned to it. Returns the number of
/// flights notified.
///
/// # Errors
///
/// Returns `NotFound` if the gate does not exist.
pub fn set_gate_status_sqlite(
    conn: &mut SqliteConnection,
    gate_id: i64,
    new_status: GateStatus,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let gate = queries::resources::get_gate_sqlite(conn, gate_id)?;

        diesel::update(gates::table)
            .filter(gates::gate_id.eq(gate_id))
            .set(gates::gate_status.eq(new_status.as_str()))
            .execute(conn)?;

        let assigned = queries::flights::flights_assigned_to_gate_sqlite(conn, gate_id)?;
        let draft = gate_status_event(&gate.canonical_code(), gate.gate_status(), new_status);
        for flight in &assigned {
            if let Some(flight_id) = flight.flight_id {
                events::append_event_sqlite(conn, flight_id, &draft, None)?;
            }
        }

        info!(gate_id, status = new_status.as_str(), flights = assigned.len(), "Gate status updated");
        Ok(assigned.len())
    })
}

/// Sets a gate's operational status and logs a `GATE_CHANGE` event
/// against every live flight assigned to it. Returns the number of
/// flights notified.
///
/// # Errors
///
/// Returns `NotFound` if the gate does not exist.
pub fn set_gate_status_mysql(
    conn: &mut MysqlConnection,
    gate_id: i64,
    new_status: GateStatus,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let gate = queries::resources::get_gate_mysql(conn, gate_id)?;

        diesel::update(gates::table)
            .filter(gates::gate_id.eq(gate_id))
            .set(gates::gate_status.eq(new_status.as_str()))
            .execute(conn)?;

        let assigned = queries::flights::flights_assigned_to_gate_mysql(conn, gate_id)?;
        let draft = gate_status_event(&gate.canonical_code(), gate.gate_status(), new_status);
        for flight in &assigned {
            if let Some(flight_id) = flight.flight_id {
                events::append_event_mysql(conn, flight_id, &draft, None)?;
            }
        }

        info!(gate_id, status = new_status.as_str(), flights = assigned.len(), "Gate status updated");
        Ok(assigned.len())
    })
}

/// Sets a belt's operational status and logs a `CLAIM_CHANGE` event
/// against every live flight assigned to it. Returns the number of
/// flights notified.
///
/// # Errors
///
/// Returns `NotFound` if the belt does not exist.
pub fn set_belt_status_sqlite(
    conn: &mut SqliteConnection,
    belt_id: i64,
    new_status: BeltStatus,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let belt = queries::resources::get_belt_sqlite(conn, belt_id)?;

        diesel::update(baggage_belts::table)
            .filter(baggage_belts::belt_id.eq(belt_id))
            .set(baggage_belts::belt_status.eq(new_status.as_str()))
            .execute(conn)?;

        let assigned = queries::flights::flights_assigned_to_belt_sqlite(conn, belt_id)?;
        let draft = belt_status_event(&belt.canonical_code(), belt.belt_status(), new_status);
        for flight in &assigned {
            if let Some(flight_id) = flight.flight_id {
                events::append_event_sqlite(conn, flight_id, &draft, None)?;
            }
        }

        info!(belt_id, status = new_status.as_str(), flights = assigned.len(), "Belt status updated");
        Ok(assigned.len())
    })
}

/// Sets a belt's operational status and logs a `CLAIM_CHANGE` event
/// against every live flight assigned to it. Returns the number of
/// flights notified.
///
/// # Errors
///
/// Returns `NotFound` if the belt does not exist.
pub fn set_belt_status_mysql(
    conn: &mut MysqlConnection,
    belt_id: i64,
    new_status: BeltStatus,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let belt = queries::resources::get_belt_mysql(conn, belt_id)?;

        diesel::update(baggage_belts::table)
            .filter(baggage_belts::belt_id.eq(belt_id))
            .set(baggage_belts::belt_status.eq(new_status.as_str()))
            .execute(conn)?;

        let assigned = queries::flights::flights_assigned_to_belt_mysql(conn, belt_id)?;
        let draft = belt_status_event(&belt.canonical_code(), belt.belt_status(), new_status);
        for flight in &assigned {
            if let Some(flight_id) = flight.flight_id {
                events::append_event_mysql(conn, flight_id, &draft, None)?;
            }
        }

        info!(belt_id, status = new_status.as_str(), flights = assigned.len(), "Belt status updated");
        Ok(assigned.len())
    })
}

fn gate_status_event(canonical_code: &str, old: GateStatus, new: GateStatus) -> EventDraft {
    EventDraft::new(
        EventKind::GateChange,
        Some(old.as_str().to_string()),
        Some(new.as_str().to_string()),
        Some(format!("Gate {canonical_code} status changed")),
    )
}

fn belt_status_event(canonical_code: &str, old: BeltStatus, new: BeltStatus) -> EventDraft {
    EventDraft::new(
        EventKind::ClaimChange,
        Some(old.as_str().to_string()),
        Some(new.as_str().to_string()),
        Some(format!("Baggage belt {canonical_code} status changed")),
    )
}
