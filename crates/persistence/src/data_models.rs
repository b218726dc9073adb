// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types bridging the relational schema and the domain types.
//!
//! Timestamps are stored as RFC 3339 text normalized to UTC, so
//! lexicographic comparisons on the stored columns match chronological
//! order. Conversions back into domain values can fail only if a row was
//! written outside the application; those failures surface as
//! `CorruptRecord`.

use diesel::prelude::*;
use std::str::FromStr;

use airfis_core::ChangeSet;
use airfis_domain::{
    Airport, BaggageBelt, BeltStatus, Flight, FlightNumber, FlightStatus, Gate, GateStatus,
    IataCode, Terminal, format_timestamp, parse_timestamp,
};
use airfis_events::{EventKind, FlightEvent};

use crate::diesel_schema::{flight_events, flights};
use crate::error::PersistenceError;

/// Queryable row for the `flight_statuses` table.
#[derive(Debug, Clone, Queryable)]
pub struct StatusRow {
    pub status_id: i64,
    pub status_code: String,
    pub status_name: String,
    pub canonical_code: String,
}

impl From<StatusRow> for FlightStatus {
    fn from(row: StatusRow) -> Self {
        Self::with_id(row.status_id, &row.status_code, &row.status_name)
    }
}

/// Queryable row for the `gates` table.
#[derive(Debug, Clone, Queryable)]
pub struct GateRow {
    pub gate_id: i64,
    pub terminal_id: i64,
    pub gate_code: String,
    pub canonical_code: String,
    pub gate_status: String,
}

impl TryFrom<GateRow> for Gate {
    type Error = PersistenceError;

    fn try_from(row: GateRow) -> Result<Self, Self::Error> {
        let status = GateStatus::from_str(&row.gate_status)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(Self::with_id(
            row.gate_id,
            row.terminal_id,
            &row.gate_code,
            status,
        ))
    }
}

/// Queryable row for the `baggage_belts` table.
#[derive(Debug, Clone, Queryable)]
pub struct BeltRow {
    pub belt_id: i64,
    pub terminal_id: i64,
    pub belt_code: String,
    pub canonical_code: String,
    pub belt_status: String,
}

impl TryFrom<BeltRow> for BaggageBelt {
    type Error = PersistenceError;

    fn try_from(row: BeltRow) -> Result<Self, Self::Error> {
        let status = BeltStatus::from_str(&row.belt_status)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(Self::with_id(
            row.belt_id,
            row.terminal_id,
            &row.belt_code,
            status,
        ))
    }
}

/// Queryable row for the `terminals` table.
#[derive(Debug, Clone, Queryable)]
pub struct TerminalRow {
    pub terminal_id: i64,
    pub airport_id: i64,
    pub terminal_code: String,
    pub canonical_code: String,
    pub name: Option<String>,
}

impl From<TerminalRow> for Terminal {
    fn from(row: TerminalRow) -> Self {
        Self::with_id(row.terminal_id, row.airport_id, &row.terminal_code, row.name)
    }
}

/// Queryable row for the `airports` table.
#[derive(Debug, Clone, Queryable)]
pub struct AirportRow {
    pub airport_id: i64,
    pub iata_code: String,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<AirportRow> for Airport {
    type Error = PersistenceError;

    fn try_from(row: AirportRow) -> Result<Self, Self::Error> {
        let iata = IataCode::new(&row.iata_code)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(Self::with_id(row.airport_id, iata, row.name))
    }
}

/// Queryable row for the `flights` table.
#[derive(Debug, Clone, Queryable)]
pub struct FlightRow {
    pub flight_id: i64,
    pub flight_number: String,
    pub airline_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub aircraft_type: Option<String>,
    pub scheduled_departure: String,
    pub scheduled_arrival: Option<String>,
    pub status_id: i64,
    pub gate_id: Option<i64>,
    pub belt_id: Option<i64>,
    pub terminal_id: Option<i64>,
    pub external_ref: Option<String>,
    pub deleted_at: Option<String>,
}

impl TryFrom<FlightRow> for Flight {
    type Error = PersistenceError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        let corrupt = |e: airfis_domain::DomainError| PersistenceError::CorruptRecord(e.to_string());
        Ok(Self {
            flight_id: Some(row.flight_id),
            flight_number: FlightNumber::new(&row.flight_number).map_err(corrupt)?,
            airline_code: row.airline_code,
            origin: IataCode::new(&row.origin_code).map_err(corrupt)?,
            destination: IataCode::new(&row.destination_code).map_err(corrupt)?,
            aircraft_type: row.aircraft_type,
            scheduled_departure: parse_timestamp(&row.scheduled_departure).map_err(corrupt)?,
            scheduled_arrival: row
                .scheduled_arrival
                .as_deref()
                .map(parse_timestamp)
                .transpose()
                .map_err(corrupt)?,
            status_id: row.status_id,
            gate_id: row.gate_id,
            belt_id: row.belt_id,
            terminal_id: row.terminal_id,
            external_ref: row.external_ref,
            deleted_at: row
                .deleted_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()
                .map_err(corrupt)?,
        })
    }
}

/// Insertable row for the `flights` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = flights)]
pub struct NewFlightRow {
    pub flight_number: String,
    pub airline_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub aircraft_type: Option<String>,
    pub scheduled_departure: String,
    pub scheduled_arrival: Option<String>,
    pub status_id: i64,
    pub gate_id: Option<i64>,
    pub belt_id: Option<i64>,
    pub terminal_id: Option<i64>,
    pub external_ref: Option<String>,
}

impl From<&Flight> for NewFlightRow {
    fn from(flight: &Flight) -> Self {
        Self {
            flight_number: flight.flight_number.value().to_string(),
            airline_code: flight.airline_code.clone(),
            origin_code: flight.origin.value().to_string(),
            destination_code: flight.destination.value().to_string(),
            aircraft_type: flight.aircraft_type.clone(),
            scheduled_departure: format_timestamp(flight.scheduled_departure),
            scheduled_arrival: flight.scheduled_arrival.map(format_timestamp),
            status_id: flight.status_id,
            gate_id: flight.gate_id,
            belt_id: flight.belt_id,
            terminal_id: flight.terminal_id,
            external_ref: flight.external_ref.clone(),
        }
    }
}

/// Changeset row for the `flights` table.
///
/// Outer `None` skips the column; `Some(None)` writes NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = flights)]
pub struct FlightChangesRow {
    pub status_id: Option<i64>,
    pub gate_id: Option<Option<i64>>,
    pub belt_id: Option<Option<i64>>,
    pub terminal_id: Option<Option<i64>>,
    pub airline_code: Option<String>,
    pub aircraft_type: Option<Option<String>>,
    pub scheduled_departure: Option<String>,
    pub scheduled_arrival: Option<Option<String>>,
}

impl From<&ChangeSet> for FlightChangesRow {
    fn from(changes: &ChangeSet) -> Self {
        Self {
            status_id: changes.status_id,
            gate_id: changes.gate_id,
            belt_id: changes.belt_id,
            terminal_id: changes.terminal_id,
            airline_code: changes.airline_code.clone(),
            aircraft_type: changes.aircraft_type.clone(),
            scheduled_departure: changes.scheduled_departure.map(format_timestamp),
            scheduled_arrival: changes
                .scheduled_arrival
                .map(|arrival| arrival.map(format_timestamp)),
        }
    }
}

/// Queryable row for the `flight_events` table.
#[derive(Debug, Clone, Queryable)]
pub struct EventRow {
    pub event_id: i64,
    pub flight_id: i64,
    pub event_kind: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

impl TryFrom<EventRow> for FlightEvent {
    type Error = PersistenceError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let kind = EventKind::from_str(&row.event_kind)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(Self {
            event_id: row.event_id,
            flight_id: row.flight_id,
            kind,
            old_value: row.old_value,
            new_value: row.new_value,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

/// Insertable row for the `flight_events` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = flight_events)]
pub struct NewEventRow {
    pub flight_id: i64,
    pub event_kind: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}
