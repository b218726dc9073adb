// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airfis_domain::{BaggageBelt, Flight, FlightStatus, Gate};
use airfis_events::EventDraft;
use time::OffsetDateTime;

/// A flight together with its resolved references, as loaded from
/// persistence before a transition is planned.
///
/// The planner never touches storage; the caller resolves the status,
/// gate, and belt rows that the flight references and hands them over
/// here so the planner can render human-readable event values.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    /// The flight record as currently persisted.
    pub flight: Flight,
    /// The status the flight currently references.
    pub status: FlightStatus,
    /// The gate the flight currently references, if any.
    pub gate: Option<Gate>,
    /// The baggage belt the flight currently references, if any.
    pub belt: Option<BaggageBelt>,
}

/// The fields of a flight record to be created.
///
/// References are carried as resolved entities, not raw identifiers, so
/// the planner can validate them and render event values without any
/// storage access.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFlight {
    /// The display flight number.
    pub flight_number: airfis_domain::FlightNumber,
    /// The operating airline's code.
    pub airline_code: String,
    /// The airline's display name, if the payload carried one.
    pub airline_name: Option<String>,
    /// Origin airport code.
    pub origin: airfis_domain::IataCode,
    /// Destination airport code.
    pub destination: airfis_domain::IataCode,
    /// Aircraft type code, if known.
    pub aircraft_type: Option<String>,
    /// Scheduled departure timestamp.
    pub scheduled_departure: OffsetDateTime,
    /// Scheduled arrival timestamp, if known.
    pub scheduled_arrival: Option<OffsetDateTime>,
    /// The initial status, resolved to a persisted row.
    pub status: FlightStatus,
    /// Initial gate assignment, if any.
    pub gate: Option<Gate>,
    /// Initial baggage belt assignment, if any.
    pub belt: Option<BaggageBelt>,
    /// Stable external reference supplied by the integration, if any.
    pub external_ref: Option<String>,
}

/// Field-level changes to persist against an existing flight row.
///
/// Outer `None` means "leave the column alone"; for nullable columns the
/// inner `Option` distinguishes "set to a value" from "set to NULL".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSet {
    /// New status reference.
    pub status_id: Option<i64>,
    /// New gate reference (`Some(None)` clears the assignment).
    pub gate_id: Option<Option<i64>>,
    /// New baggage belt reference (`Some(None)` clears the assignment).
    pub belt_id: Option<Option<i64>>,
    /// New terminal reference, derived from the gate or belt.
    pub terminal_id: Option<Option<i64>>,
    /// New airline code.
    pub airline_code: Option<String>,
    /// New aircraft type (`Some(None)` clears it).
    pub aircraft_type: Option<Option<String>>,
    /// New scheduled departure.
    pub scheduled_departure: Option<OffsetDateTime>,
    /// New scheduled arrival (`Some(None)` clears it).
    pub scheduled_arrival: Option<Option<OffsetDateTime>>,
}

impl ChangeSet {
    /// Returns whether this change set touches no columns at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status_id.is_none()
            && self.gate_id.is_none()
            && self.belt_id.is_none()
            && self.terminal_id.is_none()
            && self.airline_code.is_none()
            && self.aircraft_type.is_none()
            && self.scheduled_departure.is_none()
            && self.scheduled_arrival.is_none()
    }
}

/// The outcome of planning a transition against an existing flight.
///
/// The persistence layer applies the change set and appends every event
/// draft inside a single transaction. A plan may carry events with an
/// empty change set (an explicit no-op update is still recorded) but
/// never changes without at least one event.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// The flight the plan applies to.
    pub flight_id: i64,
    /// Column-level changes to apply.
    pub changes: ChangeSet,
    /// Events to append, in order.
    pub events: Vec<EventDraft>,
}

/// The outcome of planning a flight creation.
///
/// The persistence layer upserts the airline row, inserts the flight,
/// and appends the events inside a single transaction, so a failed
/// creation leaves no partial rows behind.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationPlan {
    /// The validated flight to insert. `flight_id` is `None` until the
    /// insert assigns it.
    pub flight: Flight,
    /// Display name for the airline row upserted alongside the flight.
    pub airline_name: Option<String>,
    /// Events to append once the insert has assigned an identifier.
    pub events: Vec<EventDraft>,
}
