// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airfis_domain::{BaggageBelt, FlightStatus, Gate};
use time::OffsetDateTime;

/// A requested change against an existing flight.
///
/// The explicit variants come from the dedicated update operations and
/// always produce an event, even when the value does not change — the
/// caller asked for the update, so the log records it. `Upsert` comes
/// from the external sync feed and only records logically distinct
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeRequest {
    /// Set the flight's status.
    Status {
        /// The resolved target status.
        new_status: FlightStatus,
    },
    /// Set or clear the flight's gate assignment.
    Gate {
        /// The resolved target gate, or `None` to clear.
        new_gate: Option<Gate>,
    },
    /// Set or clear the flight's baggage belt assignment.
    BaggageBelt {
        /// The resolved target belt, or `None` to clear.
        new_belt: Option<BaggageBelt>,
    },
    /// Merge an external sync payload into the flight.
    Upsert(FlightPatch),
}

/// The fields an external sync payload may supply for an existing
/// flight.
///
/// Outer `None` means the payload did not mention the field; for
/// clearable fields the inner `Option` distinguishes "set" from
/// "clear".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlightPatch {
    /// New airline code.
    pub airline_code: Option<String>,
    /// New aircraft type (`Some(None)` clears it).
    pub aircraft_type: Option<Option<String>>,
    /// New scheduled departure.
    pub scheduled_departure: Option<OffsetDateTime>,
    /// New scheduled arrival (`Some(None)` clears it).
    pub scheduled_arrival: Option<Option<OffsetDateTime>>,
    /// New status, resolved to a persisted row.
    pub status: Option<FlightStatus>,
    /// New gate assignment (`Some(None)` clears it).
    pub gate: Option<Option<Gate>>,
    /// New baggage belt assignment (`Some(None)` clears it).
    pub belt: Option<Option<BaggageBelt>>,
}
