// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Webhook requests tolerate the field spellings the upstream feed has
//! shipped over the years (serde aliases); responses have exactly one
//! spelling.

use serde::{Deserialize, Serialize};

use airfis_domain::ConnectionCounts;

/// Webhook payload for the flight sync feed.
///
/// Every field is optional at the parsing layer; the handler decides
/// which combinations are acceptable for creation versus update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightSyncRequest {
    /// Stable upstream identifier; the upsert idempotency key.
    pub external_ref: Option<String>,
    pub flight_number: Option<String>,
    #[serde(alias = "airline")]
    pub airline_code: Option<String>,
    pub airline_name: Option<String>,
    #[serde(alias = "origin_code")]
    pub origin: Option<String>,
    #[serde(alias = "destination_code")]
    pub destination: Option<String>,
    pub aircraft_type: Option<String>,
    #[serde(alias = "departure_time")]
    pub scheduled_departure: Option<String>,
    #[serde(alias = "arrival_time")]
    pub scheduled_arrival: Option<String>,
    #[serde(alias = "status_code")]
    pub status: Option<String>,
    #[serde(alias = "gate_code")]
    pub gate: Option<String>,
    #[serde(alias = "belt_code")]
    pub baggage_belt: Option<String>,
}

/// Response for a processed sync payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSyncResponse {
    pub flight_id: i64,
    pub flight_number: String,
    /// Whether this payload created the flight (first sight).
    pub created: bool,
    pub status_code: String,
    pub message: String,
}

/// Webhook payload for the status update feed.
///
/// The feed has shipped three spellings of the status field; all are
/// accepted. The target flight is an id or a flight number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(alias = "new_status_code", alias = "status")]
    pub status_code: Option<String>,
    pub flight_id: Option<i64>,
    pub flight_number: Option<String>,
}

/// UI request to set a flight's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// Status reference: canonical code, id, or bare code.
    pub status: String,
}

/// UI request to set or clear a flight's gate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGateRequest {
    /// Gate reference; `null` or absent clears the assignment.
    pub gate: Option<String>,
}

/// UI request to set or clear a flight's baggage belt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBeltRequest {
    /// Belt reference; `null` or absent clears the assignment.
    pub baggage_belt: Option<String>,
}

/// UI request to set a gate's or belt's operational status.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceStatusRequest {
    pub status: String,
}

/// The field a bulk update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkUpdateKind {
    Status,
    Gate,
    BaggageBelt,
}

/// UI request to apply one change across many flights.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateRequest {
    pub flight_ids: Vec<i64>,
    pub kind: BulkUpdateKind,
    /// The target value; `null` clears gate/belt assignments.
    pub value: Option<String>,
}

/// Outcome category for one flight inside a bulk update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkItemStatus {
    Ok,
    NotFound,
    ValidationError,
    Conflict,
    IntegrationError,
}

/// Per-flight result of a bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItemResult {
    pub flight_id: i64,
    pub status: BulkItemStatus,
    /// Present when `status` is not `Ok`.
    pub error: Option<String>,
}

/// Response for a bulk update: one entry per requested flight, in
/// request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateResponse {
    pub results: Vec<BulkItemResult>,
    pub succeeded: usize,
    pub failed: usize,
}

/// A flight annotated with resolved references and schedule
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    pub flight_id: i64,
    pub flight_number: String,
    pub airline_code: String,
    pub origin: String,
    pub destination: String,
    pub aircraft_type: Option<String>,
    pub scheduled_departure: String,
    pub scheduled_arrival: Option<String>,
    pub status_code: String,
    pub status_name: String,
    /// Canonical gate code, if assigned.
    pub gate: Option<String>,
    /// Canonical belt code, if assigned.
    pub baggage_belt: Option<String>,
    pub terminal_id: Option<i64>,
    pub external_ref: Option<String>,
    /// `arrival` or `departure` relative to the configured home airport.
    pub role: String,
    pub connections: ConnectionCounts,
    pub has_connections: bool,
    pub deleted: bool,
}

/// Response for the flight listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightListResponse {
    pub flights: Vec<FlightDetails>,
    pub count: usize,
}

/// One entry of a flight's event timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub event_id: i64,
    pub kind: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

/// Response for the event timeline endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEventsResponse {
    pub flight_id: i64,
    pub events: Vec<EventInfo>,
}

/// Response for a soft delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFlightResponse {
    pub flight_id: i64,
    pub message: String,
}

/// Response for a gate or belt operational status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStatusResponse {
    pub canonical_code: String,
    pub status: String,
    /// Live flights whose timelines received the change event.
    pub flights_notified: usize,
}

/// Response for the derived gate occupancy query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOccupancyResponse {
    pub gate_id: i64,
    pub canonical_code: String,
    pub occupied: bool,
    pub window_start: String,
    pub window_end: String,
}
