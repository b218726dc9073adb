// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for webhook ingress, UI actions, and read
//! queries.
//!
//! Every state-changing handler follows the same shape: resolve
//! references, plan the change with the pure core, persist the plan in
//! one transaction, and return the updated record. Handlers never write
//! outside a plan.

use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{info, warn};

use airfis_core::{ChangeRequest, FlightPatch, FlightState, NewFlight, apply, plan_creation};
use airfis_domain::{
    BaggageBelt, BeltStatus, ConnectionCounts, Flight, FlightNumber, FlightStatus, Gate,
    GateStatus, IataCode, classify_flight, format_timestamp, parse_timestamp,
};
use airfis_persistence::{FlightFilter, Persistence};

use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::request_response::{
    BulkItemResult, BulkItemStatus, BulkUpdateKind, BulkUpdateRequest, BulkUpdateResponse,
    DeleteFlightResponse, EventInfo, FlightDetails, FlightEventsResponse, FlightListResponse,
    FlightSyncRequest, FlightSyncResponse, GateOccupancyResponse, ResourceStatusResponse,
    StatusUpdateRequest,
};

/// Default status code assigned to newly synced flights that carry no
/// status of their own.
const DEFAULT_STATUS_REF: &str = "SCH";

/// Query parameters for the flight listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct FlightListQuery {
    /// `arrival` or `departure`.
    pub role: Option<String>,
    /// Calendar day (`YYYY-MM-DD`) of the scheduled departure.
    pub date: Option<String>,
    /// Substring match on number, airline, origin, or destination.
    pub search: Option<String>,
    /// Include soft-deleted flights.
    pub include_deleted: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn parse_rfc3339(field: &str, value: &str) -> Result<time::OffsetDateTime, ApiError> {
    parse_timestamp(value).map_err(|e| ApiError::validation(field, &e.to_string()))
}

fn parse_iata(field: &str, value: &str) -> Result<IataCode, ApiError> {
    IataCode::new(value).map_err(|e| ApiError::validation(field, &e.to_string()))
}

fn load_state(persistence: &mut Persistence, flight_id: i64) -> Result<FlightState, ApiError> {
    persistence
        .load_flight_state(flight_id)
        .map_err(|e| translate_persistence_error(&e))
}

/// Assembles the annotated view of a flight.
///
/// `counts` lets listing callers batch the connection query; single
/// lookups pass `None` and the counts are fetched here.
fn flight_details(
    persistence: &mut Persistence,
    state: &FlightState,
    home_airport: &IataCode,
    counts: Option<&BTreeMap<i64, ConnectionCounts>>,
) -> Result<FlightDetails, ApiError> {
    let flight = &state.flight;
    let flight_id = flight
        .flight_id
        .ok_or_else(|| ApiError::integration("Loaded flight has no identifier"))?;

    let connections = match counts {
        Some(map) => map.get(&flight_id).copied().unwrap_or_default(),
        None => persistence
            .connection_counts(&[flight_id])
            .map_err(|e| translate_persistence_error(&e))?
            .get(&flight_id)
            .copied()
            .unwrap_or_default(),
    };

    Ok(FlightDetails {
        flight_id,
        flight_number: flight.flight_number.value().to_string(),
        airline_code: flight.airline_code.clone(),
        origin: flight.origin.value().to_string(),
        destination: flight.destination.value().to_string(),
        aircraft_type: flight.aircraft_type.clone(),
        scheduled_departure: format_timestamp(flight.scheduled_departure),
        scheduled_arrival: flight.scheduled_arrival.map(format_timestamp),
        status_code: state.status.status_code().to_string(),
        status_name: state.status.status_name().to_string(),
        gate: state.gate.as_ref().map(Gate::canonical_code),
        baggage_belt: state.belt.as_ref().map(BaggageBelt::canonical_code),
        terminal_id: flight.terminal_id,
        external_ref: flight.external_ref.clone(),
        role: classify_flight(flight, home_airport).as_str().to_string(),
        has_connections: connections.has_connections(),
        connections,
        deleted: flight.is_deleted(),
    })
}

/// Locates the flight a sync payload refers to.
///
/// The external reference is the primary upsert key; the
/// `(flight_number, scheduled_departure)` pair is the fallback for
/// feeds that supply none.
fn find_sync_target(
    persistence: &mut Persistence,
    request: &FlightSyncRequest,
    departure: Option<time::OffsetDateTime>,
) -> Result<Option<Flight>, ApiError> {
    if let Some(external_ref) = &request.external_ref {
        return persistence
            .find_by_external_ref(external_ref)
            .map_err(|e| translate_persistence_error(&e));
    }

    match (&request.flight_number, departure) {
        (Some(number), Some(departure)) => persistence
            .find_by_number_and_departure(number, &format_timestamp(departure))
            .map_err(|e| translate_persistence_error(&e)),
        _ => Err(ApiError::integration(
            "Sync payload carries neither external_ref nor (flight_number, scheduled_departure)",
        )),
    }
}

fn resolve_status_ref(
    persistence: &mut Persistence,
    reference: &str,
) -> Result<FlightStatus, ApiError> {
    persistence
        .resolve_status(reference)
        .map_err(|e| translate_persistence_error(&e))
}

fn resolve_gate_ref(persistence: &mut Persistence, reference: &str) -> Result<Gate, ApiError> {
    persistence
        .resolve_gate(reference)
        .map_err(|e| translate_persistence_error(&e))
}

fn resolve_belt_ref(
    persistence: &mut Persistence,
    reference: &str,
) -> Result<BaggageBelt, ApiError> {
    persistence
        .resolve_belt(reference)
        .map_err(|e| translate_persistence_error(&e))
}

/// Rejects a gate assignment the gate's configuration does not permit.
fn check_gate_admission(
    persistence: &mut Persistence,
    gate: &Gate,
    flight: &Flight,
) -> Result<(), ApiError> {
    let gate_id = gate
        .gate_id()
        .ok_or_else(|| ApiError::integration("Resolved gate has no identifier"))?;

    let airline_ok = persistence
        .gate_allows_airline(gate_id, &flight.airline_code)
        .map_err(|e| translate_persistence_error(&e))?;
    if !airline_ok {
        return Err(ApiError::conflict(&format!(
            "Gate {} is not authorized for airline {}",
            gate.canonical_code(),
            flight.airline_code
        )));
    }

    if let Some(aircraft_type) = &flight.aircraft_type {
        let aircraft_ok = persistence
            .gate_allows_aircraft(gate_id, aircraft_type)
            .map_err(|e| translate_persistence_error(&e))?;
        if !aircraft_ok {
            return Err(ApiError::conflict(&format!(
                "Gate {} prohibits aircraft type {aircraft_type}",
                gate.canonical_code()
            )));
        }
    }

    Ok(())
}

/// Processes one flight sync payload: creates the flight on first
/// sight, otherwise merges the supplied fields into the existing
/// record.
///
/// # Errors
///
/// Returns `IntegrationError` for payloads missing identifying fields,
/// `ValidationError` for invalid values, and `NotFound` for unresolvable
/// references.
pub fn sync_flight(
    persistence: &mut Persistence,
    request: &FlightSyncRequest,
) -> Result<FlightSyncResponse, ApiError> {
    let departure = request
        .scheduled_departure
        .as_deref()
        .map(|value| parse_rfc3339("scheduled_departure", value))
        .transpose()?;
    let arrival = request
        .scheduled_arrival
        .as_deref()
        .map(|value| parse_rfc3339("scheduled_arrival", value))
        .transpose()?;

    let existing = find_sync_target(persistence, request, departure)?;

    let status = request
        .status
        .as_deref()
        .map(|reference| resolve_status_ref(persistence, reference))
        .transpose()?;
    let gate = request
        .gate
        .as_deref()
        .map(|reference| resolve_gate_ref(persistence, reference))
        .transpose()?;
    let belt = request
        .baggage_belt
        .as_deref()
        .map(|reference| resolve_belt_ref(persistence, reference))
        .transpose()?;

    match existing {
        Some(flight) => {
            let flight_id = flight
                .flight_id
                .ok_or_else(|| ApiError::integration("Stored flight has no identifier"))?;
            if let Some(airline_code) = &request.airline_code {
                persistence
                    .ensure_airline(airline_code, request.airline_name.as_deref())
                    .map_err(|e| translate_persistence_error(&e))?;
            }
            let state = load_state(persistence, flight_id)?;

            let patch = FlightPatch {
                airline_code: request.airline_code.clone(),
                aircraft_type: request.aircraft_type.clone().map(Some),
                scheduled_departure: departure,
                scheduled_arrival: arrival.map(Some),
                status,
                gate: gate.map(Some),
                belt: belt.map(Some),
            };

            let plan = apply(&state, ChangeRequest::Upsert(patch))
                .map_err(|e| translate_core_error(&e))?;
            persistence
                .persist_plan(&plan)
                .map_err(|e| translate_persistence_error(&e))?;

            let updated = load_state(persistence, flight_id)?;
            info!(flight_id, events = plan.events.len(), "Sync payload merged");
            Ok(FlightSyncResponse {
                flight_id,
                flight_number: updated.flight.flight_number.value().to_string(),
                created: false,
                status_code: updated.status.status_code().to_string(),
                message: String::from("Flight updated"),
            })
        }
        None => {
            let number = request.flight_number.as_deref().ok_or_else(|| {
                ApiError::integration("Sync payload for a new flight carries no flight_number")
            })?;
            let departure = departure.ok_or_else(|| {
                ApiError::integration(
                    "Sync payload for a new flight carries no scheduled_departure",
                )
            })?;
            let flight_number = FlightNumber::new(number)
                .map_err(|e| ApiError::validation("flight_number", &e.to_string()))?;
            let origin = request
                .origin
                .as_deref()
                .ok_or_else(|| ApiError::validation("origin", "Origin airport is required"))
                .and_then(|value| parse_iata("origin", value))?;
            let destination = request
                .destination
                .as_deref()
                .ok_or_else(|| {
                    ApiError::validation("destination", "Destination airport is required")
                })
                .and_then(|value| parse_iata("destination", value))?;
            let airline_code = request
                .airline_code
                .clone()
                .ok_or_else(|| ApiError::validation("airline_code", "Airline code is required"))?;

            let status = match status {
                Some(status) => status,
                None => resolve_status_ref(persistence, DEFAULT_STATUS_REF)?,
            };

            let new_flight = NewFlight {
                flight_number,
                airline_code,
                airline_name: request.airline_name.clone(),
                origin,
                destination,
                aircraft_type: request.aircraft_type.clone(),
                scheduled_departure: departure,
                scheduled_arrival: arrival,
                status,
                gate,
                belt,
                external_ref: request.external_ref.clone(),
            };

            let plan = plan_creation(new_flight).map_err(|e| translate_core_error(&e))?;
            let flight_id = persistence
                .persist_creation(&plan)
                .map_err(|e| translate_persistence_error(&e))?;

            let created = load_state(persistence, flight_id)?;
            info!(flight_id, "Flight created from sync payload");
            Ok(FlightSyncResponse {
                flight_id,
                flight_number: created.flight.flight_number.value().to_string(),
                created: true,
                status_code: created.status.status_code().to_string(),
                message: String::from("Flight created"),
            })
        }
    }
}

/// Processes one status update webhook payload.
///
/// The target flight may be named by id or by bare flight number; a
/// bare number matching more than one live flight is rejected rather
/// than guessed at.
///
/// # Errors
///
/// Returns `IntegrationError` for payloads naming neither a status nor
/// a flight.
pub fn webhook_status_update(
    persistence: &mut Persistence,
    request: &StatusUpdateRequest,
    home_airport: &IataCode,
) -> Result<FlightDetails, ApiError> {
    let status_ref = request.status_code.as_deref().ok_or_else(|| {
        ApiError::integration("Status update payload carries no status field")
    })?;

    let flight_id = match (request.flight_id, &request.flight_number) {
        (Some(flight_id), _) => flight_id,
        (None, Some(number)) => {
            let flight = persistence
                .resolve_unique_by_number(number)
                .map_err(|e| translate_persistence_error(&e))?;
            flight
                .flight_id
                .ok_or_else(|| ApiError::integration("Stored flight has no identifier"))?
        }
        (None, None) => {
            return Err(ApiError::integration(
                "Status update payload names neither flight_id nor flight_number",
            ));
        }
    };

    update_status(persistence, flight_id, status_ref, home_airport)
}

/// Sets a flight's status and logs the transition.
///
/// # Errors
///
/// Returns `NotFound` for unknown flights or statuses.
pub fn update_status(
    persistence: &mut Persistence,
    flight_id: i64,
    status_ref: &str,
    home_airport: &IataCode,
) -> Result<FlightDetails, ApiError> {
    let new_status = resolve_status_ref(persistence, status_ref)?;
    let state = load_state(persistence, flight_id)?;

    let plan =
        apply(&state, ChangeRequest::Status { new_status }).map_err(|e| translate_core_error(&e))?;
    persistence
        .persist_plan(&plan)
        .map_err(|e| translate_persistence_error(&e))?;

    let updated = load_state(persistence, flight_id)?;
    flight_details(persistence, &updated, home_airport, None)
}

/// Sets or clears a flight's gate assignment.
///
/// # Errors
///
/// Returns `Conflict` if the gate's airline or aircraft restrictions
/// reject the flight.
pub fn update_gate(
    persistence: &mut Persistence,
    flight_id: i64,
    gate_ref: Option<&str>,
    home_airport: &IataCode,
) -> Result<FlightDetails, ApiError> {
    let state = load_state(persistence, flight_id)?;

    let new_gate = gate_ref
        .map(|reference| resolve_gate_ref(persistence, reference))
        .transpose()?;
    if let Some(gate) = &new_gate {
        check_gate_admission(persistence, gate, &state.flight)?;
    }

    let plan =
        apply(&state, ChangeRequest::Gate { new_gate }).map_err(|e| translate_core_error(&e))?;
    persistence
        .persist_plan(&plan)
        .map_err(|e| translate_persistence_error(&e))?;

    let updated = load_state(persistence, flight_id)?;
    flight_details(persistence, &updated, home_airport, None)
}

/// Sets or clears a flight's baggage belt assignment.
///
/// # Errors
///
/// Returns `NotFound` for unknown flights or belts.
pub fn update_baggage_belt(
    persistence: &mut Persistence,
    flight_id: i64,
    belt_ref: Option<&str>,
    home_airport: &IataCode,
) -> Result<FlightDetails, ApiError> {
    let state = load_state(persistence, flight_id)?;

    let new_belt = belt_ref
        .map(|reference| resolve_belt_ref(persistence, reference))
        .transpose()?;

    let plan = apply(&state, ChangeRequest::BaggageBelt { new_belt })
        .map_err(|e| translate_core_error(&e))?;
    persistence
        .persist_plan(&plan)
        .map_err(|e| translate_persistence_error(&e))?;

    let updated = load_state(persistence, flight_id)?;
    flight_details(persistence, &updated, home_airport, None)
}

/// Sets a gate's operational status, fanning the change out to the
/// timeline of every assigned flight.
///
/// # Errors
///
/// Returns `NotFound` for unknown gates and `ValidationError` for
/// unknown status strings.
pub fn update_gate_status(
    persistence: &mut Persistence,
    gate_ref: &str,
    status: &str,
) -> Result<ResourceStatusResponse, ApiError> {
    let new_status = GateStatus::from_str(status)
        .map_err(|e| ApiError::validation("status", &e.to_string()))?;
    let gate = resolve_gate_ref(persistence, gate_ref)?;
    let gate_id = gate
        .gate_id()
        .ok_or_else(|| ApiError::integration("Resolved gate has no identifier"))?;

    let flights_notified = persistence
        .set_gate_status(gate_id, new_status)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(ResourceStatusResponse {
        canonical_code: gate.canonical_code(),
        status: new_status.as_str().to_string(),
        flights_notified,
    })
}

/// Sets a baggage belt's operational status, fanning the change out to
/// the timeline of every assigned flight.
///
/// # Errors
///
/// Returns `NotFound` for unknown belts and `ValidationError` for
/// unknown status strings.
pub fn update_belt_status(
    persistence: &mut Persistence,
    belt_ref: &str,
    status: &str,
) -> Result<ResourceStatusResponse, ApiError> {
    let new_status = BeltStatus::from_str(status)
        .map_err(|e| ApiError::validation("status", &e.to_string()))?;
    let belt = resolve_belt_ref(persistence, belt_ref)?;
    let belt_id = belt
        .belt_id()
        .ok_or_else(|| ApiError::integration("Resolved belt has no identifier"))?;

    let flights_notified = persistence
        .set_belt_status(belt_id, new_status)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(ResourceStatusResponse {
        canonical_code: belt.canonical_code(),
        status: new_status.as_str().to_string(),
        flights_notified,
    })
}

const fn bulk_item_status(error: &ApiError) -> BulkItemStatus {
    match error {
        ApiError::NotFound { .. } => BulkItemStatus::NotFound,
        ApiError::ValidationError { .. } => BulkItemStatus::ValidationError,
        ApiError::Conflict { .. } => BulkItemStatus::Conflict,
        ApiError::IntegrationError { .. } => BulkItemStatus::IntegrationError,
    }
}

/// Applies one change across many flights, each independently.
///
/// A failure on one flight never skips or unwinds the others; the
/// response lists every requested flight with its own outcome.
///
/// # Errors
///
/// Returns `ValidationError` only for request-level problems (an empty
/// id list, or a status bulk update without a value). Per-flight
/// failures are reported in the result list, not as errors.
pub fn bulk_update(
    persistence: &mut Persistence,
    request: &BulkUpdateRequest,
    home_airport: &IataCode,
) -> Result<BulkUpdateResponse, ApiError> {
    if request.flight_ids.is_empty() {
        return Err(ApiError::validation("flight_ids", "No flights named"));
    }
    if request.kind == BulkUpdateKind::Status && request.value.is_none() {
        return Err(ApiError::validation(
            "value",
            "Status bulk updates require a status value",
        ));
    }

    let mut results = Vec::with_capacity(request.flight_ids.len());
    for &flight_id in &request.flight_ids {
        let outcome = match request.kind {
            BulkUpdateKind::Status => request.value.as_deref().map_or_else(
                || Err(ApiError::validation("value", "Missing status value")),
                |value| update_status(persistence, flight_id, value, home_airport),
            ),
            BulkUpdateKind::Gate => {
                update_gate(persistence, flight_id, request.value.as_deref(), home_airport)
            }
            BulkUpdateKind::BaggageBelt => update_baggage_belt(
                persistence,
                flight_id,
                request.value.as_deref(),
                home_airport,
            ),
        };

        match outcome {
            Ok(_) => results.push(BulkItemResult {
                flight_id,
                status: BulkItemStatus::Ok,
                error: None,
            }),
            Err(error) => {
                warn!(flight_id, %error, "Bulk update item failed");
                results.push(BulkItemResult {
                    flight_id,
                    status: bulk_item_status(&error),
                    error: Some(error.to_string()),
                });
            }
        }
    }

    let succeeded = results
        .iter()
        .filter(|r| r.status == BulkItemStatus::Ok)
        .count();
    let failed = results.len() - succeeded;
    Ok(BulkUpdateResponse {
        results,
        succeeded,
        failed,
    })
}

/// Soft-deletes a flight.
///
/// # Errors
///
/// Returns `Conflict` while dependent events or connections exist.
pub fn delete_flight(
    persistence: &mut Persistence,
    flight_id: i64,
) -> Result<DeleteFlightResponse, ApiError> {
    persistence
        .soft_delete_flight(flight_id)
        .map_err(|e| translate_persistence_error(&e))?;

    info!(flight_id, "Flight deleted");
    Ok(DeleteFlightResponse {
        flight_id,
        message: String::from("Flight deleted"),
    })
}

/// Retrieves one flight with annotations.
///
/// # Errors
///
/// Returns `NotFound` for unknown or deleted flights.
pub fn get_flight(
    persistence: &mut Persistence,
    flight_id: i64,
    home_airport: &IataCode,
) -> Result<FlightDetails, ApiError> {
    let state = load_state(persistence, flight_id)?;
    flight_details(persistence, &state, home_airport, None)
}

/// Lists flights with classification and connection annotations.
///
/// # Errors
///
/// Returns `ValidationError` for an unknown role filter.
pub fn list_flights(
    persistence: &mut Persistence,
    query: &FlightListQuery,
    home_airport: &IataCode,
) -> Result<FlightListResponse, ApiError> {
    let role = match query.role.as_deref() {
        None => None,
        Some("arrival") => Some(airfis_domain::FlightRole::Arrival),
        Some("departure") => Some(airfis_domain::FlightRole::Departure),
        Some(other) => {
            return Err(ApiError::validation(
                "role",
                &format!("Unknown role '{other}'; expected 'arrival' or 'departure'"),
            ));
        }
    };

    let defaults = FlightFilter::default();
    let filter = FlightFilter {
        role,
        home: Some(home_airport.clone()),
        date: query.date.clone(),
        search: query.search.clone(),
        include_deleted: query.include_deleted,
        limit: query.limit.unwrap_or(defaults.limit),
        offset: query.offset.unwrap_or(defaults.offset),
    };

    let flights = persistence
        .list_flights(&filter)
        .map_err(|e| translate_persistence_error(&e))?;

    let flight_ids: Vec<i64> = flights.iter().filter_map(|f| f.flight_id).collect();
    let counts = persistence
        .connection_counts(&flight_ids)
        .map_err(|e| translate_persistence_error(&e))?;

    let mut details = Vec::with_capacity(flights.len());
    for flight in &flights {
        let flight_id = flight
            .flight_id
            .ok_or_else(|| ApiError::integration("Listed flight has no identifier"))?;
        // Deleted rows surface only in include-deleted mode; resolve
        // their references directly since load_flight_state refuses them.
        let state = if flight.is_deleted() {
            let status = persistence
                .get_status(flight.status_id)
                .map_err(|e| translate_persistence_error(&e))?;
            FlightState {
                flight: flight.clone(),
                status,
                gate: None,
                belt: None,
            }
        } else {
            load_state(persistence, flight_id)?
        };
        details.push(flight_details(
            persistence,
            &state,
            home_airport,
            Some(&counts),
        )?);
    }

    let count = details.len();
    Ok(FlightListResponse {
        flights: details,
        count,
    })
}

/// Retrieves a flight's full event timeline, oldest first.
///
/// The timeline remains readable after the flight is soft-deleted.
///
/// # Errors
///
/// Returns `NotFound` if the flight never existed.
pub fn flight_events(
    persistence: &mut Persistence,
    flight_id: i64,
) -> Result<FlightEventsResponse, ApiError> {
    persistence
        .get_flight(flight_id)
        .map_err(|e| translate_persistence_error(&e))?;

    let events = persistence
        .list_events(flight_id)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(FlightEventsResponse {
        flight_id,
        events: events
            .into_iter()
            .map(|event| EventInfo {
                event_id: event.event_id,
                kind: event.kind.as_str().to_string(),
                old_value: event.old_value,
                new_value: event.new_value,
                description: event.description,
                created_at: event.created_at,
            })
            .collect(),
    })
}

/// Answers whether a gate is occupied inside a departure window.
///
/// # Errors
///
/// Returns `NotFound` for unknown gates and `ValidationError` for
/// malformed window timestamps.
pub fn gate_occupancy(
    persistence: &mut Persistence,
    gate_ref: &str,
    window_start: &str,
    window_end: &str,
) -> Result<GateOccupancyResponse, ApiError> {
    let start = parse_rfc3339("window_start", window_start)?;
    let end = parse_rfc3339("window_end", window_end)?;
    if end < start {
        return Err(ApiError::validation(
            "window_end",
            "Window end precedes window start",
        ));
    }

    let gate = resolve_gate_ref(persistence, gate_ref)?;
    let gate_id = gate
        .gate_id()
        .ok_or_else(|| ApiError::integration("Resolved gate has no identifier"))?;

    let occupied = persistence
        .gate_occupancy(
            gate_id,
            &format_timestamp(start),
            &format_timestamp(end),
        )
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(GateOccupancyResponse {
        gate_id,
        canonical_code: gate.canonical_code(),
        occupied,
        window_start: format_timestamp(start),
        window_end: format_timestamp(end),
    })
}
