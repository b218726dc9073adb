// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airfis_domain::{
    BaggageBelt, Flight, FlightStatus, Gate, format_timestamp, validate_route, validate_schedule,
};
use airfis_events::{EventDraft, EventKind};

use crate::command::{ChangeRequest, FlightPatch};
use crate::error::CoreError;
use crate::state::{ChangeSet, CreationPlan, FlightState, NewFlight, SyncPlan};

/// Display value for a cleared gate or belt assignment in event logs.
const UNASSIGNED: &str = "Unassigned";

fn require_id(id: Option<i64>, what: &str) -> Result<i64, CoreError> {
    id.ok_or_else(|| CoreError::Internal(format!("{what} reached the planner without an ID")))
}

fn gate_label(gate: Option<&Gate>) -> String {
    gate.map_or_else(|| String::from(UNASSIGNED), Gate::canonical_code)
}

fn belt_label(belt: Option<&BaggageBelt>) -> String {
    belt.map_or_else(|| String::from(UNASSIGNED), BaggageBelt::canonical_code)
}

/// Derives the flight's terminal from its resource assignments.
///
/// The gate wins when both are assigned; a flight boards and claims in
/// the same terminal in practice, and the gate is the operationally
/// authoritative one.
fn derived_terminal(gate: Option<&Gate>, belt: Option<&BaggageBelt>) -> Option<i64> {
    gate.map(Gate::terminal_id).or_else(|| belt.map(BaggageBelt::terminal_id))
}

fn status_change_event(old: &FlightStatus, new: &FlightStatus) -> EventDraft {
    EventDraft::new(
        EventKind::StatusChange,
        Some(String::from(old.status_name())),
        Some(String::from(new.status_name())),
        None,
    )
}

/// Plans the creation of a new flight record.
///
/// Validates the route and schedule invariants, derives the terminal
/// from the initial resource assignments, and emits the `created` event
/// that anchors the flight's history.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the origin equals the
/// destination or the arrival is not strictly after the departure, and
/// `CoreError::Internal` if a referenced entity carries no persisted ID.
pub fn plan_creation(new: NewFlight) -> Result<CreationPlan, CoreError> {
    validate_route(&new.origin, &new.destination)?;
    validate_schedule(new.scheduled_departure, new.scheduled_arrival)?;

    let status_id = require_id(new.status.status_id(), "status")?;
    let gate_id = match &new.gate {
        Some(gate) => Some(require_id(gate.gate_id(), "gate")?),
        None => None,
    };
    let belt_id = match &new.belt {
        Some(belt) => Some(require_id(belt.belt_id(), "baggage belt")?),
        None => None,
    };
    let terminal_id = derived_terminal(new.gate.as_ref(), new.belt.as_ref());

    let created = EventDraft::new(
        EventKind::Created,
        None,
        Some(new.flight_number.value().to_string()),
        Some(String::from("Flight record created")),
    );

    let flight = Flight {
        flight_id: None,
        flight_number: new.flight_number,
        airline_code: new.airline_code,
        origin: new.origin,
        destination: new.destination,
        aircraft_type: new.aircraft_type,
        scheduled_departure: new.scheduled_departure,
        scheduled_arrival: new.scheduled_arrival,
        status_id,
        gate_id,
        belt_id,
        terminal_id,
        external_ref: new.external_ref,
        deleted_at: None,
    };

    Ok(CreationPlan {
        flight,
        airline_name: new.airline_name,
        events: vec![created],
    })
}

/// Plans a transition against an existing flight.
///
/// The explicit variants (`Status`, `Gate`, `BaggageBelt`) always
/// produce exactly one event, even when the requested value equals the
/// current one. `Upsert` produces one event per logically distinct
/// change and none at all when the payload changes nothing.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the patched schedule would
/// violate the arrival-after-departure invariant, and
/// `CoreError::Internal` if the flight or a referenced entity carries no
/// persisted ID.
pub fn apply(state: &FlightState, request: ChangeRequest) -> Result<SyncPlan, CoreError> {
    let flight_id = require_id(state.flight.flight_id, "flight")?;
    let mut changes = ChangeSet::default();
    let mut events: Vec<EventDraft> = Vec::new();

    match request {
        ChangeRequest::Status { new_status } => {
            let new_id = require_id(new_status.status_id(), "status")?;
            if new_id != state.flight.status_id {
                changes.status_id = Some(new_id);
            }
            events.push(status_change_event(&state.status, &new_status));
        }
        ChangeRequest::Gate { new_gate } => {
            plan_gate_change(state, new_gate.as_ref(), &mut changes)?;
            events.push(EventDraft::new(
                EventKind::GateChange,
                Some(gate_label(state.gate.as_ref())),
                Some(gate_label(new_gate.as_ref())),
                None,
            ));
        }
        ChangeRequest::BaggageBelt { new_belt } => {
            plan_belt_change(state, new_belt.as_ref(), &mut changes)?;
            events.push(EventDraft::new(
                EventKind::ClaimChange,
                Some(belt_label(state.belt.as_ref())),
                Some(belt_label(new_belt.as_ref())),
                None,
            ));
        }
        ChangeRequest::Upsert(patch) => {
            plan_upsert(state, patch, &mut changes, &mut events)?;
        }
    }

    Ok(SyncPlan {
        flight_id,
        changes,
        events,
    })
}

fn plan_gate_change(
    state: &FlightState,
    new_gate: Option<&Gate>,
    changes: &mut ChangeSet,
) -> Result<(), CoreError> {
    let new_id = match new_gate {
        Some(gate) => Some(require_id(gate.gate_id(), "gate")?),
        None => None,
    };
    if new_id != state.flight.gate_id {
        changes.gate_id = Some(new_id);
    }
    let terminal = derived_terminal(new_gate, state.belt.as_ref());
    if terminal != state.flight.terminal_id {
        changes.terminal_id = Some(terminal);
    }
    Ok(())
}

fn plan_belt_change(
    state: &FlightState,
    new_belt: Option<&BaggageBelt>,
    changes: &mut ChangeSet,
) -> Result<(), CoreError> {
    let new_id = match new_belt {
        Some(belt) => Some(require_id(belt.belt_id(), "baggage belt")?),
        None => None,
    };
    if new_id != state.flight.belt_id {
        changes.belt_id = Some(new_id);
    }
    let terminal = derived_terminal(state.gate.as_ref(), new_belt);
    if terminal != state.flight.terminal_id {
        changes.terminal_id = Some(terminal);
    }
    Ok(())
}

fn plan_upsert(
    state: &FlightState,
    patch: FlightPatch,
    changes: &mut ChangeSet,
    events: &mut Vec<EventDraft>,
) -> Result<(), CoreError> {
    let flight = &state.flight;

    // Validate the schedule the flight would end up with, whichever
    // side(s) the payload touched.
    let effective_departure = patch
        .scheduled_departure
        .unwrap_or(flight.scheduled_departure);
    let effective_arrival = patch
        .scheduled_arrival
        .unwrap_or(flight.scheduled_arrival);
    validate_schedule(effective_departure, effective_arrival)?;

    if let Some(airline_code) = patch.airline_code
        && airline_code != flight.airline_code
    {
        events.push(EventDraft::new(
            EventKind::Note,
            Some(flight.airline_code.clone()),
            Some(airline_code.clone()),
            Some(String::from("Airline changed")),
        ));
        changes.airline_code = Some(airline_code);
    }

    if let Some(aircraft_type) = patch.aircraft_type
        && aircraft_type != flight.aircraft_type
    {
        events.push(EventDraft::new(
            EventKind::Note,
            flight.aircraft_type.clone(),
            aircraft_type.clone(),
            Some(String::from("Aircraft type changed")),
        ));
        changes.aircraft_type = Some(aircraft_type);
    }

    if let Some(departure) = patch.scheduled_departure
        && departure != flight.scheduled_departure
    {
        events.push(EventDraft::new(
            EventKind::ScheduleChange,
            Some(format_timestamp(flight.scheduled_departure)),
            Some(format_timestamp(departure)),
            Some(String::from("Scheduled departure changed")),
        ));
        changes.scheduled_departure = Some(departure);
    }

    if let Some(arrival) = patch.scheduled_arrival
        && arrival != flight.scheduled_arrival
    {
        events.push(EventDraft::new(
            EventKind::ScheduleChange,
            flight.scheduled_arrival.map(format_timestamp),
            arrival.map(format_timestamp),
            Some(String::from("Scheduled arrival changed")),
        ));
        changes.scheduled_arrival = Some(arrival);
    }

    if let Some(new_status) = patch.status {
        let new_id = require_id(new_status.status_id(), "status")?;
        if new_id != flight.status_id {
            events.push(status_change_event(&state.status, &new_status));
            changes.status_id = Some(new_id);
        }
    }

    // Resource assignments; the terminal is rederived from whatever the
    // flight ends up referencing.
    let effective_gate = match &patch.gate {
        Some(gate) => gate.as_ref(),
        None => state.gate.as_ref(),
    };
    let effective_belt = match &patch.belt {
        Some(belt) => belt.as_ref(),
        None => state.belt.as_ref(),
    };

    if let Some(new_gate) = &patch.gate {
        let new_id = match new_gate {
            Some(gate) => Some(require_id(gate.gate_id(), "gate")?),
            None => None,
        };
        if new_id != flight.gate_id {
            events.push(EventDraft::new(
                EventKind::GateChange,
                Some(gate_label(state.gate.as_ref())),
                Some(gate_label(new_gate.as_ref())),
                None,
            ));
            changes.gate_id = Some(new_id);
        }
    }

    if let Some(new_belt) = &patch.belt {
        let new_id = match new_belt {
            Some(belt) => Some(require_id(belt.belt_id(), "baggage belt")?),
            None => None,
        };
        if new_id != flight.belt_id {
            events.push(EventDraft::new(
                EventKind::ClaimChange,
                Some(belt_label(state.belt.as_ref())),
                Some(belt_label(new_belt.as_ref())),
                None,
            ));
            changes.belt_id = Some(new_id);
        }
    }

    let terminal = derived_terminal(effective_gate, effective_belt);
    if terminal != flight.terminal_id {
        changes.terminal_id = Some(terminal);
    }

    Ok(())
}
