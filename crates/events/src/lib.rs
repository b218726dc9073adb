// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use airfis_domain::DomainError;

/// The kind of change a flight event records.
///
/// Event kinds are stored as their wire tags (`created`, `STATUS_CHANGE`,
/// ...), which external consumers of the event feed depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The flight record was created.
    Created,
    /// The flight's status reference changed.
    StatusChange,
    /// The flight's gate assignment (or the gate's operational status)
    /// changed.
    GateChange,
    /// The flight's baggage claim (belt) assignment changed.
    ClaimChange,
    /// A scheduled departure or arrival time changed.
    ScheduleChange,
    /// A descriptive annotation with no dedicated kind.
    Note,
}

impl EventKind {
    /// Converts this kind to its stored wire tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChange => "STATUS_CHANGE",
            Self::GateChange => "GATE_CHANGE",
            Self::ClaimChange => "CLAIM_CHANGE",
            Self::ScheduleChange => "SCHEDULE_CHANGE",
            Self::Note => "NOTE",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "STATUS_CHANGE" => Ok(Self::StatusChange),
            "GATE_CHANGE" => Ok(Self::GateChange),
            "CLAIM_CHANGE" => Ok(Self::ClaimChange),
            "SCHEDULE_CHANGE" => Ok(Self::ScheduleChange),
            "NOTE" => Ok(Self::Note),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flight event awaiting persistence.
///
/// Drafts are produced by the synchronizer core alongside the field
/// changes they describe; the persistence layer appends them within the
/// same transaction as the field mutation. An append failure fails the
/// whole operation — no event means as-if-never-happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The kind of change.
    pub kind: EventKind,
    /// The prior value, human-readable, if any.
    pub old_value: Option<String>,
    /// The new value, human-readable, if any.
    pub new_value: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl EventDraft {
    /// Creates a new `EventDraft`.
    #[must_use]
    pub const fn new(
        kind: EventKind,
        old_value: Option<String>,
        new_value: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            kind,
            old_value,
            new_value,
            description,
        }
    }
}

/// A persisted, immutable flight event.
///
/// Events are append-only: once written they are never updated or
/// deleted by normal operation, and together they are the sole source of
/// a flight's history. Identical consecutive events are intentional — the
/// log is an audit trail, not a dedup log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEvent {
    /// The server-assigned event identifier.
    pub event_id: i64,
    /// The flight this event belongs to.
    pub flight_id: i64,
    /// The kind of change.
    pub kind: EventKind,
    /// The prior value, if any.
    pub old_value: Option<String>,
    /// The new value, if any.
    pub new_value: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Creation timestamp (RFC 3339), server-assigned unless the ingest
    /// path supplied one.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_wire_tags() {
        assert_eq!(EventKind::Created.as_str(), "created");
        assert_eq!(EventKind::StatusChange.as_str(), "STATUS_CHANGE");
        assert_eq!(EventKind::GateChange.as_str(), "GATE_CHANGE");
        assert_eq!(EventKind::ClaimChange.as_str(), "CLAIM_CHANGE");
        assert_eq!(EventKind::ScheduleChange.as_str(), "SCHEDULE_CHANGE");
        assert_eq!(EventKind::Note.as_str(), "NOTE");
    }

    #[test]
    fn test_event_kind_round_trip() {
        for kind in [
            EventKind::Created,
            EventKind::StatusChange,
            EventKind::GateChange,
            EventKind::ClaimChange,
            EventKind::ScheduleChange,
            EventKind::Note,
        ] {
            let parsed: EventKind = kind.as_str().parse().expect("round trip");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_event_kind_rejects_unknown_tag() {
        let result: Result<EventKind, _> = "REFUEL".parse();
        assert!(matches!(
            result,
            Err(DomainError::InvalidEventKind(ref tag)) if tag == "REFUEL"
        ));
    }

    #[test]
    fn test_draft_creation_keeps_all_fields() {
        let draft = EventDraft::new(
            EventKind::StatusChange,
            Some(String::from("Scheduled")),
            Some(String::from("Boarding")),
            None,
        );

        assert_eq!(draft.kind, EventKind::StatusChange);
        assert_eq!(draft.old_value.as_deref(), Some("Scheduled"));
        assert_eq!(draft.new_value.as_deref(), Some("Boarding"));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_identical_drafts_compare_equal() {
        // Two identical drafts are still two events once appended; the
        // log never deduplicates. Equality here is structural only.
        let a = EventDraft::new(EventKind::GateChange, None, Some(String::from("1-A2")), None);
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_persisted_event_is_immutable_once_created() {
        let event = FlightEvent {
            event_id: 7,
            flight_id: 3,
            kind: EventKind::Created,
            old_value: None,
            new_value: Some(String::from("PR999")),
            description: Some(String::from("Created via external sync")),
            created_at: String::from("2025-11-20T10:00:00Z"),
        };

        // The type exposes no mutating API; cloning is the only way to
        // derive a new value.
        let copy = event.clone();
        assert_eq!(event, copy);
        assert_eq!(event.event_id, 7);
        assert_eq!(event.kind, EventKind::Created);
    }
}
