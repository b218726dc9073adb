// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Separator between the parent identifier and local code in a
/// composite canonical code.
pub const COMPOSITE_SEPARATOR: char = '-';

/// Builds the composite canonical code `{parent}-{local_code}`.
///
/// Composite codes are a denormalized projection kept for compatibility
/// with external systems. They are regenerated on every write that touches
/// the parent reference or local code and are never parsed back apart —
/// a local code may itself contain the separator, so lookups always go
/// through the stored column, never through string splitting.
#[must_use]
pub fn composite_code(parent: impl std::fmt::Display, local_code: &str) -> String {
    format!("{parent}{COMPOSITE_SEPARATOR}{local_code}")
}

/// Formats a timestamp as an RFC 3339 string in UTC.
///
/// All persisted timestamps are normalized to UTC so that lexicographic
/// ordering of the stored text matches chronological ordering.
#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.to_offset(time::UtcOffset::UTC)
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("invalid-timestamp"))
}

/// Parses an RFC 3339 timestamp string.
///
/// # Errors
///
/// Returns `DomainError::TimestampParseError` if the string is not a
/// valid RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::TimestampParseError {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Represents an IATA airport code.
///
/// Codes are normalized to uppercase and must be exactly three ASCII
/// letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IataCode {
    /// The code value (exactly 3 uppercase ASCII letters).
    value: String,
}

impl IataCode {
    /// Creates a new `IataCode`, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIataCode` if the value is not exactly
    /// three ASCII letters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized = value.trim().to_uppercase();
        if normalized.len() != 3 || !normalized.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidIataCode(format!(
                "'{value}' must be exactly three ASCII letters"
            )));
        }
        Ok(Self { value: normalized })
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for IataCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a flight number (e.g., `PR999`).
///
/// Flight numbers are NOT unique across schedule dates; the same number
/// legitimately recurs day after day. They are display identifiers, never
/// canonical keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightNumber {
    /// The flight number value, normalized to uppercase.
    value: String,
}

impl FlightNumber {
    /// Creates a new `FlightNumber`, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFlightNumber` if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized = value.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidFlightNumber(String::from(
                "flight number cannot be empty",
            )));
        }
        Ok(Self { value: normalized })
    }

    /// Returns the flight number value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Operational status of a gate.
///
/// This is the configured resource status, stored on the gate record.
/// It is distinct from derived occupancy (whether a boarding flight
/// currently references the gate) — the two facts never merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GateStatus {
    /// The gate is available for assignment.
    #[default]
    Open,
    /// The gate is closed to assignments.
    Closed,
}

impl GateStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for GateStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidGateStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational status of a baggage belt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BeltStatus {
    /// The belt is in active service.
    #[default]
    Active,
    /// The belt is under maintenance.
    Maintenance,
    /// The belt is closed.
    Closed,
    /// The belt is scheduled for future service.
    Scheduled,
}

impl BeltStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "Maintenance",
            Self::Closed => "Closed",
            Self::Scheduled => "Scheduled",
        }
    }
}

impl FromStr for BeltStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Maintenance" => Ok(Self::Maintenance),
            "Closed" => Ok(Self::Closed),
            "Scheduled" => Ok(Self::Scheduled),
            _ => Err(DomainError::InvalidBeltStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BeltStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flight status lookup entry (e.g., `SCH` / "Scheduled").
///
/// Read-mostly; seeded once and referenced by flights. The canonical
/// composite code (`{status_id}-{status_code}`, e.g. `1-SCH`) is the
/// stable cross-system reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightStatus {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the status has not been persisted yet.
    status_id: Option<i64>,
    /// The short status code (e.g., `SCH`, `BRD`), uppercase.
    status_code: String,
    /// The human-readable status name (e.g., "Scheduled").
    status_name: String,
}

// Two statuses are equal if they have the same code, regardless of IDs.
impl PartialEq for FlightStatus {
    fn eq(&self, other: &Self) -> bool {
        self.status_code == other.status_code
    }
}

impl Eq for FlightStatus {}

impl FlightStatus {
    /// Creates a new `FlightStatus` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusCode` if the code is empty.
    pub fn new(status_code: &str, status_name: &str) -> Result<Self, DomainError> {
        let code = status_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::InvalidStatusCode(String::from(
                "status code cannot be empty",
            )));
        }
        Ok(Self {
            status_id: None,
            status_code: code,
            status_name: status_name.to_string(),
        })
    }

    /// Creates a `FlightStatus` with an existing persisted ID.
    #[must_use]
    pub fn with_id(status_id: i64, status_code: &str, status_name: &str) -> Self {
        Self {
            status_id: Some(status_id),
            status_code: status_code.to_uppercase(),
            status_name: status_name.to_string(),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn status_id(&self) -> Option<i64> {
        self.status_id
    }

    /// Returns the short status code.
    #[must_use]
    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Returns the human-readable status name.
    #[must_use]
    pub fn status_name(&self) -> &str {
        &self.status_name
    }

    /// Returns the canonical composite code (`{status_id}-{status_code}`).
    ///
    /// Only available once the status is persisted.
    #[must_use]
    pub fn canonical_code(&self) -> Option<String> {
        self.status_id
            .map(|id| composite_code(id, &self.status_code))
    }
}

/// A gate, owned by exactly one terminal.
///
/// The canonical code (`{terminal_id}-{gate_code}`) is regenerated
/// whenever the terminal reference or gate code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// The canonical numeric identifier assigned by the database.
    gate_id: Option<i64>,
    /// The owning terminal's identifier.
    terminal_id: i64,
    /// The gate code, unique within the terminal (e.g., `A2`).
    gate_code: String,
    /// The configured operational status.
    gate_status: GateStatus,
}

impl Gate {
    /// Creates a new `Gate` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyLocalCode` if the gate code is empty.
    pub fn new(terminal_id: i64, gate_code: &str) -> Result<Self, DomainError> {
        let code = gate_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::EmptyLocalCode { entity: "gate" });
        }
        Ok(Self {
            gate_id: None,
            terminal_id,
            gate_code: code,
            gate_status: GateStatus::Open,
        })
    }

    /// Creates a `Gate` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        gate_id: i64,
        terminal_id: i64,
        gate_code: &str,
        gate_status: GateStatus,
    ) -> Self {
        Self {
            gate_id: Some(gate_id),
            terminal_id,
            gate_code: gate_code.to_uppercase(),
            gate_status,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn gate_id(&self) -> Option<i64> {
        self.gate_id
    }

    /// Returns the owning terminal's identifier.
    #[must_use]
    pub const fn terminal_id(&self) -> i64 {
        self.terminal_id
    }

    /// Returns the gate code.
    #[must_use]
    pub fn gate_code(&self) -> &str {
        &self.gate_code
    }

    /// Returns the configured operational status.
    #[must_use]
    pub const fn gate_status(&self) -> GateStatus {
        self.gate_status
    }

    /// Returns the canonical composite code (`{terminal_id}-{gate_code}`).
    #[must_use]
    pub fn canonical_code(&self) -> String {
        composite_code(self.terminal_id, &self.gate_code)
    }
}

/// A baggage belt, owned by exactly one terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggageBelt {
    /// The canonical numeric identifier assigned by the database.
    belt_id: Option<i64>,
    /// The owning terminal's identifier.
    terminal_id: i64,
    /// The belt code, unique within the terminal.
    belt_code: String,
    /// The configured operational status.
    belt_status: BeltStatus,
}

impl BaggageBelt {
    /// Creates a new `BaggageBelt` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyLocalCode` if the belt code is empty.
    pub fn new(terminal_id: i64, belt_code: &str) -> Result<Self, DomainError> {
        let code = belt_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::EmptyLocalCode {
                entity: "baggage belt",
            });
        }
        Ok(Self {
            belt_id: None,
            terminal_id,
            belt_code: code,
            belt_status: BeltStatus::Active,
        })
    }

    /// Creates a `BaggageBelt` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        belt_id: i64,
        terminal_id: i64,
        belt_code: &str,
        belt_status: BeltStatus,
    ) -> Self {
        Self {
            belt_id: Some(belt_id),
            terminal_id,
            belt_code: belt_code.to_uppercase(),
            belt_status,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn belt_id(&self) -> Option<i64> {
        self.belt_id
    }

    /// Returns the owning terminal's identifier.
    #[must_use]
    pub const fn terminal_id(&self) -> i64 {
        self.terminal_id
    }

    /// Returns the belt code.
    #[must_use]
    pub fn belt_code(&self) -> &str {
        &self.belt_code
    }

    /// Returns the configured operational status.
    #[must_use]
    pub const fn belt_status(&self) -> BeltStatus {
        self.belt_status
    }

    /// Returns the canonical composite code (`{terminal_id}-{belt_code}`).
    #[must_use]
    pub fn canonical_code(&self) -> String {
        composite_code(self.terminal_id, &self.belt_code)
    }
}

/// A terminal, owned by exactly one airport.
///
/// The canonical code is `{iata_code}-{terminal_code}`. Deletion is
/// rejected while the terminal still owns gates or belts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    /// The canonical numeric identifier assigned by the database.
    terminal_id: Option<i64>,
    /// The owning airport's identifier.
    airport_id: i64,
    /// The terminal code (e.g., `T1`), uppercase.
    terminal_code: String,
    /// Optional terminal display name.
    name: Option<String>,
}

impl Terminal {
    /// Creates a new `Terminal` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyLocalCode` if the terminal code is empty.
    pub fn new(airport_id: i64, terminal_code: &str, name: Option<String>) -> Result<Self, DomainError> {
        let code = terminal_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::EmptyLocalCode { entity: "terminal" });
        }
        Ok(Self {
            terminal_id: None,
            airport_id,
            terminal_code: code,
            name,
        })
    }

    /// Creates a `Terminal` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        terminal_id: i64,
        airport_id: i64,
        terminal_code: &str,
        name: Option<String>,
    ) -> Self {
        Self {
            terminal_id: Some(terminal_id),
            airport_id,
            terminal_code: terminal_code.to_uppercase(),
            name,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn terminal_id(&self) -> Option<i64> {
        self.terminal_id
    }

    /// Returns the owning airport's identifier.
    #[must_use]
    pub const fn airport_id(&self) -> i64 {
        self.airport_id
    }

    /// Returns the terminal code.
    #[must_use]
    pub fn terminal_code(&self) -> &str {
        &self.terminal_code
    }

    /// Returns the terminal name if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the canonical composite code (`{iata_code}-{terminal_code}`).
    #[must_use]
    pub fn canonical_code(&self, iata_code: &IataCode) -> String {
        composite_code(iata_code, &self.terminal_code)
    }
}

/// An airport, identified externally by its IATA code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// The canonical numeric identifier assigned by the database.
    airport_id: Option<i64>,
    /// The IATA airport code.
    iata_code: IataCode,
    /// The airport name.
    name: String,
}

impl Airport {
    /// Creates a new `Airport` without a persisted ID.
    #[must_use]
    pub const fn new(iata_code: IataCode, name: String) -> Self {
        Self {
            airport_id: None,
            iata_code,
            name,
        }
    }

    /// Creates an `Airport` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(airport_id: i64, iata_code: IataCode, name: String) -> Self {
        Self {
            airport_id: Some(airport_id),
            iata_code,
            name,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn airport_id(&self) -> Option<i64> {
        self.airport_id
    }

    /// Returns the IATA airport code.
    #[must_use]
    pub const fn iata_code(&self) -> &IataCode {
        &self.iata_code
    }

    /// Returns the airport name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A flight record's current state.
///
/// `flight_id` is the canonical internal identifier. The flight owns its
/// status/gate/belt/terminal references, never the referenced entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Canonical internal identifier (opaque, stable, never reused).
    /// Optional to support creation before persistence.
    pub flight_id: Option<i64>,
    /// The display flight number (not unique across dates).
    pub flight_number: FlightNumber,
    /// The operating airline's code.
    pub airline_code: String,
    /// Origin airport code.
    pub origin: IataCode,
    /// Destination airport code.
    pub destination: IataCode,
    /// Aircraft type code, if known.
    pub aircraft_type: Option<String>,
    /// Scheduled departure timestamp.
    pub scheduled_departure: OffsetDateTime,
    /// Scheduled arrival timestamp; when present, strictly after departure.
    pub scheduled_arrival: Option<OffsetDateTime>,
    /// Current flight status reference.
    pub status_id: i64,
    /// Current gate assignment, if any.
    pub gate_id: Option<i64>,
    /// Current baggage belt assignment, if any.
    pub belt_id: Option<i64>,
    /// Current terminal, explicit or derived from gate/belt.
    pub terminal_id: Option<i64>,
    /// Stable external reference supplied by the integration, if any.
    /// Used as the webhook idempotency key.
    pub external_ref: Option<String>,
    /// Soft-delete marker; set flights are excluded from normal queries.
    pub deleted_at: Option<OffsetDateTime>,
}

impl Flight {
    /// Returns whether this flight has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
