// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airfis_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested record was not found.
    NotFound(String),
    /// A bare flight number matched more than one live flight.
    AmbiguousFlightNumber { flight_number: String, matches: usize },
    /// A flight cannot be deleted because dependent records reference it.
    FlightReferenced { flight_id: i64 },
    /// A terminal cannot be deleted because it still owns gates or belts.
    TerminalOccupied { terminal_id: i64 },
    /// A stored row could not be converted back into a domain value.
    CorruptRecord(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::AmbiguousFlightNumber {
                flight_number,
                matches,
            } => write!(
                f,
                "Flight number {flight_number} matches {matches} flights; a unique reference is required"
            ),
            Self::FlightReferenced { flight_id } => write!(
                f,
                "Flight {flight_id} cannot be deleted: dependent records reference it"
            ),
            Self::TerminalOccupied { terminal_id } => write!(
                f,
                "Terminal {terminal_id} cannot be deleted: it still owns gates or baggage belts"
            ),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}
