// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Flight number is empty or invalid.
    InvalidFlightNumber(String),
    /// IATA airport code is not three ASCII letters.
    InvalidIataCode(String),
    /// Airline code is empty or invalid.
    InvalidAirlineCode(String),
    /// Flight status code is empty or invalid.
    InvalidStatusCode(String),
    /// Gate operational status string is not recognized.
    InvalidGateStatus(String),
    /// Baggage belt operational status string is not recognized.
    InvalidBeltStatus(String),
    /// Event kind string is not recognized.
    InvalidEventKind(String),
    /// Scheduled arrival is not strictly after scheduled departure.
    ArrivalNotAfterDeparture {
        /// The scheduled departure timestamp (RFC 3339).
        departure: String,
        /// The offending scheduled arrival timestamp (RFC 3339).
        arrival: String,
    },
    /// Origin and destination airports are the same.
    OriginEqualsDestination {
        /// The airport code appearing on both ends of the route.
        code: String,
    },
    /// Failed to parse a timestamp from a string.
    TimestampParseError {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Local code for a composite key is empty.
    EmptyLocalCode {
        /// The entity whose code was empty (e.g., "gate", "terminal").
        entity: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlightNumber(msg) => write!(f, "Invalid flight number: {msg}"),
            Self::InvalidIataCode(msg) => write!(f, "Invalid IATA code: {msg}"),
            Self::InvalidAirlineCode(msg) => write!(f, "Invalid airline code: {msg}"),
            Self::InvalidStatusCode(msg) => write!(f, "Invalid status code: {msg}"),
            Self::InvalidGateStatus(msg) => write!(f, "Invalid gate status: {msg}"),
            Self::InvalidBeltStatus(msg) => write!(f, "Invalid baggage belt status: {msg}"),
            Self::InvalidEventKind(msg) => write!(f, "Invalid event kind: {msg}"),
            Self::ArrivalNotAfterDeparture { departure, arrival } => {
                write!(
                    f,
                    "Scheduled arrival {arrival} must be strictly after scheduled departure {departure}"
                )
            }
            Self::OriginEqualsDestination { code } => {
                write!(f, "Origin and destination are both '{code}'")
            }
            Self::TimestampParseError { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
            Self::EmptyLocalCode { entity } => {
                write!(f, "Local code for {entity} cannot be empty")
            }
        }
    }
}

impl std::error::Error for DomainError {}
