// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Domain, core, and persistence errors translate into this taxonomy at
//! the API boundary; nothing below it leaks to HTTP callers.

use airfis_core::CoreError;
use airfis_domain::DomainError;
use airfis_persistence::PersistenceError;

/// A single invalid field inside a `ValidationError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
}

/// API-level errors.
///
/// These represent the API contract: each variant corresponds to
/// exactly one HTTP status at the server boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A referenced record does not exist.
    NotFound {
        /// What was looked up.
        resource: String,
    },
    /// The request was understood but carries invalid values.
    ValidationError {
        /// The invalid fields, each with its own message.
        errors: Vec<FieldError>,
    },
    /// The request conflicts with the current state of the system.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An upstream payload or internal dependency failed.
    IntegrationError {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl ApiError {
    /// Builds a `NotFound` for a named resource.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
        }
    }

    /// Builds a single-field `ValidationError`.
    #[must_use]
    pub fn validation(field: &str, message: &str) -> Self {
        Self::ValidationError {
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.to_string(),
            }],
        }
    }

    /// Builds a `Conflict`.
    #[must_use]
    pub fn conflict(message: &str) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    /// Builds an `IntegrationError`.
    #[must_use]
    pub fn integration(message: &str) -> Self {
        Self::IntegrationError {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource } => write!(f, "Not found: {resource}"),
            Self::ValidationError { errors } => {
                write!(f, "Validation failed:")?;
                for error in errors {
                    write!(f, " [{}: {}]", error.field, error.message)?;
                }
                Ok(())
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::IntegrationError { message } => write!(f, "Integration error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Maps a `DomainError` to the field it invalidates.
const fn domain_error_field(error: &DomainError) -> &'static str {
    match error {
        DomainError::InvalidFlightNumber(_) => "flight_number",
        DomainError::InvalidIataCode(_) | DomainError::OriginEqualsDestination { .. } => "route",
        DomainError::InvalidAirlineCode(_) => "airline_code",
        DomainError::InvalidStatusCode(_) => "status",
        DomainError::InvalidGateStatus(_) => "gate_status",
        DomainError::InvalidBeltStatus(_) => "belt_status",
        DomainError::InvalidEventKind(_) => "event_kind",
        DomainError::ArrivalNotAfterDeparture { .. } => "scheduled_arrival",
        DomainError::TimestampParseError { .. } => "timestamp",
        DomainError::EmptyLocalCode { .. } => "code",
    }
}

/// Translates a domain rule violation into a `ValidationError`.
#[must_use]
pub fn translate_domain_error(error: &DomainError) -> ApiError {
    ApiError::validation(domain_error_field(error), &error.to_string())
}

/// Translates a core transition error.
#[must_use]
pub fn translate_core_error(error: &CoreError) -> ApiError {
    match error {
        CoreError::DomainViolation(domain_error) => translate_domain_error(domain_error),
        CoreError::Internal(message) => ApiError::integration(message),
    }
}

/// Translates a persistence error.
///
/// Ambiguous bare flight numbers are the caller's problem to
/// disambiguate, so they surface as a `ValidationError` rather than a
/// blind first-match guess.
#[must_use]
pub fn translate_persistence_error(error: &PersistenceError) -> ApiError {
    match error {
        PersistenceError::NotFound(resource) => ApiError::not_found(resource),
        PersistenceError::AmbiguousFlightNumber {
            flight_number,
            matches,
        } => ApiError::validation(
            "flight_number",
            &format!(
                "Flight number '{flight_number}' matches {matches} flights; \
                 identify the flight by id or external_ref"
            ),
        ),
        PersistenceError::FlightReferenced { flight_id } => ApiError::conflict(&format!(
            "Flight {flight_id} has dependent events or connections and cannot be deleted"
        )),
        PersistenceError::TerminalOccupied { terminal_id } => ApiError::conflict(&format!(
            "Terminal {terminal_id} still owns gates or baggage belts"
        )),
        other => ApiError::integration(&other.to_string()),
    }
}
