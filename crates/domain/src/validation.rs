// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure schedule and route validation rules.
//!
//! These rules are enforced before any write commits; a violation fails
//! the whole synchronization operation with no partial state.

use crate::error::DomainError;
use crate::types::{IataCode, format_timestamp};
use time::OffsetDateTime;

/// Validates that a scheduled arrival, when present, is strictly after
/// the scheduled departure.
///
/// # Errors
///
/// Returns `DomainError::ArrivalNotAfterDeparture` naming both
/// timestamps if the invariant is violated.
pub fn validate_schedule(
    departure: OffsetDateTime,
    arrival: Option<OffsetDateTime>,
) -> Result<(), DomainError> {
    if let Some(arrival) = arrival
        && arrival <= departure
    {
        return Err(DomainError::ArrivalNotAfterDeparture {
            departure: format_timestamp(departure),
            arrival: format_timestamp(arrival),
        });
    }
    Ok(())
}

/// Validates that a route does not begin and end at the same airport.
///
/// # Errors
///
/// Returns `DomainError::OriginEqualsDestination` if the codes match.
pub fn validate_route(origin: &IataCode, destination: &IataCode) -> Result<(), DomainError> {
    if origin == destination {
        return Err(DomainError::OriginEqualsDestination {
            code: origin.value().to_string(),
        });
    }
    Ok(())
}
