// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side schedule classification.
//!
//! Every tracked flight touches the home airport: a flight whose
//! destination is the home airport is an arrival, everything else is a
//! departure. The home airport is explicit configuration passed in by
//! the caller, never a hardcoded constant.

use crate::types::{Flight, IataCode};
use serde::{Deserialize, Serialize};

/// The role a flight plays relative to the home airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightRole {
    /// The flight terminates at the home airport.
    Arrival,
    /// The flight originates at (or passes through from) the home airport.
    Departure,
}

impl FlightRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arrival => "arrival",
            Self::Departure => "departure",
        }
    }
}

impl std::fmt::Display for FlightRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a route destination relative to the home airport.
#[must_use]
pub fn classify(destination: &IataCode, home_airport: &IataCode) -> FlightRole {
    if destination == home_airport {
        FlightRole::Arrival
    } else {
        FlightRole::Departure
    }
}

/// Classifies a flight record relative to the home airport.
#[must_use]
pub fn classify_flight(flight: &Flight, home_airport: &IataCode) -> FlightRole {
    classify(&flight.destination, home_airport)
}

/// Per-flight connection linkage counts.
///
/// A connection links an arriving flight to the departing flight its
/// passengers continue on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionCounts {
    /// Connection rows where this flight is the arrival leg.
    pub inbound: i64,
    /// Connection rows where this flight is the departure leg.
    pub outbound: i64,
}

impl ConnectionCounts {
    /// Returns whether this flight participates in any connection.
    #[must_use]
    pub const fn has_connections(&self) -> bool {
        self.inbound > 0 || self.outbound > 0
    }
}
