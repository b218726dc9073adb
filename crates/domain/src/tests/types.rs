// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{
    BaggageBelt, BeltStatus, FlightNumber, FlightStatus, Gate, GateStatus, IataCode,
    composite_code, format_timestamp, parse_timestamp,
};
use std::str::FromStr;
use time::macros::datetime;

#[test]
fn test_iata_code_normalizes_to_uppercase() {
    let code = IataCode::new("mnl").expect("valid code");
    assert_eq!(code.value(), "MNL");
}

#[test]
fn test_iata_code_rejects_wrong_length() {
    assert!(matches!(
        IataCode::new("MN"),
        Err(DomainError::InvalidIataCode(_))
    ));
    assert!(matches!(
        IataCode::new("MNLA"),
        Err(DomainError::InvalidIataCode(_))
    ));
}

#[test]
fn test_iata_code_rejects_non_alphabetic() {
    assert!(matches!(
        IataCode::new("M1L"),
        Err(DomainError::InvalidIataCode(_))
    ));
}

#[test]
fn test_flight_number_rejects_empty() {
    assert!(matches!(
        FlightNumber::new("   "),
        Err(DomainError::InvalidFlightNumber(_))
    ));
}

#[test]
fn test_flight_number_normalizes() {
    let number = FlightNumber::new(" pr999 ").expect("valid number");
    assert_eq!(number.value(), "PR999");
}

#[test]
fn test_composite_code_format() {
    assert_eq!(composite_code(1, "A2"), "1-A2");
    assert_eq!(composite_code("MNL", "T1"), "MNL-T1");
}

#[test]
fn test_composite_code_preserves_separator_in_local_code() {
    // Local codes may contain the separator; composition never needs to
    // be reversible by splitting.
    assert_eq!(composite_code(4, "A-WEST"), "4-A-WEST");
}

#[test]
fn test_gate_canonical_code_follows_terminal_and_code() {
    let gate = Gate::with_id(10, 1, "a2", GateStatus::Open);
    assert_eq!(gate.canonical_code(), "1-A2");
    assert_eq!(gate.gate_code(), "A2");
}

#[test]
fn test_gate_rejects_empty_code() {
    assert!(matches!(
        Gate::new(1, ""),
        Err(DomainError::EmptyLocalCode { entity: "gate" })
    ));
}

#[test]
fn test_belt_canonical_code() {
    let belt = BaggageBelt::with_id(3, 2, "b7", BeltStatus::Active);
    assert_eq!(belt.canonical_code(), "2-B7");
}

#[test]
fn test_flight_status_canonical_code_requires_id() {
    let unsaved = FlightStatus::new("SCH", "Scheduled").expect("valid status");
    assert_eq!(unsaved.canonical_code(), None);

    let saved = FlightStatus::with_id(1, "SCH", "Scheduled");
    assert_eq!(saved.canonical_code().as_deref(), Some("1-SCH"));
}

#[test]
fn test_flight_status_equality_ignores_id() {
    let a = FlightStatus::with_id(1, "SCH", "Scheduled");
    let b = FlightStatus::with_id(99, "SCH", "Scheduled");
    assert_eq!(a, b);
}

#[test]
fn test_gate_status_round_trip() {
    for status in [GateStatus::Open, GateStatus::Closed] {
        let parsed = GateStatus::from_str(status.as_str()).expect("round trip");
        assert_eq!(parsed, status);
    }
    assert!(GateStatus::from_str("Ajar").is_err());
}

#[test]
fn test_belt_status_round_trip() {
    for status in [
        BeltStatus::Active,
        BeltStatus::Maintenance,
        BeltStatus::Closed,
        BeltStatus::Scheduled,
    ] {
        let parsed = BeltStatus::from_str(status.as_str()).expect("round trip");
        assert_eq!(parsed, status);
    }
    assert!(BeltStatus::from_str("Broken").is_err());
}

#[test]
fn test_timestamp_round_trip_is_utc() {
    let ts = datetime!(2025-11-20 10:00:00 UTC);
    let formatted = format_timestamp(ts);
    assert_eq!(formatted, "2025-11-20T10:00:00Z");

    let parsed = parse_timestamp(&formatted).expect("valid timestamp");
    assert_eq!(parsed, ts);
}

#[test]
fn test_timestamp_parse_rejects_garbage() {
    assert!(matches!(
        parse_timestamp("next tuesday"),
        Err(DomainError::TimestampParseError { .. })
    ));
}
