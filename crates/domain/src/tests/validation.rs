// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::IataCode;
use crate::validation::{validate_route, validate_schedule};
use time::macros::datetime;

#[test]
fn test_schedule_without_arrival_is_valid() {
    let departure = datetime!(2025-11-20 10:00:00 UTC);
    assert!(validate_schedule(departure, None).is_ok());
}

#[test]
fn test_arrival_after_departure_is_valid() {
    let departure = datetime!(2025-11-20 10:00:00 UTC);
    let arrival = datetime!(2025-11-20 14:00:00 UTC);
    assert!(validate_schedule(departure, Some(arrival)).is_ok());
}

#[test]
fn test_arrival_equal_to_departure_is_rejected() {
    let departure = datetime!(2025-11-20 10:00:00 UTC);
    let result = validate_schedule(departure, Some(departure));
    assert!(matches!(
        result,
        Err(DomainError::ArrivalNotAfterDeparture { .. })
    ));
}

#[test]
fn test_arrival_before_departure_is_rejected() {
    let departure = datetime!(2025-11-20 10:00:00 UTC);
    let arrival = datetime!(2025-11-20 09:00:00 UTC);
    let result = validate_schedule(departure, Some(arrival));

    let err = result.expect_err("arrival before departure must fail");
    if let DomainError::ArrivalNotAfterDeparture { departure, arrival } = err {
        assert_eq!(departure, "2025-11-20T10:00:00Z");
        assert_eq!(arrival, "2025-11-20T09:00:00Z");
    } else {
        panic!("Expected ArrivalNotAfterDeparture, got {err:?}");
    }
}

#[test]
fn test_distinct_route_is_valid() {
    let origin = IataCode::new("MNL").expect("valid");
    let destination = IataCode::new("SIN").expect("valid");
    assert!(validate_route(&origin, &destination).is_ok());
}

#[test]
fn test_same_origin_and_destination_is_rejected() {
    let origin = IataCode::new("MNL").expect("valid");
    let destination = IataCode::new("mnl").expect("valid");
    let result = validate_route(&origin, &destination);

    let err = result.expect_err("circular route must fail");
    assert!(matches!(
        err,
        DomainError::OriginEqualsDestination { ref code } if code == "MNL"
    ));
}
