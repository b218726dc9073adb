// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the airport Flight Information System.
//!
//! Handlers orchestrate resolve → plan → persist for every operation
//! and translate domain, core, and persistence errors into the
//! four-variant `ApiError` taxonomy the HTTP layer maps to status
//! codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, FieldError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::FlightListQuery;
