// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic read queries.
//!
//! ## Module Organization
//!
//! - `resolver` — tiered canonical identifier resolution
//! - `resources` — gate/belt/terminal/airport lookups and gate
//!   assignment rule checks
//! - `flights` — flight record lookups and filtered listings
//! - `events` — flight event log reads
//! - `classify` — connection counts, derived gate occupancy, and
//!   dependent-record checks

pub mod classify;
pub mod events;
pub mod flights;
pub mod resolver;
pub mod resources;

pub use flights::FlightFilter;
