// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Pure transition planning for the flight synchronizer.
//!
//! This crate turns a resolved flight state and a requested change into
//! a [`SyncPlan`]: the columns to mutate plus the events to append.
//! Nothing here performs I/O; the persistence layer applies plans
//! transactionally so a flight's record and its event log can never
//! drift apart.

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{apply, plan_creation};
pub use command::{ChangeRequest, FlightPatch};
pub use error::CoreError;
pub use state::{ChangeSet, CreationPlan, FlightState, NewFlight, SyncPlan};
