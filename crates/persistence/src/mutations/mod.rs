// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutations.
//!
//! Every state-changing operation lives here. Single-table writes go
//! through `backend_fn!`-generated pairs; composite operations that
//! must be atomic (plan application, soft delete, resource status
//! fan-out) are hand-written per backend in `sync` and wrap their work
//! in one diesel transaction each.
//!
//! ## Module Organization
//!
//! - `flights` — flight row insert/update/soft-delete primitives
//! - `events` — append-only event log writes
//! - `resources` — airport/terminal/gate/belt/airline maintenance
//! - `sync` — transactional orchestration of plans and fan-out updates

pub mod events;
pub mod flights;
pub mod resources;
pub mod sync;
