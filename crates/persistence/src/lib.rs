// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the airport Flight Information System.
//!
//! This crate owns the relational schema, canonical identifier
//! resolution, the flight record store, and the append-only flight
//! event log. It is built on Diesel and supports multiple database
//! backends.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) — development, unit tests, and integration
//!   tests; in-memory databases give fast, deterministic isolation.
//! - **`MariaDB`/`MySQL`** — compiled by default, validated only via
//!   explicit opt-in tests marked `#[ignore]` and run through
//!   `cargo xtask test-mariadb` (starts a container, runs migrations,
//!   executes the ignored tests, cleans up).
//!
//! ## Migration Strategy
//!
//! SQL syntax differences require separate migration directories:
//! `migrations/` (`SQLite`) and `migrations_mysql/` (`MySQL`). Both
//! must produce identical schema semantics; `cargo xtask
//! verify-migrations` checks the directories stay paired.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database infrastructure is orchestrated by `xtask`,
//!   never embedded in tests

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

use diesel::{MysqlConnection, SqliteConnection};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use airfis_core::{CreationPlan, FlightState, SyncPlan};
use airfis_domain::{
    Airport, BaggageBelt, BeltStatus, ConnectionCounts, Flight, FlightStatus, Gate, GateStatus,
    Terminal,
};
use airfis_events::{EventDraft, FlightEvent};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID,
/// giving deterministic test isolation without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// Generates two separate functions from a single body:
/// - one suffixed `_sqlite` taking `&mut SqliteConnection`
/// - one suffixed `_mysql` taking `&mut MysqlConnection`
///
/// Diesel's type system requires concrete backend types at compile
/// time, so the bodies are duplicated instead of made generic. The
/// macro only substitutes connection types; no logic or dispatch
/// happens inside it. Backend dispatch lives exclusively in the
/// `Persistence` adapter.
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::FlightFilter;

use backend::PersistenceBackend;

/// Internal enum for backend-specific database connections.
///
/// Lets the persistence adapter work with either `SQLite` or `MySQL`
/// behind a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for the flight information store.
///
/// Backend selection happens once at construction time and is
/// transparent to callers.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via an atomic
    /// counter, ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a `MySQL`/`MariaDB`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Identifier Resolution
    // ========================================================================

    /// Resolves a flight status from a canonical composite code, bare
    /// ID, or bare status code, in that order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no tier matches.
    pub fn resolve_status(&mut self, reference: &str) -> Result<FlightStatus, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resolver::resolve_status_sqlite(conn, reference),
            BackendConnection::Mysql(conn) => queries::resolver::resolve_status_mysql(conn, reference),
        }
    }

    /// Resolves a gate with the same tiered strategy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no tier matches.
    pub fn resolve_gate(&mut self, reference: &str) -> Result<Gate, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resolver::resolve_gate_sqlite(conn, reference),
            BackendConnection::Mysql(conn) => queries::resolver::resolve_gate_mysql(conn, reference),
        }
    }

    /// Resolves a baggage belt with the same tiered strategy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no tier matches.
    pub fn resolve_belt(&mut self, reference: &str) -> Result<BaggageBelt, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resolver::resolve_belt_sqlite(conn, reference),
            BackendConnection::Mysql(conn) => queries::resolver::resolve_belt_mysql(conn, reference),
        }
    }

    /// Resolves a terminal with the same tiered strategy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no tier matches.
    pub fn resolve_terminal(&mut self, reference: &str) -> Result<Terminal, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resolver::resolve_terminal_sqlite(conn, reference),
            BackendConnection::Mysql(conn) => queries::resolver::resolve_terminal_mysql(conn, reference),
        }
    }

    /// Resolves an airport by IATA code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no airport carries the code.
    pub fn resolve_airport(&mut self, iata_code: &str) -> Result<Airport, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resolver::resolve_airport_sqlite(conn, iata_code),
            BackendConnection::Mysql(conn) => queries::resolver::resolve_airport_mysql(conn, iata_code),
        }
    }

    /// Retrieves a flight status by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the status does not exist.
    pub fn get_status(&mut self, status_id: i64) -> Result<FlightStatus, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resources::get_status_sqlite(conn, status_id),
            BackendConnection::Mysql(conn) => queries::resources::get_status_mysql(conn, status_id),
        }
    }

    /// Retrieves a gate by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the gate does not exist.
    pub fn get_gate(&mut self, gate_id: i64) -> Result<Gate, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resources::get_gate_sqlite(conn, gate_id),
            BackendConnection::Mysql(conn) => queries::resources::get_gate_mysql(conn, gate_id),
        }
    }

    /// Retrieves a baggage belt by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the belt does not exist.
    pub fn get_belt(&mut self, belt_id: i64) -> Result<BaggageBelt, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::resources::get_belt_sqlite(conn, belt_id),
            BackendConnection::Mysql(conn) => queries::resources::get_belt_mysql(conn, belt_id),
        }
    }

    // ========================================================================
    // Flight Record Store
    // ========================================================================

    /// Retrieves a flight by ID, including soft-deleted records.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row exists for the ID.
    pub fn get_flight(&mut self, flight_id: i64) -> Result<Flight, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::flights::get_flight_sqlite(conn, flight_id),
            BackendConnection::Mysql(conn) => queries::flights::get_flight_mysql(conn, flight_id),
        }
    }

    /// Loads a live flight together with its resolved status, gate,
    /// and belt.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the flight does not exist or is deleted.
    pub fn load_flight_state(&mut self, flight_id: i64) -> Result<FlightState, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::flights::load_flight_state_sqlite(conn, flight_id),
            BackendConnection::Mysql(conn) => queries::flights::load_flight_state_mysql(conn, flight_id),
        }
    }

    /// Finds a live flight by external reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn find_by_external_ref(
        &mut self,
        external_ref: &str,
    ) -> Result<Option<Flight>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::flights::find_by_external_ref_sqlite(conn, external_ref)
            }
            BackendConnection::Mysql(conn) => {
                queries::flights::find_by_external_ref_mysql(conn, external_ref)
            }
        }
    }

    /// Finds a live flight by number and exact scheduled departure.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn find_by_number_and_departure(
        &mut self,
        flight_number: &str,
        scheduled_departure: &str,
    ) -> Result<Option<Flight>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::flights::find_by_number_and_departure_sqlite(
                conn,
                flight_number,
                scheduled_departure,
            ),
            BackendConnection::Mysql(conn) => queries::flights::find_by_number_and_departure_mysql(
                conn,
                flight_number,
                scheduled_departure,
            ),
        }
    }

    /// Resolves a live flight by bare flight number, rejecting
    /// ambiguous matches.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for zero matches and `AmbiguousFlightNumber`
    /// for more than one.
    pub fn resolve_unique_by_number(
        &mut self,
        flight_number: &str,
    ) -> Result<Flight, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::flights::resolve_unique_by_number_sqlite(conn, flight_number)
            }
            BackendConnection::Mysql(conn) => {
                queries::flights::resolve_unique_by_number_mysql(conn, flight_number)
            }
        }
    }

    /// Lists flights matching a filter, ordered by scheduled departure.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_flights(&mut self, filter: &FlightFilter) -> Result<Vec<Flight>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::flights::list_flights_sqlite(conn, filter),
            BackendConnection::Mysql(conn) => queries::flights::list_flights_mysql(conn, filter),
        }
    }

    // ========================================================================
    // Event Log
    // ========================================================================

    /// Appends one immutable event to a flight's log.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_event(
        &mut self,
        flight_id: i64,
        draft: &EventDraft,
        created_at: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::events::append_event_sqlite(conn, flight_id, draft, created_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::events::append_event_mysql(conn, flight_id, draft, created_at)
            }
        }
    }

    /// Retrieves a flight's full event timeline, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_events(&mut self, flight_id: i64) -> Result<Vec<FlightEvent>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::events::list_events_sqlite(conn, flight_id),
            BackendConnection::Mysql(conn) => queries::events::list_events_mysql(conn, flight_id),
        }
    }

    /// Counts the events recorded for a flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_events(&mut self, flight_id: i64) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::events::count_events_sqlite(conn, flight_id),
            BackendConnection::Mysql(conn) => queries::events::count_events_mysql(conn, flight_id),
        }
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// Persists a creation plan atomically and returns the new flight
    /// ID.
    ///
    /// # Errors
    ///
    /// Returns an error if any part fails; nothing is persisted then.
    pub fn persist_creation(&mut self, plan: &CreationPlan) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::sync::persist_creation_sqlite(conn, plan),
            BackendConnection::Mysql(conn) => mutations::sync::persist_creation_mysql(conn, plan),
        }
    }

    /// Persists a sync plan atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any part fails; the transaction rolls back.
    pub fn persist_plan(&mut self, plan: &SyncPlan) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::sync::persist_plan_sqlite(conn, plan),
            BackendConnection::Mysql(conn) => mutations::sync::persist_plan_mysql(conn, plan),
        }
    }

    /// Soft-deletes a flight, refusing while dependent records exist.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for missing or already-deleted flights and
    /// `FlightReferenced` while events or connections reference it.
    pub fn soft_delete_flight(&mut self, flight_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::sync::soft_delete_flight_sqlite(conn, flight_id),
            BackendConnection::Mysql(conn) => mutations::sync::soft_delete_flight_mysql(conn, flight_id),
        }
    }

    /// Sets a gate's operational status, logging against each assigned
    /// flight. Returns the number of flights notified.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the gate does not exist.
    pub fn set_gate_status(
        &mut self,
        gate_id: i64,
        new_status: GateStatus,
    ) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::sync::set_gate_status_sqlite(conn, gate_id, new_status)
            }
            BackendConnection::Mysql(conn) => {
                mutations::sync::set_gate_status_mysql(conn, gate_id, new_status)
            }
        }
    }

    /// Sets a belt's operational status, logging against each assigned
    /// flight. Returns the number of flights notified.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the belt does not exist.
    pub fn set_belt_status(
        &mut self,
        belt_id: i64,
        new_status: BeltStatus,
    ) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::sync::set_belt_status_sqlite(conn, belt_id, new_status)
            }
            BackendConnection::Mysql(conn) => {
                mutations::sync::set_belt_status_mysql(conn, belt_id, new_status)
            }
        }
    }

    // ========================================================================
    // Schedule Reads
    // ========================================================================

    /// Returns per-flight connection counts for a set of flights.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn connection_counts(
        &mut self,
        flight_ids: &[i64],
    ) -> Result<BTreeMap<i64, ConnectionCounts>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::classify::connection_counts_sqlite(conn, flight_ids)
            }
            BackendConnection::Mysql(conn) => {
                queries::classify::connection_counts_mysql(conn, flight_ids)
            }
        }
    }

    /// Determines whether a gate is occupied inside a departure
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn gate_occupancy(
        &mut self,
        gate_id: i64,
        window_start: &str,
        window_end: &str,
    ) -> Result<bool, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::classify::gate_occupancy_sqlite(conn, gate_id, window_start, window_end)
            }
            BackendConnection::Mysql(conn) => {
                queries::classify::gate_occupancy_mysql(conn, gate_id, window_start, window_end)
            }
        }
    }

    /// Records a connection between an arriving and a departing
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns an error if either flight does not exist.
    pub fn add_connection(
        &mut self,
        arrival_flight_id: i64,
        departure_flight_id: i64,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::flights::add_connection_sqlite(conn, arrival_flight_id, departure_flight_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::flights::add_connection_mysql(conn, arrival_flight_id, departure_flight_id)
            }
        }
    }

    // ========================================================================
    // Resource Maintenance
    // ========================================================================

    /// Creates an airport.
    ///
    /// # Errors
    ///
    /// Returns an error if the IATA code already exists.
    pub fn create_airport(
        &mut self,
        iata_code: &str,
        name: &str,
        city: Option<&str>,
        country: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::create_airport_sqlite(conn, iata_code, name, city, country)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::create_airport_mysql(conn, iata_code, name, city, country)
            }
        }
    }

    /// Creates a terminal under an airport.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the airport does not exist.
    pub fn create_terminal(
        &mut self,
        airport_id: i64,
        terminal_code: &str,
        name: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::create_terminal_sqlite(conn, airport_id, terminal_code, name)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::create_terminal_mysql(conn, airport_id, terminal_code, name)
            }
        }
    }

    /// Deletes a terminal that owns no gates or belts.
    ///
    /// # Errors
    ///
    /// Returns `TerminalOccupied` while dependent resources exist.
    pub fn delete_terminal(&mut self, terminal_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::delete_terminal_sqlite(conn, terminal_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::delete_terminal_mysql(conn, terminal_id)
            }
        }
    }

    /// Creates a gate under a terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate code already exists in the
    /// terminal.
    pub fn create_gate(&mut self, terminal_id: i64, gate_code: &str) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::create_gate_sqlite(conn, terminal_id, gate_code)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::create_gate_mysql(conn, terminal_id, gate_code)
            }
        }
    }

    /// Renames a gate, regenerating its canonical code. Returns the
    /// new canonical code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the gate does not exist.
    pub fn rename_gate(
        &mut self,
        gate_id: i64,
        new_gate_code: &str,
    ) -> Result<String, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::rename_gate_sqlite(conn, gate_id, new_gate_code)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::rename_gate_mysql(conn, gate_id, new_gate_code)
            }
        }
    }

    /// Creates a baggage belt under a terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the belt code already exists in the
    /// terminal.
    pub fn create_belt(&mut self, terminal_id: i64, belt_code: &str) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::create_belt_sqlite(conn, terminal_id, belt_code)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::create_belt_mysql(conn, terminal_id, belt_code)
            }
        }
    }

    /// Renames a baggage belt, regenerating its canonical code.
    /// Returns the new canonical code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the belt does not exist.
    pub fn rename_belt(
        &mut self,
        belt_id: i64,
        new_belt_code: &str,
    ) -> Result<String, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::rename_belt_sqlite(conn, belt_id, new_belt_code)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::rename_belt_mysql(conn, belt_id, new_belt_code)
            }
        }
    }

    /// Looks up an airline by code, creating it on first sight.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried or written.
    pub fn ensure_airline(
        &mut self,
        airline_code: &str,
        airline_name: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::ensure_airline_sqlite(conn, airline_code, airline_name)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::ensure_airline_mysql(conn, airline_code, airline_name)
            }
        }
    }

    /// Authorizes an airline to use a gate.
    ///
    /// # Errors
    ///
    /// Returns an error if either side does not exist.
    pub fn authorize_airline_for_gate(
        &mut self,
        gate_id: i64,
        airline_id: i64,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::authorize_airline_for_gate_sqlite(conn, gate_id, airline_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::authorize_airline_for_gate_mysql(conn, gate_id, airline_id)
            }
        }
    }

    /// Prohibits an aircraft type from a gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate does not exist.
    pub fn restrict_gate_aircraft(
        &mut self,
        gate_id: i64,
        aircraft_type: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resources::restrict_gate_aircraft_sqlite(conn, gate_id, aircraft_type)
            }
            BackendConnection::Mysql(conn) => {
                mutations::resources::restrict_gate_aircraft_mysql(conn, gate_id, aircraft_type)
            }
        }
    }

    /// Checks whether an airline may be assigned to a gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn gate_allows_airline(
        &mut self,
        gate_id: i64,
        airline_code: &str,
    ) -> Result<bool, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::resources::gate_allows_airline_sqlite(conn, gate_id, airline_code)
            }
            BackendConnection::Mysql(conn) => {
                queries::resources::gate_allows_airline_mysql(conn, gate_id, airline_code)
            }
        }
    }

    /// Checks whether an aircraft type may use a gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn gate_allows_aircraft(
        &mut self,
        gate_id: i64,
        aircraft_type: &str,
    ) -> Result<bool, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::resources::gate_allows_aircraft_sqlite(conn, gate_id, aircraft_type)
            }
            BackendConnection::Mysql(conn) => {
                queries::resources::gate_allows_aircraft_mysql(conn, gate_id, aircraft_type)
            }
        }
    }
}
