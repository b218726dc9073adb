// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Most persistence code is backend-agnostic Diesel DSL; this module
//! isolates the pieces that cannot be: connection initialization,
//! migration execution, and small backend workarounds such as reading
//! the last inserted row ID.
//!
//! - `sqlite` — default backend for development and standard tests
//! - `mysql` — MySQL/MariaDB backend, validated via opt-in tests run
//!   through `cargo xtask test-mariadb`

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Backend-specific operations that have no backend-agnostic Diesel DSL.
///
/// Implemented for both `SqliteConnection` and `MysqlConnection` so
/// query and mutation bodies can stay identical across backends.
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    ///
    /// Diesel's `RETURNING` support varies across backends, and inserts
    /// into autoincrement tables need the assigned ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check; without it the database cannot
    /// guarantee the referential integrity the schema relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
