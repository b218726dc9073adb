// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MySQL/MariaDB-specific persistence utilities.
//!
//! This module exists solely to support explicit, opt-in backend
//! validation, not production runtime defaults. It is exercised by
//! tests marked `#[ignore]` which run only via `cargo xtask
//! test-mariadb`; that command starts a `MariaDB` container, sets
//! `DATABASE_URL` and `AIRFIS_TEST_BACKEND`, runs the ignored tests,
//! and removes the container.
//!
//! Migration parity: `migrations_mysql/` must stay semantically
//! identical to `migrations/` — same tables, columns, constraints,
//! foreign keys, and seed rows, in backend-appropriate syntax. Verify
//! with `cargo xtask verify-migrations` after touching either
//! directory.

use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Result type for the foreign key check query.
#[derive(QueryableByName)]
struct ForeignKeyCheck {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

/// Returns the last inserted row ID via `LAST_INSERT_ID()`.
///
/// Raw SQL is justified here: Diesel has no direct API for this.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

/// `MySQL`-specific migrations, schema-equivalent to the `SQLite` set.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

/// Initializes a `MySQL` database at the given URL and runs migrations.
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Initializing MySQL database at: {}", database_url);

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Runs pending migrations on the provided `MySQL` connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut MysqlConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running MySQL database migrations");
    conn.run_pending_migrations(MYSQL_MIGRATIONS)?;
    Ok(())
}

/// Verifies that foreign key enforcement is enabled on `MySQL`.
///
/// # Errors
///
/// Returns an error if verification fails.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    // Raw SQL is justified: Diesel has no system variable query DSL.
    let result: Result<ForeignKeyCheck, _> =
        diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks").get_result(conn);

    match result {
        Ok(check) => {
            if check.fk_checks == 1 {
                info!("MySQL foreign key enforcement is enabled");
                Ok(())
            } else {
                Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
            }
        }
        Err(e) => Err(PersistenceError::QueryFailed(format!(
            "Failed to verify foreign key enforcement: {e}"
        ))),
    }
}
