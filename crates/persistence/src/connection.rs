// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and configuring `SQLite` connections.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";
const ENABLE_WAL: &str = "PRAGMA journal_mode = WAL";
const BUSY_TIMEOUT: &str = "PRAGMA busy_timeout = 5000";

/// Where the database lives.
#[derive(Debug, Clone, Copy)]
pub enum DatabaseLocation<'a> {
    /// A named shared-cache in-memory database, discarded with its last connection.
    Memory(&'a str),
    /// A database file.
    File(&'a str),
}

impl DatabaseLocation<'_> {
    fn url(self) -> String {
        match self {
            Self::Memory(name) => format!("file:{name}?mode=memory&cache=shared"),
            Self::File(path) => path.to_string(),
        }
    }

    const fn pragmas(self) -> &'static [&'static str] {
        match self {
            Self::Memory(_) => &[ENABLE_FOREIGN_KEYS],
            Self::File(_) => &[ENABLE_FOREIGN_KEYS, ENABLE_WAL, BUSY_TIMEOUT],
        }
    }
}

// Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, applies the location's PRAGMAs, migrates the schema
/// and checks that cascading deletes will be enforced.
///
/// # Errors
///
/// Returns `DatabaseConnectionFailed`, `QueryFailed`, `MigrationFailed` or
/// `ForeignKeyEnforcementNotEnabled` for the step that failed.
pub fn open(location: DatabaseLocation<'_>) -> Result<SqliteConnection, PersistenceError> {
    let url: String = location.url();
    info!(database_url = %url, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(&url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    for pragma in location.pragmas() {
        diesel::sql_query(*pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(applied = applied.len(), "Schema migrations applied");

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}

/// Checks that `PRAGMA foreign_keys` is on for this connection.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` if it is off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;

    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("Foreign key enforcement is on");
    Ok(())
}
