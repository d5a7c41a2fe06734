// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Plan Staffing Service.
//!
//! This crate stores plans, the procedure and user catalogs, and the
//! plan/procedure/user associations in `SQLite` through Diesel. It
//! implements the `PlanStore` seam consumed by the command handlers.
//!
//! ## Backend
//!
//! `SQLite` is the only backend. It is linked statically (bundled) so no
//! system library is needed. In-memory databases are used for tests and
//! for servers started without a database path; file databases run in WAL
//! mode.
//!
//! ## Schema
//!
//! Migrations are embedded at compile time and applied when the adapter is
//! constructed. Foreign key enforcement is switched on and verified at
//! start-up; removing a plan procedure cascades to its user assignments.
//!
//! ## Lifecycle
//!
//! `Persistence::close` releases the connection. Any later call fails with
//! `PersistenceError::ConnectionClosed` instead of panicking.

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

use diesel::SqliteConnection;
use plan_staffing_domain::{PlanDetails, PlanId, PlanProcedureUser, Procedure, User};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{debug, info};

mod connection;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use connection::DatabaseLocation;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives its own database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Procedure titles loaded by `seed_demo_catalog`.
const DEMO_PROCEDURES: [&str; 4] = [
    "Ankle Fracture Repair",
    "Knee Arthroscopy",
    "Rotator Cuff Repair",
    "Carpal Tunnel Release",
];

/// User names loaded by `seed_demo_catalog`.
const DEMO_USERS: [&str; 3] = ["Nick Morrison", "Bailey Hudson", "Avery Park"];

/// The connection held by the adapter.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    /// The connection has been released by `Persistence::close`.
    Closed,
}

/// Persistence adapter for plans, catalogs and assignments.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so instances are
    /// isolated from each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_plan_staffing_{db_id}");
        let conn: SqliteConnection = connection::open(DatabaseLocation::Memory(&db_name))?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = connection::open(DatabaseLocation::File(path_str))?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Releases the database connection.
    ///
    /// Closing twice is a no-op. An in-memory database is discarded.
    pub fn close(&mut self) {
        if matches!(self.conn, BackendConnection::Sqlite(_)) {
            info!("Closing database connection");
        }
        self.conn = BackendConnection::Closed;
    }

    /// Returns whether `close` has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.conn, BackendConnection::Closed)
    }

    /// Returns the live connection.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionClosed` after `close`.
    pub(crate) fn connection(&mut self) -> Result<&mut SqliteConnection, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => Ok(conn),
            BackendConnection::Closed => Err(PersistenceError::ConnectionClosed),
        }
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled or the
    /// connection is closed.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        connection::verify_foreign_key_enforcement(self.connection()?)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Adds a procedure to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_procedure(&mut self, title: &str) -> Result<Procedure, PersistenceError> {
        let conn = self.connection()?;
        mutations::insert_procedure(conn, title, OffsetDateTime::now_utc())
    }

    /// Adds a user to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(&mut self, name: &str) -> Result<User, PersistenceError> {
        let conn = self.connection()?;
        mutations::insert_user(conn, name, OffsetDateTime::now_utc())
    }

    /// Lists every procedure in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_procedures(&mut self) -> Result<Vec<Procedure>, PersistenceError> {
        queries::list_procedures(self.connection()?)
    }

    /// Lists every user in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::list_users(self.connection()?)
    }

    /// Loads a small demonstration catalog of procedures and users.
    ///
    /// Does nothing if the catalog already has procedures.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; in that case nothing is loaded.
    pub fn seed_demo_catalog(&mut self) -> Result<(), PersistenceError> {
        use diesel::Connection;

        let conn = self.connection()?;
        if !queries::list_procedures(conn)?.is_empty() {
            debug!("Catalog already populated, skipping demo seed");
            return Ok(());
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        conn.transaction::<_, PersistenceError, _>(|conn| {
            for title in DEMO_PROCEDURES {
                mutations::insert_procedure(conn, title, now)?;
            }
            for name in DEMO_USERS {
                mutations::insert_user(conn, name, now)?;
            }
            Ok(())
        })?;

        info!(
            procedures = DEMO_PROCEDURES.len(),
            users = DEMO_USERS.len(),
            "Seeded demo catalog"
        );
        Ok(())
    }

    // ========================================================================
    // Read models
    // ========================================================================

    /// Retrieves a plan with its procedures and their assigned users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    /// Returns `Ok(None)` if the plan does not exist.
    pub fn get_plan_details(
        &mut self,
        plan_id: PlanId,
    ) -> Result<Option<PlanDetails>, PersistenceError> {
        let conn = self.connection()?;
        if queries::find_plan(conn, plan_id)?.is_none() {
            return Ok(None);
        }
        queries::get_plan_details(conn, plan_id).map(Some)
    }

    /// Lists user assignments, optionally only those of one plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments(
        &mut self,
        plan_id: Option<PlanId>,
    ) -> Result<Vec<PlanProcedureUser>, PersistenceError> {
        queries::list_assignments(self.connection()?, plan_id)
    }
}
