// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Procedure and user catalog queries.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;
use plan_staffing_domain::{Procedure, ProcedureId, User, UserId};

use crate::data_models::{ProcedureRow, UserRow};
use crate::diesel_schema::{procedures, users};
use crate::error::PersistenceError;

/// Returns whether a procedure with this ID exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn procedure_exists(
    conn: &mut SqliteConnection,
    procedure_id: ProcedureId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(exists(
        procedures::table.filter(procedures::procedure_id.eq(procedure_id.value())),
    ))
    .get_result(conn)?)
}

/// Returns whether a user with this ID exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn user_exists(conn: &mut SqliteConnection, user_id: UserId) -> Result<bool, PersistenceError> {
    Ok(
        diesel::select(exists(users::table.filter(users::user_id.eq(user_id.value()))))
            .get_result(conn)?,
    )
}

/// Lists every procedure ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_procedures(conn: &mut SqliteConnection) -> Result<Vec<Procedure>, PersistenceError> {
    let rows: Vec<ProcedureRow> = procedures::table
        .order(procedures::procedure_id.asc())
        .select(ProcedureRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Procedure::from).collect())
}

/// Lists every user ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(User::from).collect())
}
