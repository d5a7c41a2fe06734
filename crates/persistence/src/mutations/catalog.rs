// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use plan_staffing_domain::{Procedure, ProcedureId, User, UserId};
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::format_timestamp;
use crate::diesel_schema::{procedures, users};
use crate::error::PersistenceError;

/// Adds a procedure to the catalog.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_procedure(
    conn: &mut SqliteConnection,
    title: &str,
    now: OffsetDateTime,
) -> Result<Procedure, PersistenceError> {
    let stamp: String = format_timestamp(now)?;

    let procedure_id: i64 = diesel::insert_into(procedures::table)
        .values((
            procedures::title.eq(title),
            procedures::create_date.eq(&stamp),
            procedures::update_date.eq(&stamp),
        ))
        .returning(procedures::procedure_id)
        .get_result(conn)?;
    debug!(procedure_id, title, "Procedure created");

    Ok(Procedure {
        procedure_id: ProcedureId::new(procedure_id),
        title: title.to_string(),
    })
}

/// Adds a user to the catalog.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_user(
    conn: &mut SqliteConnection,
    name: &str,
    now: OffsetDateTime,
) -> Result<User, PersistenceError> {
    let stamp: String = format_timestamp(now)?;

    let user_id: i64 = diesel::insert_into(users::table)
        .values((
            users::name.eq(name),
            users::create_date.eq(&stamp),
            users::update_date.eq(&stamp),
        ))
        .returning(users::user_id)
        .get_result(conn)?;
    debug!(user_id, name, "User created");

    Ok(User {
        user_id: UserId::new(user_id),
        name: name.to_string(),
    })
}
