// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User assignment queries and the plan details read model.

use diesel::prelude::*;
use diesel::SqliteConnection;
use plan_staffing_domain::{
    PlanDetails, PlanId, PlanProcedureDetails, PlanProcedureUser, Procedure, ProcedureId, User,
    UserId,
};
use tracing::debug;

use crate::data_models::{PlanProcedureUserRow, ProcedureRow, UserRow};
use crate::diesel_schema::{plan_procedure_users, plan_procedures, procedures, users};
use crate::error::PersistenceError;

fn into_domain(rows: Vec<PlanProcedureUserRow>) -> Result<Vec<PlanProcedureUser>, PersistenceError> {
    rows.into_iter().map(PlanProcedureUserRow::into_domain).collect()
}

/// Finds a single assignment by its composite key.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_plan_procedure_user(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    user_id: UserId,
) -> Result<Option<PlanProcedureUser>, PersistenceError> {
    plan_procedure_users::table
        .filter(plan_procedure_users::plan_id.eq(plan_id.value()))
        .filter(plan_procedure_users::procedure_id.eq(procedure_id.value()))
        .filter(plan_procedure_users::user_id.eq(user_id.value()))
        .select(PlanProcedureUserRow::as_select())
        .first(conn)
        .optional()?
        .map(PlanProcedureUserRow::into_domain)
        .transpose()
}

/// Lists the assignments of one `(plan, procedure)` pair ordered by user ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_plan_procedure_users(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
    procedure_id: ProcedureId,
) -> Result<Vec<PlanProcedureUser>, PersistenceError> {
    let rows: Vec<PlanProcedureUserRow> = plan_procedure_users::table
        .filter(plan_procedure_users::plan_id.eq(plan_id.value()))
        .filter(plan_procedure_users::procedure_id.eq(procedure_id.value()))
        .order(plan_procedure_users::user_id.asc())
        .select(PlanProcedureUserRow::as_select())
        .load(conn)?;

    into_domain(rows)
}

/// Lists every assignment within a plan, across all its procedures.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_plan_users(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
) -> Result<Vec<PlanProcedureUser>, PersistenceError> {
    let rows: Vec<PlanProcedureUserRow> = plan_procedure_users::table
        .filter(plan_procedure_users::plan_id.eq(plan_id.value()))
        .order((
            plan_procedure_users::procedure_id.asc(),
            plan_procedure_users::user_id.asc(),
        ))
        .select(PlanProcedureUserRow::as_select())
        .load(conn)?;

    into_domain(rows)
}

/// Lists assignments, optionally restricted to one plan.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    plan_id: Option<PlanId>,
) -> Result<Vec<PlanProcedureUser>, PersistenceError> {
    let Some(plan_id) = plan_id else {
        let rows: Vec<PlanProcedureUserRow> = plan_procedure_users::table
            .order((
                plan_procedure_users::plan_id.asc(),
                plan_procedure_users::procedure_id.asc(),
                plan_procedure_users::user_id.asc(),
            ))
            .select(PlanProcedureUserRow::as_select())
            .load(conn)?;
        return into_domain(rows);
    };

    list_plan_users(conn, plan_id)
}

/// Builds the details view of a plan: each procedure with its title and the
/// users assigned to it with their names.
///
/// The caller is responsible for checking that the plan exists; a missing
/// plan yields an empty procedure list.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn get_plan_details(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
) -> Result<PlanDetails, PersistenceError> {
    debug!(%plan_id, "Loading plan details");

    let procedure_rows: Vec<ProcedureRow> = plan_procedures::table
        .inner_join(procedures::table)
        .filter(plan_procedures::plan_id.eq(plan_id.value()))
        .order(procedures::procedure_id.asc())
        .select(ProcedureRow::as_select())
        .load(conn)?;

    let user_rows: Vec<(i64, UserRow)> = plan_procedure_users::table
        .inner_join(users::table)
        .filter(plan_procedure_users::plan_id.eq(plan_id.value()))
        .order((
            plan_procedure_users::procedure_id.asc(),
            users::user_id.asc(),
        ))
        .select((plan_procedure_users::procedure_id, UserRow::as_select()))
        .load(conn)?;

    let procedures: Vec<PlanProcedureDetails> = procedure_rows
        .into_iter()
        .map(|row| {
            let procedure: Procedure = Procedure::from(row);
            let assigned_users: Vec<User> = user_rows
                .iter()
                .filter(|(procedure_id, _)| *procedure_id == procedure.procedure_id.value())
                .map(|(_, user)| User {
                    user_id: UserId::new(user.user_id),
                    name: user.name.clone(),
                })
                .collect();
            PlanProcedureDetails {
                procedure,
                assigned_users,
            }
        })
        .collect();

    Ok(PlanDetails {
        plan_id,
        procedures,
    })
}
