// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional application of staged plan mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use plan_staffing::{ChangeSet, Mutation};
use plan_staffing_domain::{PlanProcedure, PlanProcedureUser};
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::{PlanProcedureRow, PlanProcedureUserRow};
use crate::diesel_schema::{plan_procedure_users, plan_procedures};
use crate::error::PersistenceError;

/// Applies every mutation of a change set inside one transaction.
///
/// Mutations run in staging order. If any of them fails, including a
/// removal that matches no row, the transaction is rolled back and
/// nothing is applied.
///
/// # Errors
///
/// * `ConstraintViolation` if an insert collides with an existing key or
///   references a missing row
/// * `ConcurrencyConflict` if a removal matches no row
/// * `DatabaseError` for any other database failure
pub fn apply_change_set(
    conn: &mut SqliteConnection,
    changes: ChangeSet,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        for mutation in changes {
            apply_mutation(conn, mutation, now)?;
        }
        Ok(())
    })
}

fn apply_mutation(
    conn: &mut SqliteConnection,
    mutation: Mutation,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    match mutation {
        Mutation::AddPlanProcedure(link) => {
            debug!(plan_id = %link.plan_id, procedure_id = %link.procedure_id, "Inserting plan procedure");
            diesel::insert_into(plan_procedures::table)
                .values(PlanProcedureRow::from_domain(link, now)?)
                .execute(conn)?;
        }
        Mutation::RemovePlanProcedure(link) => {
            debug!(plan_id = %link.plan_id, procedure_id = %link.procedure_id, "Deleting plan procedure");
            let deleted: usize = diesel::delete(
                plan_procedures::table
                    .filter(plan_procedures::plan_id.eq(link.plan_id.value()))
                    .filter(plan_procedures::procedure_id.eq(link.procedure_id.value())),
            )
            .execute(conn)?;
            expect_one_row(deleted, || describe_link(link))?;
        }
        Mutation::AddPlanProcedureUser(assignment) => {
            debug!(
                plan_id = %assignment.plan_id,
                procedure_id = %assignment.procedure_id,
                user_id = %assignment.user_id,
                "Inserting plan procedure user"
            );
            diesel::insert_into(plan_procedure_users::table)
                .values(PlanProcedureUserRow::from_domain(&assignment)?)
                .execute(conn)?;
        }
        Mutation::RemovePlanProcedureUser(assignment) => {
            debug!(
                plan_id = %assignment.plan_id,
                procedure_id = %assignment.procedure_id,
                user_id = %assignment.user_id,
                "Deleting plan procedure user"
            );
            let deleted: usize = diesel::delete(
                plan_procedure_users::table
                    .filter(plan_procedure_users::plan_id.eq(assignment.plan_id.value()))
                    .filter(plan_procedure_users::procedure_id.eq(assignment.procedure_id.value()))
                    .filter(plan_procedure_users::user_id.eq(assignment.user_id.value())),
            )
            .execute(conn)?;
            expect_one_row(deleted, || describe_assignment(&assignment))?;
        }
    }
    Ok(())
}

fn expect_one_row<F>(affected: usize, describe: F) -> Result<(), PersistenceError>
where
    F: FnOnce() -> String,
{
    if affected == 1 {
        return Ok(());
    }
    Err(PersistenceError::ConcurrencyConflict(format!(
        "expected to remove {}, but {affected} rows matched",
        describe()
    )))
}

fn describe_link(link: PlanProcedure) -> String {
    format!(
        "plan procedure ({}, {})",
        link.plan_id, link.procedure_id
    )
}

fn describe_assignment(assignment: &PlanProcedureUser) -> String {
    format!(
        "plan procedure user ({}, {}, {})",
        assignment.plan_id, assignment.procedure_id, assignment.user_id
    )
}
