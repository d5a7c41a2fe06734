// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use plan_staffing_domain::{Plan, PlanId, PlanProcedure, ProcedureId};
use tracing::debug;

use crate::data_models::{PlanProcedureRow, PlanRow};
use crate::diesel_schema::{plan_procedures, plans};
use crate::error::PersistenceError;

/// Retrieves a plan by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
/// Returns `Ok(None)` if the plan does not exist.
pub fn find_plan(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
) -> Result<Option<Plan>, PersistenceError> {
    debug!(%plan_id, "Looking up plan");

    plans::table
        .filter(plans::plan_id.eq(plan_id.value()))
        .select(PlanRow::as_select())
        .first(conn)
        .optional()?
        .map(PlanRow::into_domain)
        .transpose()
}

/// Finds a `(plan, procedure)` link by its composite key.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_plan_procedure(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
    procedure_id: ProcedureId,
) -> Result<Option<PlanProcedure>, PersistenceError> {
    let row: Option<PlanProcedureRow> = plan_procedures::table
        .filter(plan_procedures::plan_id.eq(plan_id.value()))
        .filter(plan_procedures::procedure_id.eq(procedure_id.value()))
        .select(PlanProcedureRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.as_ref().map(PlanProcedureRow::to_domain))
}

/// Lists the procedure links of a plan ordered by procedure ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_plan_procedures(
    conn: &mut SqliteConnection,
    plan_id: PlanId,
) -> Result<Vec<PlanProcedure>, PersistenceError> {
    let rows: Vec<PlanProcedureRow> = plan_procedures::table
        .filter(plan_procedures::plan_id.eq(plan_id.value()))
        .order(plan_procedures::procedure_id.asc())
        .select(PlanProcedureRow::as_select())
        .load(conn)?;

    Ok(rows.iter().map(PlanProcedureRow::to_domain).collect())
}
