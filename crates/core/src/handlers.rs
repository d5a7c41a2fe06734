// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command handlers for plan procedure assignments.
//!
//! Each handler is a short, deterministic sequence of reads against a
//! `PlanStore`, followed by at most one `commit`. Store errors are wrapped
//! into `CommandError::Infrastructure` at this boundary and never escape
//! unwrapped. The cancellation token is checked before every store call;
//! once it fires the handler returns `CommandError::Cancelled` without
//! committing.

use plan_staffing_domain::{
    Plan, PlanAggregate, PlanId, PlanProcedure, PlanProcedureUser, ProcedureId, UserId,
    validate_plan_procedure, validate_plan_procedure_user,
};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::error::{CommandError, CommandResult};
use crate::store::{ChangeSet, PlanStore};

/// Dispatches a command to its handler.
///
/// # Errors
///
/// Returns the handler's `CommandError` unchanged.
pub fn execute<S: PlanStore>(
    store: &mut S,
    command: Command,
    cancel: &CancellationToken,
) -> CommandResult {
    debug!(command = command.name(), plan_id = %command.plan_id(), "Executing command");

    match command {
        Command::AssignUser {
            plan_id,
            procedure_id,
            user_id,
        } => assign_user(store, plan_id, procedure_id, user_id, cancel),
        Command::UnassignUser {
            plan_id,
            procedure_id,
            user_id,
        } => unassign_user(store, plan_id, procedure_id, user_id, cancel),
        Command::ClearUsers {
            plan_id,
            procedure_id,
        } => clear_users(store, plan_id, procedure_id, cancel),
        Command::RemoveProcedure {
            plan_id,
            procedure_id,
        } => remove_procedure(store, plan_id, procedure_id, cancel),
        Command::AddProcedureToPlan {
            plan_id,
            procedure_id,
        } => add_procedure_to_plan(store, plan_id, procedure_id, cancel),
    }
}

/// Assigns a user to a procedure within a plan.
///
/// Assignment is idempotent: if the user is already assigned the call
/// succeeds without writing.
///
/// # Errors
///
/// * `BadRequest` if any identifier is not positive
/// * `NotFound` if the plan is missing, the procedure is not in the plan,
///   or the user is not in the catalog
/// * `Infrastructure` if the store fails
/// * `Cancelled` if the token fires before commit
pub fn assign_user<S: PlanStore>(
    store: &mut S,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    user_id: UserId,
    cancel: &CancellationToken,
) -> CommandResult {
    validate_plan_procedure_user(plan_id, procedure_id, user_id)?;

    ensure_not_cancelled(cancel)?;
    let plan: PlanAggregate = store
        .load_plan(plan_id)
        .map_err(|e| CommandError::infrastructure("load plan", e))?
        .ok_or_else(|| CommandError::NotFound(format!("PlanId: {plan_id} not found")))?;

    let Some(links) = plan.procedure(procedure_id) else {
        return Err(CommandError::NotFound(format!(
            "ProcedureId: {procedure_id} not added to PlanId: {plan_id}"
        )));
    };

    if links.has_user(user_id) {
        debug!(%plan_id, %procedure_id, %user_id, "User already assigned");
        return Ok(());
    }

    ensure_not_cancelled(cancel)?;
    let user_exists: bool = store
        .user_exists(user_id)
        .map_err(|e| CommandError::infrastructure("look up user", e))?;
    if !user_exists {
        return Err(CommandError::NotFound(format!(
            "UserId: {user_id} not found"
        )));
    }

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut changes: ChangeSet = ChangeSet::new();
    changes.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        user_id,
        now,
    ));

    commit(store, changes, cancel)?;

    info!(%plan_id, %procedure_id, %user_id, "Assigned user to plan procedure");
    Ok(())
}

/// Removes one user assignment.
///
/// The plan and procedure are not checked separately: a missing
/// assignment row is reported the same way regardless of cause.
///
/// # Errors
///
/// * `NotFound` if the user is not assigned to the pair
/// * `Infrastructure` if the store fails
/// * `Cancelled` if the token fires before commit
pub fn unassign_user<S: PlanStore>(
    store: &mut S,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    user_id: UserId,
    cancel: &CancellationToken,
) -> CommandResult {
    ensure_not_cancelled(cancel)?;
    let assignment: PlanProcedureUser = store
        .find_plan_procedure_user(plan_id, procedure_id, user_id)
        .map_err(|e| CommandError::infrastructure("look up assignment", e))?
        .ok_or_else(|| {
            CommandError::NotFound(format!(
                "UserId: {user_id} not assigned yet to ProcedureId: {procedure_id} in the PlanId:{plan_id}"
            ))
        })?;

    let mut changes: ChangeSet = ChangeSet::new();
    changes.remove_plan_procedure_user(assignment);

    commit(store, changes, cancel)?;

    info!(%plan_id, %procedure_id, %user_id, "Unassigned user from plan procedure");
    Ok(())
}

/// Removes every user assigned to one `(plan, procedure)` pair.
///
/// # Errors
///
/// * `NotFound` if the pair has no assigned users, including when the
///   procedure is not part of the plan at all
/// * `Infrastructure` if the store fails
/// * `Cancelled` if the token fires before commit
pub fn clear_users<S: PlanStore>(
    store: &mut S,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    cancel: &CancellationToken,
) -> CommandResult {
    ensure_not_cancelled(cancel)?;
    let assignments: Vec<PlanProcedureUser> = store
        .list_plan_procedure_users(plan_id, procedure_id)
        .map_err(|e| CommandError::infrastructure("list assignments", e))?;

    if assignments.is_empty() {
        return Err(CommandError::NotFound(format!(
            "ProcedureId: {procedure_id} not added to PlanId: {plan_id}"
        )));
    }

    let removed: usize = assignments.len();
    let mut changes: ChangeSet = ChangeSet::new();
    changes.remove_plan_procedure_users(assignments);

    commit(store, changes, cancel)?;

    info!(%plan_id, %procedure_id, removed, "Cleared users from plan procedure");
    Ok(())
}

/// Removes a procedure from a plan, together with all its user assignments,
/// in a single commit.
///
/// # Errors
///
/// * `NotFound` if the procedure is not part of the plan
/// * `Infrastructure` if the store fails
/// * `Cancelled` if the token fires before commit
pub fn remove_procedure<S: PlanStore>(
    store: &mut S,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    cancel: &CancellationToken,
) -> CommandResult {
    ensure_not_cancelled(cancel)?;
    // The message names only the plan even though the key is the pair.
    let link: PlanProcedure = store
        .find_plan_procedure(plan_id, procedure_id)
        .map_err(|e| CommandError::infrastructure("look up plan procedure", e))?
        .ok_or_else(|| CommandError::NotFound(format!("PlanId: {plan_id} not found")))?;

    ensure_not_cancelled(cancel)?;
    let assignments: Vec<PlanProcedureUser> = store
        .list_plan_procedure_users(plan_id, procedure_id)
        .map_err(|e| CommandError::infrastructure("list assignments", e))?;

    let removed_users: usize = assignments.len();
    let mut changes: ChangeSet = ChangeSet::new();
    changes.remove_plan_procedure_users(assignments);
    changes.remove_plan_procedure(link);

    commit(store, changes, cancel)?;

    info!(%plan_id, %procedure_id, removed_users, "Removed procedure from plan");
    Ok(())
}

/// Includes a catalog procedure in a plan.
///
/// Adding a procedure that is already part of the plan succeeds without writing.
///
/// # Errors
///
/// * `BadRequest` if either identifier is not positive
/// * `NotFound` if the plan or the procedure does not exist
/// * `Infrastructure` if the store fails
/// * `Cancelled` if the token fires before commit
pub fn add_procedure_to_plan<S: PlanStore>(
    store: &mut S,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    cancel: &CancellationToken,
) -> CommandResult {
    validate_plan_procedure(plan_id, procedure_id)?;

    ensure_not_cancelled(cancel)?;
    let plan: PlanAggregate = store
        .load_plan(plan_id)
        .map_err(|e| CommandError::infrastructure("load plan", e))?
        .ok_or_else(|| CommandError::NotFound(format!("PlanId: {plan_id} not found")))?;

    if plan.procedure(procedure_id).is_some() {
        debug!(%plan_id, %procedure_id, "Procedure already in plan");
        return Ok(());
    }

    ensure_not_cancelled(cancel)?;
    let procedure_exists: bool = store
        .procedure_exists(procedure_id)
        .map_err(|e| CommandError::infrastructure("look up procedure", e))?;
    if !procedure_exists {
        return Err(CommandError::NotFound(format!(
            "ProcedureId: {procedure_id} not found"
        )));
    }

    let mut changes: ChangeSet = ChangeSet::new();
    changes.add_plan_procedure(PlanProcedure::new(plan_id, procedure_id));

    commit(store, changes, cancel)?;

    info!(%plan_id, %procedure_id, "Added procedure to plan");
    Ok(())
}

/// Creates a new, empty plan.
///
/// # Errors
///
/// * `Infrastructure` if the store fails
/// * `Cancelled` if the token has already fired
pub fn create_plan<S: PlanStore>(store: &mut S, cancel: &CancellationToken) -> CommandResult<Plan> {
    ensure_not_cancelled(cancel)?;
    let plan: Plan = store
        .create_plan(OffsetDateTime::now_utc())
        .map_err(|e| CommandError::infrastructure("create plan", e))?;

    info!(plan_id = %plan.plan_id, "Created plan");
    Ok(plan)
}

fn commit<S: PlanStore>(
    store: &mut S,
    changes: ChangeSet,
    cancel: &CancellationToken,
) -> CommandResult {
    ensure_not_cancelled(cancel)?;
    let staged: usize = changes.len();
    store
        .commit(changes)
        .map_err(|e| CommandError::infrastructure("commit changes", e))?;
    debug!(staged, "Committed changes");
    Ok(())
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> CommandResult {
    if cancel.is_cancelled() {
        warn!("Command cancelled before completion");
        return Err(CommandError::Cancelled);
    }
    Ok(())
}
