// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Write operations build a `Command`, run it through the core handlers
//! against the persistence adapter, and translate the outcome. Read
//! operations query the adapter directly.

use plan_staffing::{Command, CommandError};
use plan_staffing_domain::{IdentifierField, PlanId, validate_identifier};
use plan_staffing_persistence::Persistence;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{ApiError, translate_command_error, translate_persistence_error};
use crate::request_response::{
    AssignmentResponse, CreatePlanResponse, ListAssignmentsQuery, PlanDetailsResponse,
    PlanProcedureRequest, PlanProcedureUserRequest, ProcedureResponse, UserResponse,
    WriteResponse,
};

fn run(
    persistence: &mut Persistence,
    command: Command,
    cancel: &CancellationToken,
) -> Result<(), ApiError> {
    plan_staffing::execute(persistence, command, cancel).map_err(translate_command_error)
}

fn validate_plan_id(plan_id: i64) -> Result<PlanId, ApiError> {
    validate_identifier(IdentifierField::PlanId, plan_id)
        .map_err(|e| translate_command_error(CommandError::from(e)))?;
    Ok(PlanId::new(plan_id))
}

/// Assigns a user to a procedure within a plan.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive identifier, `ResourceNotFound`
/// if the plan, the plan procedure or the user is missing, `Cancelled` if
/// the request was abandoned, and `Internal` for persistence failures.
pub fn assign_user(
    persistence: &mut Persistence,
    request: &PlanProcedureUserRequest,
    cancel: &CancellationToken,
) -> Result<WriteResponse, ApiError> {
    run(
        persistence,
        Command::AssignUser {
            plan_id: request.plan_id(),
            procedure_id: request.procedure_id(),
            user_id: request.user_id(),
        },
        cancel,
    )?;
    Ok(WriteResponse::ok("User assigned"))
}

/// Removes a single user assignment.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the user is not assigned to the pair.
pub fn unassign_user(
    persistence: &mut Persistence,
    request: &PlanProcedureUserRequest,
    cancel: &CancellationToken,
) -> Result<WriteResponse, ApiError> {
    run(
        persistence,
        Command::UnassignUser {
            plan_id: request.plan_id(),
            procedure_id: request.procedure_id(),
            user_id: request.user_id(),
        },
        cancel,
    )?;
    Ok(WriteResponse::ok("User unassigned"))
}

/// Removes every user assigned to a `(plan, procedure)` pair.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the pair has no assigned users.
pub fn clear_users(
    persistence: &mut Persistence,
    request: &PlanProcedureRequest,
    cancel: &CancellationToken,
) -> Result<WriteResponse, ApiError> {
    run(
        persistence,
        Command::ClearUsers {
            plan_id: request.plan_id(),
            procedure_id: request.procedure_id(),
        },
        cancel,
    )?;
    Ok(WriteResponse::ok("Users cleared"))
}

/// Removes a procedure and its assignments from a plan.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the procedure is not part of the plan.
pub fn remove_procedure(
    persistence: &mut Persistence,
    request: &PlanProcedureRequest,
    cancel: &CancellationToken,
) -> Result<WriteResponse, ApiError> {
    run(
        persistence,
        Command::RemoveProcedure {
            plan_id: request.plan_id(),
            procedure_id: request.procedure_id(),
        },
        cancel,
    )?;
    Ok(WriteResponse::ok("Procedure removed"))
}

/// Includes a catalog procedure in a plan.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive identifier and
/// `ResourceNotFound` if the plan or procedure does not exist.
pub fn add_procedure_to_plan(
    persistence: &mut Persistence,
    request: &PlanProcedureRequest,
    cancel: &CancellationToken,
) -> Result<WriteResponse, ApiError> {
    run(
        persistence,
        Command::AddProcedureToPlan {
            plan_id: request.plan_id(),
            procedure_id: request.procedure_id(),
        },
        cancel,
    )?;
    Ok(WriteResponse::ok("Procedure added"))
}

/// Creates an empty plan.
///
/// # Errors
///
/// Returns `Cancelled` if the request was abandoned and `Internal` if the
/// insert fails.
pub fn create_plan(
    persistence: &mut Persistence,
    cancel: &CancellationToken,
) -> Result<CreatePlanResponse, ApiError> {
    let plan = plan_staffing::create_plan(persistence, cancel).map_err(translate_command_error)?;
    info!(plan_id = %plan.plan_id, "Plan created via API");
    Ok(CreatePlanResponse::from(plan))
}

/// Retrieves a plan with each procedure and its assigned users.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive identifier and
/// `ResourceNotFound` if the plan does not exist.
pub fn get_plan_details(
    persistence: &mut Persistence,
    plan_id: i64,
) -> Result<PlanDetailsResponse, ApiError> {
    let plan_id: PlanId = validate_plan_id(plan_id)?;

    persistence
        .get_plan_details(plan_id)
        .map_err(translate_persistence_error)?
        .map(PlanDetailsResponse::from)
        .ok_or_else(|| ApiError::ResourceNotFound {
            message: String::from("Plan not found"),
        })
}

/// Lists user assignments, optionally restricted to one plan.
///
/// # Errors
///
/// Returns `InvalidInput` if the plan filter is not positive.
pub fn list_assignments(
    persistence: &mut Persistence,
    query: &ListAssignmentsQuery,
) -> Result<Vec<AssignmentResponse>, ApiError> {
    let plan_id: Option<PlanId> = query.plan_id.map(validate_plan_id).transpose()?;

    Ok(persistence
        .list_assignments(plan_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(AssignmentResponse::from)
        .collect())
}

/// Lists the procedure catalog.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_procedures(persistence: &mut Persistence) -> Result<Vec<ProcedureResponse>, ApiError> {
    Ok(persistence
        .list_procedures()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(ProcedureResponse::from)
        .collect())
}

/// Lists the user catalog.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_users(persistence: &mut Persistence) -> Result<Vec<UserResponse>, ApiError> {
    Ok(persistence
        .list_users()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(UserResponse::from)
        .collect())
}
