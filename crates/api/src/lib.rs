// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Plan Staffing Service.
//!
//! Translates transport-level requests into commands and read queries,
//! and translates `CommandError` and `PersistenceError` into `ApiError`.
//! Nothing from the core or persistence error types leaks past this crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_command_error, translate_persistence_error};
pub use handlers::{
    add_procedure_to_plan, assign_user, clear_users, create_plan, get_plan_details,
    list_assignments, list_procedures, list_users, remove_procedure, unassign_user,
};
pub use request_response::{
    AssignmentResponse, CreatePlanResponse, ListAssignmentsQuery, PlanDetailsResponse,
    PlanProcedureRequest, PlanProcedureResponse, PlanProcedureUserRequest, ProcedureResponse,
    UserResponse, WriteResponse,
};
