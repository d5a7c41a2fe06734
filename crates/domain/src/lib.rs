// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod read_models;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use read_models::{PlanDetails, PlanProcedureDetails};
pub use types::{
    IdentifierField, Plan, PlanAggregate, PlanId, PlanProcedure, PlanProcedureLinks,
    PlanProcedureUser, Procedure, ProcedureId, User, UserId,
};
pub use validation::{validate_identifier, validate_plan_procedure, validate_plan_procedure_user};
