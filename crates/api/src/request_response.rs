// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Identifiers arrive as raw
//! integers and are validated by the command handlers, so a malformed
//! identifier yields the same error whether it came over HTTP or not.

use plan_staffing_domain::{
    Plan, PlanDetails, PlanId, PlanProcedureDetails, PlanProcedureUser, Procedure, ProcedureId,
    User, UserId,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request naming a `(plan, procedure)` pair.
///
/// Used by clear-users, remove-procedure and add-procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProcedureRequest {
    pub plan_id: i64,
    pub procedure_id: i64,
}

impl PlanProcedureRequest {
    #[must_use]
    pub const fn plan_id(&self) -> PlanId {
        PlanId::new(self.plan_id)
    }

    #[must_use]
    pub const fn procedure_id(&self) -> ProcedureId {
        ProcedureId::new(self.procedure_id)
    }
}

/// API request naming a `(plan, procedure, user)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProcedureUserRequest {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub user_id: i64,
}

impl PlanProcedureUserRequest {
    #[must_use]
    pub const fn plan_id(&self) -> PlanId {
        PlanId::new(self.plan_id)
    }

    #[must_use]
    pub const fn procedure_id(&self) -> ProcedureId {
        ProcedureId::new(self.procedure_id)
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

/// Query parameters for listing assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssignmentsQuery {
    /// Restrict the listing to one plan.
    pub plan_id: Option<i64>,
}

/// Generic response for a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    pub success: bool,
    pub message: String,
}

impl WriteResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// API response for a newly created plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanResponse {
    pub plan_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub create_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub update_date: OffsetDateTime,
}

impl From<Plan> for CreatePlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            plan_id: plan.plan_id.value(),
            create_date: plan.create_date,
            update_date: plan.update_date,
        }
    }
}

/// A catalog procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureResponse {
    pub procedure_id: i64,
    pub procedure_title: String,
}

impl From<Procedure> for ProcedureResponse {
    fn from(procedure: Procedure) -> Self {
        Self {
            procedure_id: procedure.procedure_id.value(),
            procedure_title: procedure.title,
        }
    }
}

/// A catalog user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.value(),
            name: user.name,
        }
    }
}

/// One procedure of a plan with its assigned users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProcedureResponse {
    pub procedure_id: i64,
    pub procedure: ProcedureResponse,
    pub assigned_users: Vec<UserResponse>,
}

impl From<PlanProcedureDetails> for PlanProcedureResponse {
    fn from(details: PlanProcedureDetails) -> Self {
        Self {
            procedure_id: details.procedure.procedure_id.value(),
            procedure: ProcedureResponse::from(details.procedure),
            assigned_users: details
                .assigned_users
                .into_iter()
                .map(UserResponse::from)
                .collect(),
        }
    }
}

/// A plan with its procedures and assigned users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetailsResponse {
    pub plan_id: i64,
    pub plan_procedures: Vec<PlanProcedureResponse>,
}

impl From<PlanDetails> for PlanDetailsResponse {
    fn from(details: PlanDetails) -> Self {
        Self {
            plan_id: details.plan_id.value(),
            plan_procedures: details
                .procedures
                .into_iter()
                .map(PlanProcedureResponse::from)
                .collect(),
        }
    }
}

/// One user assignment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub create_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub update_date: OffsetDateTime,
}

impl From<PlanProcedureUser> for AssignmentResponse {
    fn from(assignment: PlanProcedureUser) -> Self {
        Self {
            plan_id: assignment.plan_id.value(),
            procedure_id: assignment.procedure_id.value(),
            user_id: assignment.user_id.value(),
            create_date: assignment.create_date,
            update_date: assignment.update_date,
        }
    }
}
