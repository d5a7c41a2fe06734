// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plan_staffing_domain::{PlanId, ProcedureId, UserId};

/// A command represents caller intent as data only.
///
/// Commands are the only way to change plan procedure assignments.
/// Identifiers are carried unvalidated; each handler validates what it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Assign a user to a procedure within a plan.
    AssignUser {
        plan_id: PlanId,
        procedure_id: ProcedureId,
        user_id: UserId,
    },
    /// Remove a single user assignment.
    UnassignUser {
        plan_id: PlanId,
        procedure_id: ProcedureId,
        user_id: UserId,
    },
    /// Remove every user assigned to one `(plan, procedure)` pair.
    ClearUsers {
        plan_id: PlanId,
        procedure_id: ProcedureId,
    },
    /// Remove a procedure from a plan along with its user assignments.
    RemoveProcedure {
        plan_id: PlanId,
        procedure_id: ProcedureId,
    },
    /// Include a catalog procedure in a plan.
    AddProcedureToPlan {
        plan_id: PlanId,
        procedure_id: ProcedureId,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssignUser { .. } => "AssignUser",
            Self::UnassignUser { .. } => "UnassignUser",
            Self::ClearUsers { .. } => "ClearUsers",
            Self::RemoveProcedure { .. } => "RemoveProcedure",
            Self::AddProcedureToPlan { .. } => "AddProcedureToPlan",
        }
    }

    /// Returns the plan this command targets.
    #[must_use]
    pub const fn plan_id(&self) -> PlanId {
        match self {
            Self::AssignUser { plan_id, .. }
            | Self::UnassignUser { plan_id, .. }
            | Self::ClearUsers { plan_id, .. }
            | Self::RemoveProcedure { plan_id, .. }
            | Self::AddProcedureToPlan { plan_id, .. } => *plan_id,
        }
    }
}
