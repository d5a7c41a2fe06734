// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{PlanId, Procedure, User};

/// A plan with each included procedure and the users assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDetails {
    pub plan_id: PlanId,
    pub procedures: Vec<PlanProcedureDetails>,
}

/// One procedure within a plan and its assigned users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanProcedureDetails {
    pub procedure: Procedure,
    pub assigned_users: Vec<User>,
}

impl PlanDetails {
    /// Returns the total number of user assignments across all procedures.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.procedures.iter().map(|p| p.assigned_users.len()).sum()
    }
}
