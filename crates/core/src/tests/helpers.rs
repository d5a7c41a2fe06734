// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory `PlanStore` used to exercise the handlers without a database.

use plan_staffing_domain::{
    Plan, PlanAggregate, PlanId, PlanProcedure, PlanProcedureLinks, PlanProcedureUser,
    ProcedureId, UserId,
};
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::datetime;
use tokio_util::sync::CancellationToken;

use crate::{ChangeSet, Mutation, PlanStore};

#[derive(Debug, Error)]
pub enum InMemoryStoreError {
    #[error("store has been closed")]
    Closed,
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("missing row: {0}")]
    MissingRow(String),
}

/// A store that keeps its tables in vectors and applies commits atomically.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub plans: Vec<Plan>,
    pub procedures: Vec<ProcedureId>,
    pub users: Vec<UserId>,
    pub plan_procedures: Vec<PlanProcedure>,
    pub assignments: Vec<PlanProcedureUser>,
    pub commits: usize,
    pub closed: bool,
    /// Fired on the first read, simulating a cancellation that arrives mid-flight.
    pub cancel_on_read: Option<CancellationToken>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, plan_id: i64) -> Self {
        let now: OffsetDateTime = test_timestamp();
        self.plans.push(Plan {
            plan_id: PlanId::new(plan_id),
            create_date: now,
            update_date: now,
        });
        self
    }

    pub fn with_procedure(mut self, procedure_id: i64) -> Self {
        self.procedures.push(ProcedureId::new(procedure_id));
        self
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.users.push(UserId::new(user_id));
        self
    }

    pub fn with_plan_procedure(mut self, plan_id: i64, procedure_id: i64) -> Self {
        self.plan_procedures.push(PlanProcedure::new(
            PlanId::new(plan_id),
            ProcedureId::new(procedure_id),
        ));
        self
    }

    pub fn with_assignment(mut self, plan_id: i64, procedure_id: i64, user_id: i64) -> Self {
        self.assignments.push(PlanProcedureUser::new(
            PlanId::new(plan_id),
            ProcedureId::new(procedure_id),
            UserId::new(user_id),
            test_timestamp(),
        ));
        self
    }

    pub fn assignments_for(&self, plan_id: i64, procedure_id: i64) -> Vec<&PlanProcedureUser> {
        self.assignments
            .iter()
            .filter(|a| {
                a.plan_id == PlanId::new(plan_id) && a.procedure_id == ProcedureId::new(procedure_id)
            })
            .collect()
    }

    fn check_open(&self) -> Result<(), InMemoryStoreError> {
        if self.closed {
            return Err(InMemoryStoreError::Closed);
        }
        if let Some(token) = &self.cancel_on_read {
            token.cancel();
        }
        Ok(())
    }

    fn apply(
        plan_procedures: &mut Vec<PlanProcedure>,
        assignments: &mut Vec<PlanProcedureUser>,
        mutation: Mutation,
    ) -> Result<(), InMemoryStoreError> {
        match mutation {
            Mutation::AddPlanProcedure(link) => {
                if plan_procedures.contains(&link) {
                    return Err(InMemoryStoreError::DuplicateKey(format!("{link:?}")));
                }
                plan_procedures.push(link);
            }
            Mutation::RemovePlanProcedure(link) => {
                if assignments.iter().any(|a| a.plan_procedure() == link) {
                    return Err(InMemoryStoreError::DuplicateKey(format!(
                        "{link:?} still referenced"
                    )));
                }
                let before: usize = plan_procedures.len();
                plan_procedures.retain(|p| *p != link);
                if plan_procedures.len() == before {
                    return Err(InMemoryStoreError::MissingRow(format!("{link:?}")));
                }
            }
            Mutation::AddPlanProcedureUser(assignment) => {
                if assignments.iter().any(|a| {
                    a.plan_procedure() == assignment.plan_procedure()
                        && a.user_id == assignment.user_id
                }) {
                    return Err(InMemoryStoreError::DuplicateKey(format!(
                        "{:?}/{}",
                        assignment.plan_procedure(),
                        assignment.user_id
                    )));
                }
                assignments.push(assignment);
            }
            Mutation::RemovePlanProcedureUser(assignment) => {
                let before: usize = assignments.len();
                assignments.retain(|a| {
                    !(a.plan_procedure() == assignment.plan_procedure()
                        && a.user_id == assignment.user_id)
                });
                if assignments.len() == before {
                    return Err(InMemoryStoreError::MissingRow(format!(
                        "{:?}/{}",
                        assignment.plan_procedure(),
                        assignment.user_id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl PlanStore for InMemoryStore {
    type Error = InMemoryStoreError;

    fn load_plan(&mut self, plan_id: PlanId) -> Result<Option<PlanAggregate>, Self::Error> {
        self.check_open()?;
        let Some(plan) = self.plans.iter().find(|p| p.plan_id == plan_id).cloned() else {
            return Ok(None);
        };

        let procedures: Vec<PlanProcedureLinks> = self
            .plan_procedures
            .iter()
            .filter(|link| link.plan_id == plan_id)
            .map(|link| PlanProcedureLinks {
                link: *link,
                users: self
                    .assignments
                    .iter()
                    .filter(|a| a.plan_procedure() == *link)
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(Some(PlanAggregate { plan, procedures }))
    }

    fn find_plan_procedure(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
    ) -> Result<Option<PlanProcedure>, Self::Error> {
        self.check_open()?;
        let key: PlanProcedure = PlanProcedure::new(plan_id, procedure_id);
        Ok(self.plan_procedures.iter().copied().find(|p| *p == key))
    }

    fn find_plan_procedure_user(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
        user_id: UserId,
    ) -> Result<Option<PlanProcedureUser>, Self::Error> {
        self.check_open()?;
        Ok(self
            .assignments
            .iter()
            .find(|a| a.plan_id == plan_id && a.procedure_id == procedure_id && a.user_id == user_id)
            .cloned())
    }

    fn list_plan_procedure_users(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
    ) -> Result<Vec<PlanProcedureUser>, Self::Error> {
        self.check_open()?;
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.plan_id == plan_id && a.procedure_id == procedure_id)
            .cloned()
            .collect())
    }

    fn user_exists(&mut self, user_id: UserId) -> Result<bool, Self::Error> {
        self.check_open()?;
        Ok(self.users.contains(&user_id))
    }

    fn procedure_exists(&mut self, procedure_id: ProcedureId) -> Result<bool, Self::Error> {
        self.check_open()?;
        Ok(self.procedures.contains(&procedure_id))
    }

    fn create_plan(&mut self, now: OffsetDateTime) -> Result<Plan, Self::Error> {
        self.check_open()?;
        let next_id: i64 = self
            .plans
            .iter()
            .map(|p| p.plan_id.value())
            .max()
            .unwrap_or(0)
            + 1;
        let plan: Plan = Plan {
            plan_id: PlanId::new(next_id),
            create_date: now,
            update_date: now,
        };
        self.plans.push(plan.clone());
        Ok(plan)
    }

    fn commit(&mut self, changes: ChangeSet) -> Result<(), Self::Error> {
        if self.closed {
            return Err(InMemoryStoreError::Closed);
        }

        // Work on copies so a failing mutation leaves the store untouched.
        let mut plan_procedures: Vec<PlanProcedure> = self.plan_procedures.clone();
        let mut assignments: Vec<PlanProcedureUser> = self.assignments.clone();
        for mutation in changes {
            Self::apply(&mut plan_procedures, &mut assignments, mutation)?;
        }

        self.plan_procedures = plan_procedures;
        self.assignments = assignments;
        self.commits += 1;
        Ok(())
    }
}

pub fn test_timestamp() -> OffsetDateTime {
    datetime!(2026-01-01 00:00 UTC)
}

pub fn active_token() -> CancellationToken {
    CancellationToken::new()
}
