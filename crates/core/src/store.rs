// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence seam used by the command handlers.
//!
//! Handlers read through a `PlanStore`, stage every mutation into a
//! `ChangeSet`, and hand the change set to `PlanStore::commit` exactly once.
//! A store must apply a change set atomically: either every mutation is
//! visible afterwards or none is.

use plan_staffing_domain::{
    Plan, PlanAggregate, PlanId, PlanProcedure, PlanProcedureUser, ProcedureId, UserId,
};
use time::OffsetDateTime;

/// A single staged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a `(plan, procedure)` link.
    AddPlanProcedure(PlanProcedure),
    /// Delete a `(plan, procedure)` link.
    RemovePlanProcedure(PlanProcedure),
    /// Insert a user assignment.
    AddPlanProcedureUser(PlanProcedureUser),
    /// Delete a user assignment.
    RemovePlanProcedureUser(PlanProcedureUser),
}

/// An ordered unit of work.
///
/// Mutations are applied in the order they were staged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    mutations: Vec<Mutation>,
}

impl ChangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mutations: Vec::new(),
        }
    }

    pub fn add_plan_procedure(&mut self, link: PlanProcedure) {
        self.mutations.push(Mutation::AddPlanProcedure(link));
    }

    pub fn remove_plan_procedure(&mut self, link: PlanProcedure) {
        self.mutations.push(Mutation::RemovePlanProcedure(link));
    }

    pub fn add_plan_procedure_user(&mut self, assignment: PlanProcedureUser) {
        self.mutations
            .push(Mutation::AddPlanProcedureUser(assignment));
    }

    pub fn remove_plan_procedure_user(&mut self, assignment: PlanProcedureUser) {
        self.mutations
            .push(Mutation::RemovePlanProcedureUser(assignment));
    }

    /// Stages the removal of every given assignment.
    pub fn remove_plan_procedure_users<I>(&mut self, assignments: I)
    where
        I: IntoIterator<Item = PlanProcedureUser>,
    {
        self.mutations.extend(
            assignments
                .into_iter()
                .map(Mutation::RemovePlanProcedureUser),
        );
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    #[must_use]
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }
}

impl IntoIterator for ChangeSet {
    type Item = Mutation;
    type IntoIter = std::vec::IntoIter<Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.mutations.into_iter()
    }
}

/// Repository interface over plans, procedure links and user assignments.
///
/// Every method may fail with `Self::Error`, including when the underlying
/// persistence context has already been released.
pub trait PlanStore {
    /// The error raised by this store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads a plan with its procedure links and each link's user assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load_plan(&mut self, plan_id: PlanId) -> Result<Option<PlanAggregate>, Self::Error>;

    /// Finds a `(plan, procedure)` link by its composite key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_plan_procedure(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
    ) -> Result<Option<PlanProcedure>, Self::Error>;

    /// Finds a single user assignment by its composite key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_plan_procedure_user(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
        user_id: UserId,
    ) -> Result<Option<PlanProcedureUser>, Self::Error>;

    /// Lists every user assignment for one `(plan, procedure)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_plan_procedure_users(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
    ) -> Result<Vec<PlanProcedureUser>, Self::Error>;

    /// Returns whether the user exists in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn user_exists(&mut self, user_id: UserId) -> Result<bool, Self::Error>;

    /// Returns whether the procedure exists in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn procedure_exists(&mut self, procedure_id: ProcedureId) -> Result<bool, Self::Error>;

    /// Creates an empty plan stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be inserted.
    fn create_plan(&mut self, now: OffsetDateTime) -> Result<Plan, Self::Error>;

    /// Applies every staged mutation in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any mutation fails, in which case none are applied.
    fn commit(&mut self, changes: ChangeSet) -> Result<(), Self::Error>;
}
