// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `PlanStore` implementation over the Diesel connection.

use plan_staffing::{ChangeSet, PlanStore};
use plan_staffing_domain::{
    Plan, PlanAggregate, PlanId, PlanProcedure, PlanProcedureLinks, PlanProcedureUser,
    ProcedureId, UserId,
};
use time::OffsetDateTime;

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};

impl PlanStore for Persistence {
    type Error = PersistenceError;

    fn load_plan(&mut self, plan_id: PlanId) -> Result<Option<PlanAggregate>, Self::Error> {
        let conn = self.connection()?;
        let Some(plan) = queries::find_plan(conn, plan_id)? else {
            return Ok(None);
        };

        let links: Vec<PlanProcedure> = queries::list_plan_procedures(conn, plan_id)?;
        let assignments: Vec<PlanProcedureUser> = queries::list_plan_users(conn, plan_id)?;

        let procedures: Vec<PlanProcedureLinks> = links
            .into_iter()
            .map(|link| PlanProcedureLinks {
                link,
                users: assignments
                    .iter()
                    .filter(|a| a.procedure_id == link.procedure_id)
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
        queries::find_plan_procedure(self.connection()?, plan_id, procedure_id)
    }

    fn find_plan_procedure_user(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
        user_id: UserId,
    ) -> Result<Option<PlanProcedureUser>, Self::Error> {
        queries::find_plan_procedure_user(self.connection()?, plan_id, procedure_id, user_id)
    }

    fn list_plan_procedure_users(
        &mut self,
        plan_id: PlanId,
        procedure_id: ProcedureId,
    ) -> Result<Vec<PlanProcedureUser>, Self::Error> {
        queries::list_plan_procedure_users(self.connection()?, plan_id, procedure_id)
    }

    fn user_exists(&mut self, user_id: UserId) -> Result<bool, Self::Error> {
        queries::user_exists(self.connection()?, user_id)
    }

    fn procedure_exists(&mut self, procedure_id: ProcedureId) -> Result<bool, Self::Error> {
        queries::procedure_exists(self.connection()?, procedure_id)
    }

    fn create_plan(&mut self, now: OffsetDateTime) -> Result<Plan, Self::Error> {
        mutations::insert_plan(self.connection()?, now)
    }

    fn commit(&mut self, changes: ChangeSet) -> Result<(), Self::Error> {
        let conn = self.connection()?;
        if changes.is_empty() {
            return Ok(());
        }
        mutations::apply_change_set(conn, changes, OffsetDateTime::now_utc())
    }
}
