// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod catalog_tests;
mod store_tests;

use plan_staffing::{ChangeSet, PlanStore};
use plan_staffing_domain::{PlanId, PlanProcedure, PlanProcedureUser, ProcedureId, UserId};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn test_timestamp() -> OffsetDateTime {
    datetime!(2026-01-05 12:00 UTC)
}

pub fn create_test_plan(persistence: &mut Persistence) -> PlanId {
    persistence.create_plan(test_timestamp()).unwrap().plan_id
}

pub fn create_test_procedure(persistence: &mut Persistence, title: &str) -> ProcedureId {
    persistence.create_procedure(title).unwrap().procedure_id
}

pub fn create_test_user(persistence: &mut Persistence, name: &str) -> UserId {
    persistence.create_user(name).unwrap().user_id
}

pub fn link_procedure(persistence: &mut Persistence, plan_id: PlanId, procedure_id: ProcedureId) {
    let mut changes = ChangeSet::new();
    changes.add_plan_procedure(PlanProcedure::new(plan_id, procedure_id));
    persistence.commit(changes).unwrap();
}

pub fn assign(
    persistence: &mut Persistence,
    plan_id: PlanId,
    procedure_id: ProcedureId,
    user_id: UserId,
) {
    let mut changes = ChangeSet::new();
    changes.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        user_id,
        test_timestamp(),
    ));
    persistence.commit(changes).unwrap();
}

/// One plan containing one procedure, and two catalog users with no assignments.
pub struct Fixture {
    pub persistence: Persistence,
    pub plan_id: PlanId,
    pub procedure_id: ProcedureId,
    pub user_ids: [UserId; 2],
}

pub fn create_fixture() -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let plan_id = create_test_plan(&mut persistence);
    let procedure_id = create_test_procedure(&mut persistence, "Knee Arthroscopy");
    let user_ids = [
        create_test_user(&mut persistence, "Nick Morrison"),
        create_test_user(&mut persistence, "Bailey Hudson"),
    ];
    link_procedure(&mut persistence, plan_id, procedure_id);

    Fixture {
        persistence,
        plan_id,
        procedure_id,
        user_ids,
    }
}
