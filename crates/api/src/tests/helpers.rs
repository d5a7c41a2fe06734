// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use plan_staffing_persistence::Persistence;
use tokio_util::sync::CancellationToken;

use crate::{PlanProcedureRequest, PlanProcedureUserRequest, add_procedure_to_plan, create_plan};

/// A persistence adapter holding one plan with one procedure and two users.
pub struct TestContext {
    pub persistence: Persistence,
    pub ids: FixtureIds,
}

/// Identifiers of the rows created by `create_test_context`.
#[derive(Debug, Clone, Copy)]
pub struct FixtureIds {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub user_ids: [i64; 2],
}

pub fn token() -> CancellationToken {
    CancellationToken::new()
}

pub fn create_test_context() -> TestContext {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let procedure_id = persistence
        .create_procedure("Ankle Fracture Repair")
        .unwrap()
        .procedure_id
        .value();
    let user_ids = [
        persistence.create_user("Nick Morrison").unwrap().user_id.value(),
        persistence.create_user("Bailey Hudson").unwrap().user_id.value(),
    ];
    let plan_id = create_plan(&mut persistence, &token()).unwrap().plan_id;
    add_procedure_to_plan(
        &mut persistence,
        &PlanProcedureRequest {
            plan_id,
            procedure_id,
        },
        &token(),
    )
    .unwrap();

    TestContext {
        persistence,
        ids: FixtureIds {
            plan_id,
            procedure_id,
            user_ids,
        },
    }
}

impl FixtureIds {
    pub const fn pair(&self) -> PlanProcedureRequest {
        PlanProcedureRequest {
            plan_id: self.plan_id,
            procedure_id: self.procedure_id,
        }
    }

    pub const fn triple(&self, user_index: usize) -> PlanProcedureUserRequest {
        PlanProcedureUserRequest {
            plan_id: self.plan_id,
            procedure_id: self.procedure_id,
            user_id: self.user_ids[user_index],
        }
    }
}
