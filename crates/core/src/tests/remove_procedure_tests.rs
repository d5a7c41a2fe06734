// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plan_staffing_domain::{PlanId, PlanProcedure, ProcedureId};

use super::helpers::{InMemoryStore, active_token};
use crate::remove_procedure;

#[test]
fn test_remove_procedure_cascades_to_its_users() {
    let mut store: InMemoryStore = InMemoryStore::new()
        .with_plan(1)
        .with_plan_procedure(1, 1)
        .with_plan_procedure(1, 2)
        .with_assignment(1, 1, 1)
        .with_assignment(1, 1, 2)
        .with_assignment(1, 2, 1);

    remove_procedure(&mut store, PlanId::new(1), ProcedureId::new(1), &active_token()).unwrap();

    assert_eq!(
        store.plan_procedures,
        vec![PlanProcedure::new(PlanId::new(1), ProcedureId::new(2))]
    );
    assert!(store.assignments_for(1, 1).is_empty());
    assert_eq!(store.assignments_for(1, 2).len(), 1);
    assert_eq!(store.commits, 1);
}

#[test]
fn test_remove_procedure_without_users() {
    let mut store: InMemoryStore = InMemoryStore::new().with_plan(1).with_plan_procedure(1, 1);

    remove_procedure(&mut store, PlanId::new(1), ProcedureId::new(1), &active_token()).unwrap();

    assert!(store.plan_procedures.is_empty());
}

#[test]
fn test_remove_procedure_not_in_plan_names_the_plan() {
    let mut store: InMemoryStore = InMemoryStore::new().with_plan(4).with_plan_procedure(4, 1);

    let err = remove_procedure(&mut store, PlanId::new(4), ProcedureId::new(9), &active_token())
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "PlanId: 4 not found");
    assert_eq!(store.plan_procedures.len(), 1);
}

#[test]
fn test_remove_procedure_leaves_other_plans_alone() {
    let mut store: InMemoryStore = InMemoryStore::new()
        .with_plan(1)
        .with_plan(2)
        .with_plan_procedure(1, 1)
        .with_plan_procedure(2, 1)
        .with_assignment(2, 1, 1);

    remove_procedure(&mut store, PlanId::new(1), ProcedureId::new(1), &active_token()).unwrap();

    assert_eq!(store.plan_procedures.len(), 1);
    assert_eq!(store.assignments_for(2, 1).len(), 1);
}
