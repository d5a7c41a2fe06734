// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plan_staffing::{ChangeSet, PlanStore};
use plan_staffing_domain::{PlanId, PlanProcedure, PlanProcedureUser, ProcedureId, UserId};

use super::{
    Fixture, assign, create_fixture, create_test_plan, create_test_procedure, link_procedure,
    test_timestamp,
};
use crate::{Persistence, PersistenceError};

#[test]
fn test_load_plan_returns_links_and_users() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();
    let other_procedure = create_test_procedure(&mut persistence, "Carpal Tunnel Release");
    link_procedure(&mut persistence, plan_id, other_procedure);
    assign(&mut persistence, plan_id, procedure_id, user_ids[0]);
    assign(&mut persistence, plan_id, procedure_id, user_ids[1]);

    let aggregate = persistence.load_plan(plan_id).unwrap().unwrap();

    assert_eq!(aggregate.plan.plan_id, plan_id);
    assert_eq!(aggregate.plan.create_date, test_timestamp());
    assert_eq!(aggregate.procedures.len(), 2);
    let links = aggregate.procedure(procedure_id).unwrap();
    assert_eq!(links.users.len(), 2);
    assert!(links.has_user(user_ids[1]));
    assert!(aggregate.procedure(other_procedure).unwrap().users.is_empty());
}

#[test]
fn test_load_missing_plan() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.load_plan(PlanId::new(5)).unwrap().is_none());
}

#[test]
fn test_assignment_timestamps_round_trip() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();
    assign(&mut persistence, plan_id, procedure_id, user_ids[0]);

    let row = persistence
        .find_plan_procedure_user(plan_id, procedure_id, user_ids[0])
        .unwrap()
        .unwrap();

    assert_eq!(row.create_date, test_timestamp());
    assert_eq!(row.update_date, test_timestamp());
}

#[test]
fn test_find_plan_procedure() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        ..
    } = create_fixture();

    assert_eq!(
        persistence.find_plan_procedure(plan_id, procedure_id).unwrap(),
        Some(PlanProcedure::new(plan_id, procedure_id))
    );
    assert_eq!(
        persistence
            .find_plan_procedure(plan_id, ProcedureId::new(99))
            .unwrap(),
        None
    );
}

#[test]
fn test_catalog_existence_checks() {
    let Fixture {
        mut persistence,
        procedure_id,
        user_ids,
        ..
    } = create_fixture();

    assert!(persistence.user_exists(user_ids[0]).unwrap());
    assert!(!persistence.user_exists(UserId::new(77)).unwrap());
    assert!(persistence.procedure_exists(procedure_id).unwrap());
    assert!(!persistence.procedure_exists(ProcedureId::new(77)).unwrap());
}

#[test]
fn test_create_plan_assigns_sequential_ids() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first = create_test_plan(&mut persistence);
    let second = create_test_plan(&mut persistence);

    assert_eq!(second.value(), first.value() + 1);
}

#[test]
fn test_duplicate_assignment_is_constraint_violation() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();
    assign(&mut persistence, plan_id, procedure_id, user_ids[0]);

    let mut changes = ChangeSet::new();
    changes.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        user_ids[0],
        test_timestamp(),
    ));

    assert!(matches!(
        persistence.commit(changes),
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

#[test]
fn test_assignment_requires_plan_procedure_and_user() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();

    let mut unknown_user = ChangeSet::new();
    unknown_user.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        UserId::new(500),
        test_timestamp(),
    ));
    assert!(matches!(
        persistence.commit(unknown_user),
        Err(PersistenceError::ConstraintViolation(_))
    ));

    let mut unlinked_procedure = ChangeSet::new();
    unlinked_procedure.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        ProcedureId::new(500),
        user_ids[0],
        test_timestamp(),
    ));
    assert!(matches!(
        persistence.commit(unlinked_procedure),
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

#[test]
fn test_failed_commit_rolls_back_earlier_mutations() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();
    assign(&mut persistence, plan_id, procedure_id, user_ids[0]);

    let mut changes = ChangeSet::new();
    changes.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        user_ids[1],
        test_timestamp(),
    ));
    changes.add_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        user_ids[0],
        test_timestamp(),
    ));

    assert!(persistence.commit(changes).is_err());
    assert_eq!(
        persistence
            .list_plan_procedure_users(plan_id, procedure_id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_removing_missing_row_is_concurrency_conflict() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();

    let mut changes = ChangeSet::new();
    changes.remove_plan_procedure_user(PlanProcedureUser::new(
        plan_id,
        procedure_id,
        user_ids[0],
        test_timestamp(),
    ));

    assert!(matches!(
        persistence.commit(changes),
        Err(PersistenceError::ConcurrencyConflict(_))
    ));
}

#[test]
fn test_deleting_plan_procedure_cascades_to_users() {
    let Fixture {
        mut persistence,
        plan_id,
        procedure_id,
        user_ids,
    } = create_fixture();
    assign(&mut persistence, plan_id, procedure_id, user_ids[0]);
    assign(&mut persistence, plan_id, procedure_id, user_ids[1]);

    let mut changes = ChangeSet::new();
    changes.remove_plan_procedure(PlanProcedure::new(plan_id, procedure_id));
    persistence.commit(changes).unwrap();

    assert!(persistence.list_assignments(Some(plan_id)).unwrap().is_empty());
}
