// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plan_staffing_domain::{ProcedureId, UserId};

use crate::Persistence;

#[test]
fn test_create_and_list_procedures() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first = persistence.create_procedure("Ankle Fracture Repair").unwrap();
    let second = persistence.create_procedure("Knee Arthroscopy").unwrap();

    assert_eq!(first.procedure_id, ProcedureId::new(1));
    assert_eq!(second.procedure_id, ProcedureId::new(2));

    let procedures = persistence.list_procedures().unwrap();
    assert_eq!(procedures, vec![first, second]);
}

#[test]
fn test_create_and_list_users() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user = persistence.create_user("Bailey Hudson").unwrap();

    assert_eq!(user.user_id, UserId::new(1));
    assert_eq!(persistence.list_users().unwrap(), vec![user]);
}

#[test]
fn test_seed_demo_catalog_is_idempotent() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence.seed_demo_catalog().unwrap();
    let procedures = persistence.list_procedures().unwrap().len();
    let users = persistence.list_users().unwrap().len();
    assert!(procedures > 0);
    assert!(users > 0);

    persistence.seed_demo_catalog().unwrap();
    assert_eq!(persistence.list_procedures().unwrap().len(), procedures);
    assert_eq!(persistence.list_users().unwrap().len(), users);
}
