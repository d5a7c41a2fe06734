// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `plans`: plans and their procedure links
//! - `catalog`: procedures and users
//! - `assignments`: user assignments and the plan details read model

pub mod assignments;
pub mod catalog;
pub mod plans;

pub use assignments::{
    find_plan_procedure_user, get_plan_details, list_assignments, list_plan_procedure_users,
    list_plan_users,
};
pub use catalog::{list_procedures, list_users, procedure_exists, user_exists};
pub use plans::{find_plan, find_plan_procedure, list_plan_procedures};
