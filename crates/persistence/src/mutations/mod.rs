// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `plans`: plan creation
//! - `catalog`: procedure and user creation, demo catalog seeding
//! - `assignments`: transactional application of a `ChangeSet`

pub mod assignments;
pub mod catalog;
pub mod plans;

pub use assignments::apply_change_set;
pub use catalog::{insert_procedure, insert_user};
pub use plans::insert_plan;
