// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod command;
mod error;
mod handlers;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use command::Command;
pub use error::{CommandError, CommandResult, StoreFailure};
pub use handlers::{
    add_procedure_to_plan, assign_user, clear_users, create_plan, execute, remove_procedure,
    unassign_user,
};
pub use store::{ChangeSet, Mutation, PlanStore};
