// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Generates a transparent integer identifier newtype.
///
/// Identifiers are not validated on construction. Well-formedness
/// (strictly positive) is checked by `validate_identifier` so that
/// callers can report which field was rejected.
macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier! {
    /// Identifies a repair plan.
    PlanId
}

identifier! {
    /// Identifies a procedure in the catalog.
    ProcedureId
}

identifier! {
    /// Identifies a user in the catalog.
    UserId
}

/// Names the identifier fields accepted by commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierField {
    PlanId,
    ProcedureId,
    UserId,
}

impl IdentifierField {
    /// Returns the field name as it appears in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlanId => "PlanId",
            Self::ProcedureId => "ProcedureId",
            Self::UserId => "UserId",
        }
    }
}

impl std::fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A repair plan: the aggregate root owning procedure associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub plan_id: PlanId,
    pub create_date: OffsetDateTime,
    pub update_date: OffsetDateTime,
}

/// A catalog procedure that can be included in plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub procedure_id: ProcedureId,
    pub title: String,
}

/// A catalog user that can be assigned to plan procedures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
}

/// Records that a procedure is part of a plan.
///
/// Keyed by `(plan_id, procedure_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanProcedure {
    pub plan_id: PlanId,
    pub procedure_id: ProcedureId,
}

impl PlanProcedure {
    #[must_use]
    pub const fn new(plan_id: PlanId, procedure_id: ProcedureId) -> Self {
        Self {
            plan_id,
            procedure_id,
        }
    }
}

/// Records that a user is assigned to a procedure within a plan.
///
/// Keyed by `(plan_id, procedure_id, user_id)`; at most one row exists per triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanProcedureUser {
    pub plan_id: PlanId,
    pub procedure_id: ProcedureId,
    pub user_id: UserId,
    pub create_date: OffsetDateTime,
    pub update_date: OffsetDateTime,
}

impl PlanProcedureUser {
    /// Creates a new assignment stamped with the given time for both dates.
    #[must_use]
    pub const fn new(
        plan_id: PlanId,
        procedure_id: ProcedureId,
        user_id: UserId,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            plan_id,
            procedure_id,
            user_id,
            create_date: now,
            update_date: now,
        }
    }

    /// Returns the `(plan, procedure)` link this assignment belongs to.
    #[must_use]
    pub const fn plan_procedure(&self) -> PlanProcedure {
        PlanProcedure::new(self.plan_id, self.procedure_id)
    }
}

/// A procedure link together with the users assigned through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanProcedureLinks {
    pub link: PlanProcedure,
    pub users: Vec<PlanProcedureUser>,
}

impl PlanProcedureLinks {
    /// Returns whether the given user is already assigned through this link.
    #[must_use]
    pub fn has_user(&self, user_id: UserId) -> bool {
        self.users.iter().any(|u| u.user_id == user_id)
    }
}

/// A plan loaded with its procedure links and their user links.
///
/// This is the explicit aggregate read used by the assignment rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanAggregate {
    pub plan: Plan,
    pub procedures: Vec<PlanProcedureLinks>,
}

impl PlanAggregate {
    /// Finds the link for the given procedure, if the procedure is in this plan.
    #[must_use]
    pub fn procedure(&self, procedure_id: ProcedureId) -> Option<&PlanProcedureLinks> {
        self.procedures
            .iter()
            .find(|p| p.link.procedure_id == procedure_id)
    }
}
