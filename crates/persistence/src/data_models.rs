// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types mapped to the Diesel schema and their conversions into domain types.
//!
//! Timestamps are stored as RFC 3339 text in UTC.

use diesel::prelude::*;
use plan_staffing_domain::{
    Plan, PlanId, PlanProcedure, PlanProcedureUser, Procedure, ProcedureId, User, UserId,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{plan_procedure_users, plan_procedures, plans, procedures, users};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = plans)]
pub struct PlanRow {
    pub plan_id: i64,
    pub create_date: String,
    pub update_date: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = procedures)]
pub struct ProcedureRow {
    pub procedure_id: i64,
    pub title: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = plan_procedures)]
pub struct PlanProcedureRow {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub create_date: String,
    pub update_date: String,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = plan_procedure_users)]
pub struct PlanProcedureUserRow {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub user_id: i64,
    pub create_date: String,
    pub update_date: String,
}

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(value.to_offset(time::UtcOffset::UTC).format(&Rfc3339)?)
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the text is not valid RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(value, &Rfc3339)?)
}

impl PlanRow {
    pub fn into_domain(self) -> Result<Plan, PersistenceError> {
        Ok(Plan {
            plan_id: PlanId::new(self.plan_id),
            create_date: parse_timestamp(&self.create_date)?,
            update_date: parse_timestamp(&self.update_date)?,
        })
    }
}

impl From<ProcedureRow> for Procedure {
    fn from(row: ProcedureRow) -> Self {
        Self {
            procedure_id: ProcedureId::new(row.procedure_id),
            title: row.title,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            name: row.name,
        }
    }
}

impl PlanProcedureRow {
    pub fn from_domain(link: PlanProcedure, now: OffsetDateTime) -> Result<Self, PersistenceError> {
        let stamp: String = format_timestamp(now)?;
        Ok(Self {
            plan_id: link.plan_id.value(),
            procedure_id: link.procedure_id.value(),
            create_date: stamp.clone(),
            update_date: stamp,
        })
    }

    #[must_use]
    pub const fn to_domain(&self) -> PlanProcedure {
        PlanProcedure::new(PlanId::new(self.plan_id), ProcedureId::new(self.procedure_id))
    }
}

impl PlanProcedureUserRow {
    pub fn from_domain(assignment: &PlanProcedureUser) -> Result<Self, PersistenceError> {
        Ok(Self {
            plan_id: assignment.plan_id.value(),
            procedure_id: assignment.procedure_id.value(),
            user_id: assignment.user_id.value(),
            create_date: format_timestamp(assignment.create_date)?,
            update_date: format_timestamp(assignment.update_date)?,
        })
    }

    pub fn into_domain(self) -> Result<PlanProcedureUser, PersistenceError> {
        Ok(PlanProcedureUser {
            plan_id: PlanId::new(self.plan_id),
            procedure_id: ProcedureId::new(self.procedure_id),
            user_id: UserId::new(self.user_id),
            create_date: parse_timestamp(&self.create_date)?,
            update_date: parse_timestamp(&self.update_date)?,
        })
    }
}
