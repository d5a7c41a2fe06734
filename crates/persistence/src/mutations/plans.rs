// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use plan_staffing_domain::{Plan, PlanId};
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::format_timestamp;
use crate::diesel_schema::plans;
use crate::error::PersistenceError;

/// Inserts an empty plan stamped with `now`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_plan(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<Plan, PersistenceError> {
    let stamp: String = format_timestamp(now)?;

    let plan_id: i64 = diesel::insert_into(plans::table)
        .values((
            plans::create_date.eq(&stamp),
            plans::update_date.eq(&stamp),
        ))
        .returning(plans::plan_id)
        .get_result(conn)?;
    info!(plan_id, "Plan created");

    Ok(Plan {
        plan_id: PlanId::new(plan_id),
        create_date: now,
        update_date: now,
    })
}
