// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{IdentifierField, PlanId, ProcedureId, UserId};

/// Validates that an identifier is a positive integer.
///
/// This function is pure and performs no I/O.
///
/// # Arguments
///
/// * `field` - The field the identifier was supplied for
/// * `value` - The raw identifier value
///
/// # Returns
///
/// * `Ok(())` if the identifier is at least 1
/// * `Err(DomainError::InvalidIdentifier)` otherwise
///
/// # Errors
///
/// Returns an error if the value is zero or negative.
pub const fn validate_identifier(field: IdentifierField, value: i64) -> Result<(), DomainError> {
    if value < 1 {
        return Err(DomainError::InvalidIdentifier { field, value });
    }
    Ok(())
}

/// Validates a `(plan, procedure)` identifier pair, plan first.
///
/// # Errors
///
/// Returns an error naming the first invalid field.
pub fn validate_plan_procedure(
    plan_id: PlanId,
    procedure_id: ProcedureId,
) -> Result<(), DomainError> {
    validate_identifier(IdentifierField::PlanId, plan_id.value())?;
    validate_identifier(IdentifierField::ProcedureId, procedure_id.value())
}

/// Validates a `(plan, procedure, user)` identifier triple in that order.
///
/// # Errors
///
/// Returns an error naming the first invalid field.
pub fn validate_plan_procedure_user(
    plan_id: PlanId,
    procedure_id: ProcedureId,
    user_id: UserId,
) -> Result<(), DomainError> {
    validate_plan_procedure(plan_id, procedure_id)?;
    validate_identifier(IdentifierField::UserId, user_id.value())
}
