// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::IdentifierField;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is zero or negative.
    InvalidIdentifier {
        /// The field carrying the identifier.
        field: IdentifierField,
        /// The rejected value.
        value: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { field, .. } => write!(f, "Invalid {field}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Returns the identifier field this error refers to.
    #[must_use]
    pub const fn field(&self) -> IdentifierField {
        match self {
            Self::InvalidIdentifier { field, .. } => *field,
        }
    }
}
