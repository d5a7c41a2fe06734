// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plan_staffing_domain::DomainError;
use thiserror::Error;

/// Boxed error raised by a persistence collaborator.
pub type StoreFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The result envelope returned by every command handler.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Failure outcomes of a command.
///
/// `BadRequest` and `NotFound` messages are part of the public contract and
/// are reproduced verbatim by the transport layer.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A caller-supplied identifier is malformed. Raised before any I/O.
    #[error("{0}")]
    BadRequest(String),

    /// A required entity or association does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The persistence layer failed. Nothing is known to have been committed.
    #[error("Failed to {operation}: {source}")]
    Infrastructure {
        /// The store operation that failed.
        operation: &'static str,
        /// The underlying store error.
        #[source]
        source: StoreFailure,
    },

    /// The cancellation signal fired before the changes were committed.
    #[error("Operation cancelled before commit")]
    Cancelled,
}

impl CommandError {
    /// Wraps a store error raised while performing `operation`.
    pub fn infrastructure<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Infrastructure {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns whether this is a `NotFound` outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns whether this is a `BadRequest` outcome.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
