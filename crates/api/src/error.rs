// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use plan_staffing::CommandError;
use plan_staffing_persistence::PersistenceError;
use tracing::{error, warn};

/// API-level errors.
///
/// These are distinct from core and persistence errors and represent the
/// API contract. `InvalidInput` and `ResourceNotFound` display their
/// message unchanged, since clients match on that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request was abandoned before anything was committed.
    Cancelled,
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { message } | Self::ResourceNotFound { message } => {
                write!(f, "{message}")
            }
            Self::Cancelled => write!(f, "Request cancelled before completion"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a command error into an API error.
///
/// Infrastructure failures are logged with their source here, because the
/// API error only carries the summary.
#[must_use]
pub fn translate_command_error(err: CommandError) -> ApiError {
    match err {
        CommandError::BadRequest(message) => ApiError::InvalidInput { message },
        CommandError::NotFound(message) => ApiError::ResourceNotFound { message },
        CommandError::Cancelled => {
            warn!("Command cancelled");
            ApiError::Cancelled
        }
        err @ CommandError::Infrastructure { .. } => {
            error!(error = %err, "Command failed in the persistence layer");
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error raised by a read query into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    error!(error = %err, "Persistence error");
    ApiError::Internal {
        message: format!("Persistence error: {err}"),
    }
}
