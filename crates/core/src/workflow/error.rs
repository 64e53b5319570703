//! Workflow error types.
//!
//! This module defines all error types that can occur during workflow
//! operations: transitions, request creation, and persistence conflicts.

use thiserror::Error;
use uuid::Uuid;

use setora_shared::types::{AmountError, Role};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The actor's role is not permitted to perform the action.
    #[error("Role {role} is not allowed to perform {action}")]
    Unauthorized {
        /// The actor's role.
        role: Role,
        /// The attempted action.
        action: String,
    },

    /// The action does not apply to the request's current status.
    #[error("Action {action} does not apply to status {status}")]
    InvalidTransition {
        /// The attempted action.
        action: String,
        /// The request's current status.
        status: String,
    },

    /// The requested action is not part of the workflow.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Input constraint violated (amount bounds, text limits).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request not found.
    #[error("Request {0} not found")]
    NotFound(Uuid),

    /// The request was modified concurrently; re-read and retry.
    #[error("Request {0} was modified concurrently")]
    StaleState(Uuid),

    /// A request with this code already exists.
    #[error("Duplicate request code: {0}")]
    DuplicateCode(String),

    /// Could not allocate a unique code within the attempt budget.
    #[error("Code pool exhausted for prefix {prefix} after {attempts} attempts")]
    CodePoolExhausted {
        /// The code prefix being generated.
        prefix: &'static str,
        /// How many candidates were tried.
        attempts: u32,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::UnknownAction(_)
            | Self::RejectionReasonRequired
            | Self::Validation(_) => 400,

            Self::Unauthorized { .. } => 403,

            Self::NotFound(_) => 404,

            Self::StaleState(_) | Self::DuplicateCode(_) => 409,

            Self::CodePoolExhausted { .. } => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::UnknownAction(_) => "UNKNOWN_ACTION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::StaleState(_) => "STALE_STATE",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::CodePoolExhausted { .. } => "CODE_POOL_EXHAUSTED",
        }
    }

    /// Returns true if retrying after a fresh read can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StaleState(_))
    }
}

impl From<AmountError> for WorkflowError {
    fn from(err: AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}
