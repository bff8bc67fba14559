use thiserror::Error;

use crate::errors::InternalError;
use crate::types::internal::Status;

/// Typed rejection for complaint and user-management actions
///
/// Every expected business condition maps to one of these variants; an
/// action never surfaces an opaque failure for something the caller can
/// correct or retry. All variants are recoverable at the action
/// boundary.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Malformed input: user-correctable, surfaced directly
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Actor lacks the required operation for the target. Surfaced
    /// generically so callers learn nothing about existence or
    /// ownership of the target.
    #[error("Not authorized")]
    NotAuthorized,

    /// Target id did not resolve
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Requested status change is not reachable from the current state
    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition { from: Status, to: Status },

    /// The complaint was modified concurrently; the caller holds a
    /// stale snapshot and must re-read before retrying
    #[error("Complaint was modified concurrently")]
    Conflict,

    /// Underlying store failure; logged internally, surfaced generically
    #[error(transparent)]
    Persistence(#[from] InternalError),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        ActionError::Validation(message.into())
    }
}
