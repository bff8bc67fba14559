use thiserror::Error;

use crate::errors::InternalError;

/// Errors surfaced by registration, login and password changes
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/role pair unknown or password mismatch. One variant for
    /// both so the response never reveals which part was wrong.
    #[error("Invalid credentials or role")]
    InvalidCredentials,

    /// Account exists but has been deactivated by an admin
    #[error("Account deactivated")]
    AccountDeactivated,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }
}
