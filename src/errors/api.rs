use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::auth::AuthError;
use crate::errors::domain::ActionError;

/// Standardized error response body for all endpoints
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// API-facing error responses
///
/// Services return domain errors; endpoints convert them here. Note the
/// two conversion paths: `From<ActionError>` for user-management
/// endpoints, and [`ApiError::concealing`] for complaint-scoped
/// endpoints, where an authorization denial must be indistinguishable
/// from a missing complaint.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed or rejected input
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// Missing or invalid credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Operation not permitted for this actor
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Target does not resolve (or the caller may not know it does)
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Concurrent modification: the caller's snapshot is stale
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Status change not reachable from the current state
    #[oai(status = 422)]
    IllegalTransition(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorBody {
            error: "validation_failed".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorBody {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(Json(ErrorBody {
            error: "forbidden".to_string(),
            message: "You do not have permission to perform this action.".to_string(),
            status_code: 403,
        }))
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(Json(ErrorBody {
            error: "not_found".to_string(),
            message: format!("{} not found.", what),
            status_code: 404,
        }))
    }

    pub fn conflict() -> Self {
        ApiError::Conflict(Json(ErrorBody {
            error: "conflict".to_string(),
            message: "The complaint was updated by someone else. Reload and try again."
                .to_string(),
            status_code: 409,
        }))
    }

    pub fn illegal_transition(message: impl Into<String>) -> Self {
        ApiError::IllegalTransition(Json(ErrorBody {
            error: "illegal_transition".to_string(),
            message: message.into(),
            status_code: 422,
        }))
    }

    pub fn internal() -> Self {
        ApiError::Internal(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: "Something went wrong. Please try again.".to_string(),
            status_code: 500,
        }))
    }

    /// Conversion for complaint-scoped endpoints: a `NotAuthorized`
    /// rejection is serialized exactly like a missing complaint, so
    /// probing ids reveals neither existence nor ownership.
    pub fn concealing(error: ActionError) -> Self {
        match error {
            ActionError::NotAuthorized | ActionError::NotFound(_) => {
                ApiError::not_found("Complaint")
            }
            other => other.into(),
        }
    }
}

impl From<ActionError> for ApiError {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::Validation(message) => ApiError::bad_request(message),
            ActionError::NotAuthorized => ApiError::forbidden(),
            ActionError::NotFound(what) => {
                // Capitalized for display; the variant carries a noun
                let mut chars = what.chars();
                let display = match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                };
                ApiError::not_found(&display)
            }
            ActionError::IllegalTransition { from, to } => ApiError::illegal_transition(format!(
                "Cannot move a complaint from {} to {}.",
                from, to
            )),
            ActionError::Conflict => ApiError::conflict(),
            ActionError::Persistence(source) => {
                tracing::error!("Persistence failure: {}", source);
                ApiError::internal()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => {
                ApiError::unauthorized("Invalid credentials or role.")
            }
            AuthError::AccountDeactivated => {
                ApiError::unauthorized("Your account has been deactivated. Contact admin.")
            }
            AuthError::Validation(message) => ApiError::bad_request(message),
            AuthError::Internal(source) => {
                tracing::error!("Auth failure: {}", source);
                ApiError::internal()
            }
        }
    }
}
