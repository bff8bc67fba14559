// API layer - HTTP endpoints
pub mod admin_users;
pub mod auth;
pub mod complaints;
pub mod health;

pub use admin_users::AdminUsersApi;
pub use auth::AuthApi;
pub use complaints::ComplaintsApi;
pub use health::HealthApi;

use poem_openapi::{auth::Bearer, SecurityScheme};

use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::internal::ActorContext;

/// Bearer token authentication for protected endpoints
#[derive(SecurityScheme)]
#[oai(ty = "bearer")]
pub struct BearerAuth(pub Bearer);

/// Resolve the acting user from a bearer token
///
/// The token only locates the user; the actor snapshot (role, active
/// flag) is loaded fresh from storage so admin-side deactivation is
/// effective on the target's very next request.
pub(crate) async fn resolve_actor(
    app_data: &AppData,
    auth: &BearerAuth,
) -> Result<ActorContext, ApiError> {
    let claims = app_data
        .token_service
        .validate(&auth.0.token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token."))?;

    app_data
        .user_store
        .load_actor(&claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load actor {}: {}", claims.sub, e);
            ApiError::internal()
        })?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token."))
}
