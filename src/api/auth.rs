use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{resolve_actor, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::AuthService;
use crate::types::dto::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::users::UserView;

#[derive(Tags)]
enum AuthTags {
    Authentication,
}

/// Registration, login and account self-service endpoints
pub struct AuthApi {
    auth_service: AuthService,
    app_data: Arc<AppData>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: AuthService::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Create a new account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<Json<UserView>, ApiError> {
        let user = self
            .auth_service
            .register(
                &body.name,
                &body.email,
                &body.password,
                &body.confirm_password,
                &body.role,
            )
            .await?;

        Ok(Json(user.into()))
    }

    /// Verify credentials and obtain a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
        let (user, token) = self
            .auth_service
            .login(&body.email, &body.password, &body.role)
            .await?;

        Ok(Json(LoginResponse {
            token,
            user: user.into(),
        }))
    }

    /// Change the caller's own password
    #[oai(
        path = "/change-password",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn change_password(
        &self,
        auth: BearerAuth,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        self.auth_service
            .change_password(
                &actor.id,
                &body.current_password,
                &body.new_password,
                &body.confirm_new,
            )
            .await?;

        Ok(Json(MessageResponse::new("Password updated.")))
    }

    /// The caller's own profile
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let user = self
            .app_data
            .user_store
            .find_by_id(&actor.id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load profile {}: {}", actor.id, e);
                ApiError::internal()
            })?
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired token."))?;

        Ok(Json(user.into()))
    }
}
