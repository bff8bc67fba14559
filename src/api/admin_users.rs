use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{resolve_actor, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{ComplaintService, UserAdminService};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::users::{AdminStatsView, UserView};

#[derive(Tags)]
enum AdminTags {
    /// Admin user management
    Admin,
}

/// Admin user management API endpoints
pub struct AdminUsersApi {
    user_admin_service: UserAdminService,
    complaint_service: ComplaintService,
    app_data: Arc<AppData>,
}

impl AdminUsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_admin_service: UserAdminService::new(app_data.clone()),
            complaint_service: ComplaintService::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi(prefix_path = "/admin")]
impl AdminUsersApi {
    /// All user accounts, newest first
    #[oai(path = "/users", method = "get", tag = "AdminTags::Admin")]
    async fn list_users(&self, auth: BearerAuth) -> Result<Json<Vec<UserView>>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let users = self
            .user_admin_service
            .list_users(&actor)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(users.into_iter().map(Into::into).collect()))
    }

    /// Active staff members, for the assignment picker
    #[oai(path = "/users/staff", method = "get", tag = "AdminTags::Admin")]
    async fn list_staff(&self, auth: BearerAuth) -> Result<Json<Vec<UserView>>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let staff = self
            .user_admin_service
            .list_active_staff(&actor)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(staff.into_iter().map(Into::into).collect()))
    }

    /// Flip a user's active flag
    #[oai(path = "/users/:id/toggle", method = "post", tag = "AdminTags::Admin")]
    async fn toggle_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<UserView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let user = self
            .user_admin_service
            .toggle_active(&actor, &id.0)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(user.into()))
    }

    /// Delete a user account. Irreversible.
    #[oai(path = "/users/:id/delete", method = "post", tag = "AdminTags::Admin")]
    async fn delete_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        self.user_admin_service
            .delete_user(&actor, &id.0)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(MessageResponse::new("User deleted.")))
    }

    /// Dashboard statistics: complaint and user counts
    #[oai(path = "/stats", method = "get", tag = "AdminTags::Admin")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<AdminStatsView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let users = self
            .user_admin_service
            .role_counts(&actor)
            .await
            .map_err(ApiError::from)?;

        let complaints = self
            .complaint_service
            .status_counts(&actor)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(AdminStatsView::new(complaints, users)))
    }
}
