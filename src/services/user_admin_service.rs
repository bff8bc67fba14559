use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::ActionError;
use crate::services::access_guard::AccessGuard;
use crate::stores::{ActivityLogStore, ComplaintStore, RoleCounts, UserStore};
use crate::types::db::user;
use crate::types::internal::{ActorContext, Role};

/// Admin user management: listing, activation toggles and deletion
///
/// Both mutations run through the access guard's self-target check, so
/// an admin can never deactivate or delete their own account. When the
/// target is a staff member, their complaint assignments are cleared in
/// the same operation so no complaint keeps pointing at an inactive or
/// missing assignee; each cleared complaint gets its own activity entry.
pub struct UserAdminService {
    user_store: Arc<UserStore>,
    complaint_store: Arc<ComplaintStore>,
    activity_log_store: Arc<ActivityLogStore>,
}

impl UserAdminService {
    /// Create a UserAdminService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            complaint_store: app_data.complaint_store.clone(),
            activity_log_store: app_data.activity_log_store.clone(),
        }
    }

    fn require_admin(actor: &ActorContext) -> Result<(), ActionError> {
        if actor.active && actor.role == Role::Admin {
            Ok(())
        } else {
            Err(ActionError::NotAuthorized)
        }
    }

    /// All users, newest first. Admin only.
    pub async fn list_users(&self, actor: &ActorContext) -> Result<Vec<user::Model>, ActionError> {
        Self::require_admin(actor)?;
        Ok(self.user_store.list_all().await?)
    }

    /// Active staff members, for the assignment picker. Admin only.
    pub async fn list_active_staff(
        &self,
        actor: &ActorContext,
    ) -> Result<Vec<user::Model>, ActionError> {
        Self::require_admin(actor)?;
        Ok(self.user_store.list_active_staff().await?)
    }

    /// User counts by role. Admin only.
    pub async fn role_counts(&self, actor: &ActorContext) -> Result<RoleCounts, ActionError> {
        Self::require_admin(actor)?;
        Ok(self.user_store.count_by_role().await?)
    }

    /// Flip a user's active flag
    ///
    /// Deactivating a staff member clears their assignments. Reactivation
    /// does not restore them; complaints stay unassigned until an admin
    /// reassigns.
    ///
    /// # Errors
    /// * `NotAuthorized` - caller is not an active admin, or targets themselves
    /// * `NotFound` - target id does not resolve
    pub async fn toggle_active(
        &self,
        actor: &ActorContext,
        target_user_id: &str,
    ) -> Result<user::Model, ActionError> {
        if !AccessGuard::can_manage_user(actor, target_user_id) {
            return Err(ActionError::NotAuthorized);
        }

        let target = self
            .user_store
            .find_by_id(target_user_id)
            .await?
            .ok_or(ActionError::NotFound("user"))?;

        let new_active = !target.is_active;
        self.user_store.set_active(&target.id, new_active).await?;

        if !new_active && Role::parse(&target.role) == Some(Role::Staff) {
            self.clear_staff_assignments(actor, &target.id, "staff account deactivated")
                .await?;
        }

        tracing::info!(
            "User {} {} by admin {}",
            target.id,
            if new_active { "activated" } else { "deactivated" },
            actor.id
        );

        self.user_store
            .find_by_id(&target.id)
            .await?
            .ok_or(ActionError::NotFound("user"))
    }

    /// Delete a user account. Irreversible.
    ///
    /// # Errors
    /// * `NotAuthorized` - caller is not an active admin, or targets themselves
    /// * `NotFound` - target id does not resolve
    pub async fn delete_user(
        &self,
        actor: &ActorContext,
        target_user_id: &str,
    ) -> Result<(), ActionError> {
        if !AccessGuard::can_manage_user(actor, target_user_id) {
            return Err(ActionError::NotAuthorized);
        }

        let target = self
            .user_store
            .find_by_id(target_user_id)
            .await?
            .ok_or(ActionError::NotFound("user"))?;

        if Role::parse(&target.role) == Some(Role::Staff) {
            self.clear_staff_assignments(actor, &target.id, "staff account deleted")
                .await?;
        }

        self.user_store.delete(&target.id).await?;

        tracing::info!("User {} deleted by admin {}", target.id, actor.id);

        Ok(())
    }

    async fn clear_staff_assignments(
        &self,
        actor: &ActorContext,
        staff_id: &str,
        reason: &str,
    ) -> Result<(), ActionError> {
        let cleared = self.complaint_store.clear_assignee_for_staff(staff_id).await?;

        for complaint_id in &cleared {
            self.activity_log_store
                .record(
                    *complaint_id,
                    Some(&actor.id),
                    &format!("Assignee removed: {}", reason),
                )
                .await?;
        }

        if !cleared.is_empty() {
            tracing::info!(
                "Cleared {} assignment(s) of staff {} ({})",
                cleared.len(),
                staff_id,
                reason
            );
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "user_admin_service_tests.rs"]
mod user_admin_service_tests;
