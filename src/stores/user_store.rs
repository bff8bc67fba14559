use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::{ActorContext, Role};

/// User counts by role for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub students: u64,
    pub staff: u64,
    pub admins: u64,
}

/// Repository for user storage operations
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new user with a generated id and active flag set
    ///
    /// The caller is responsible for validating inputs and hashing the
    /// password; the store persists what it is given.
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<user::Model, InternalError> {
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_user", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Login lookup: the original flow matches on email and role together
    pub async fn find_by_email_and_role(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Role.eq(role.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email_and_role", e))
    }

    pub async fn list_all(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    pub async fn list_active_staff(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Role.eq(Role::Staff.as_str()))
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_active_staff", e))
    }

    /// Set the active flag on a user
    ///
    /// # Returns
    /// * `Ok(true)` - flag written
    /// * `Ok(false)` - no such user
    pub async fn set_active(&self, id: &str, active: bool) -> Result<bool, InternalError> {
        let now = Utc::now().timestamp();

        let result = User::update_many()
            .col_expr(user::Column::IsActive, Expr::value(active))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("set_user_active", e))?;

        Ok(result.rows_affected == 1)
    }

    pub async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<bool, InternalError> {
        let now = Utc::now().timestamp();

        let result = User::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user_password", e))?;

        Ok(result.rows_affected == 1)
    }

    /// Delete a user row. Irreversible.
    pub async fn delete(&self, id: &str) -> Result<bool, InternalError> {
        let result = User::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        Ok(result.rows_affected == 1)
    }

    /// Load the actor snapshot for an authenticated user id
    ///
    /// This is re-read on every request rather than cached in the token,
    /// so a deactivation takes effect on the target's next action.
    pub async fn load_actor(&self, id: &str) -> Result<Option<ActorContext>, InternalError> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let role = Role::parse(&user.role).ok_or_else(|| {
            InternalError::parse("role", format!("unknown role '{}' on user {}", user.role, id))
        })?;

        Ok(Some(ActorContext::new(user.id, role, user.is_active)))
    }

    pub async fn count_by_role(&self) -> Result<RoleCounts, InternalError> {
        let mut counts = RoleCounts::default();

        for role in [Role::Student, Role::Staff, Role::Admin] {
            let count = User::find()
                .filter(user::Column::Role.eq(role.as_str()))
                .count(&self.db)
                .await
                .map_err(|e| InternalError::database("count_users_by_role", e))?;

            match role {
                Role::Student => counts.students = count,
                Role::Staff => counts.staff = count,
                Role::Admin => counts.admins = count,
            }
        }

        Ok(counts)
    }
}
