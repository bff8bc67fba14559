use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::comment::{self, Entity as Comment};

/// Repository for the append-only comment thread
///
/// Comments are never edited or removed once written.
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        complaint_id: i32,
        user_id: &str,
        message: &str,
    ) -> Result<comment::Model, InternalError> {
        let new_comment = comment::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            complaint_id: Set(complaint_id),
            user_id: Set(user_id.to_string()),
            message: Set(message.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        new_comment
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_comment", e))
    }

    /// Comments for a complaint, oldest first
    pub async fn list_for_complaint(
        &self,
        complaint_id: i32,
    ) -> Result<Vec<comment::Model>, InternalError> {
        Comment::find()
            .filter(comment::Column::ComplaintId.eq(complaint_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_comments", e))
    }
}
