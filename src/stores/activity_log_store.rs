use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::activity_log::{self, Entity as ActivityLog};

/// Append-only activity trail keyed by complaint id
///
/// Writing is not authorization-checked here: entries are an internal
/// effect of already-authorized mutations and are never exposed as a
/// direct write surface. Entries are retained indefinitely.
pub struct ActivityLogStore {
    db: DatabaseConnection,
}

impl ActivityLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one entry for a complaint
    ///
    /// # Arguments
    /// * `complaint_id` - complaint the entry belongs to
    /// * `actor_id` - acting user, or `None` for system actions
    /// * `action` - human-readable description of the mutation
    pub async fn record(
        &self,
        complaint_id: i32,
        actor_id: Option<&str>,
        action: &str,
    ) -> Result<(), InternalError> {
        let entry = activity_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            complaint_id: Set(complaint_id),
            action: Set(action.to_string()),
            user_id: Set(actor_id.map(|id| id.to_string())),
            timestamp: Set(Utc::now().timestamp()),
        };

        entry
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("record_activity", e))?;

        Ok(())
    }

    /// Entries for a complaint, newest first, bounded by `limit`
    pub async fn history(
        &self,
        complaint_id: i32,
        limit: u64,
    ) -> Result<Vec<activity_log::Model>, InternalError> {
        ActivityLog::find()
            .filter(activity_log::Column::ComplaintId.eq(complaint_id))
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("read_activity_history", e))
    }

    /// Total number of entries recorded for a complaint
    pub async fn count_for_complaint(&self, complaint_id: i32) -> Result<u64, InternalError> {
        use sea_orm::PaginatorTrait;

        ActivityLog::find()
            .filter(activity_log::Column::ComplaintId.eq(complaint_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_activity", e))
    }
}
