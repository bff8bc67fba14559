use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::errors::InternalError;
use crate::types::db::complaint::{self, Entity as Complaint};
use crate::types::internal::{ComplaintScope, Status};

/// Complaint counts by status for dashboard views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

/// Repository for complaint storage operations
///
/// All writes after creation go through [`ComplaintStore::update_guarded`],
/// which compares the caller's version token against the stored row so a
/// stale update fails explicitly instead of silently overwriting.
pub struct ComplaintStore {
    db: DatabaseConnection,
}

impl ComplaintStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new complaint with status `open`, no assignee, version 1
    pub async fn insert(
        &self,
        student_id: &str,
        title: &str,
        category: &str,
        description: &str,
    ) -> Result<complaint::Model, InternalError> {
        let now = Utc::now().timestamp();

        let new_complaint = complaint::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            student_id: Set(student_id.to_string()),
            assigned_staff_id: Set(None),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            category: Set(category.to_string()),
            status: Set(Status::Open.as_str().to_string()),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_complaint
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_complaint", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<complaint::Model>, InternalError> {
        Complaint::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_complaint_by_id", e))
    }

    fn scoped(scope: &ComplaintScope) -> Select<Complaint> {
        match scope {
            ComplaintScope::Own(student_id) => {
                Complaint::find().filter(complaint::Column::StudentId.eq(student_id))
            }
            ComplaintScope::Assigned(staff_id) => {
                Complaint::find().filter(complaint::Column::AssignedStaffId.eq(staff_id))
            }
            ComplaintScope::All => Complaint::find(),
        }
    }

    /// List complaints visible within a scope
    ///
    /// Own/all listings are newest-created first; assigned listings are
    /// most-recently-updated first, since staff work the freshest item.
    pub async fn list(&self, scope: &ComplaintScope) -> Result<Vec<complaint::Model>, InternalError> {
        let query = match scope {
            ComplaintScope::Assigned(_) => {
                Self::scoped(scope).order_by_desc(complaint::Column::UpdatedAt)
            }
            _ => Self::scoped(scope).order_by_desc(complaint::Column::CreatedAt),
        };

        query
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_complaints", e))
    }

    /// Apply a status/assignee update if and only if the stored version
    /// still matches `expected_version`
    ///
    /// The row's version is bumped on success. `assignee` semantics:
    /// `None` leaves the column untouched, `Some(None)` clears it,
    /// `Some(Some(id))` assigns.
    ///
    /// # Returns
    /// * `Ok(true)` - update applied
    /// * `Ok(false)` - no row matched: the version was stale
    pub async fn update_guarded(
        &self,
        id: i32,
        expected_version: i32,
        new_status: Status,
        assignee: Option<Option<String>>,
    ) -> Result<bool, InternalError> {
        let now = Utc::now().timestamp();

        let mut update = Complaint::update_many()
            .col_expr(complaint::Column::Status, Expr::value(new_status.as_str()))
            .col_expr(complaint::Column::Version, Expr::value(expected_version + 1))
            .col_expr(complaint::Column::UpdatedAt, Expr::value(now));

        if let Some(assigned_staff_id) = assignee {
            update = update.col_expr(
                complaint::Column::AssignedStaffId,
                Expr::value(assigned_staff_id),
            );
        }

        let result = update
            .filter(complaint::Column::Id.eq(id))
            .filter(complaint::Column::Version.eq(expected_version))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_complaint_guarded", e))?;

        Ok(result.rows_affected == 1)
    }

    /// Clear every assignment held by a staff member
    ///
    /// Used when a staff user is deactivated or deleted, so no complaint
    /// keeps referencing an inactive assignee. Returns the ids of the
    /// complaints that were unassigned.
    pub async fn clear_assignee_for_staff(
        &self,
        staff_id: &str,
    ) -> Result<Vec<i32>, InternalError> {
        let assigned: Vec<i32> = Complaint::find()
            .filter(complaint::Column::AssignedStaffId.eq(staff_id))
            .select_only()
            .column(complaint::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_staff_assignments", e))?;

        if assigned.is_empty() {
            return Ok(assigned);
        }

        let now = Utc::now().timestamp();
        Complaint::update_many()
            .col_expr(
                complaint::Column::AssignedStaffId,
                Expr::value(Option::<String>::None),
            )
            .col_expr(complaint::Column::UpdatedAt, Expr::value(now))
            .filter(complaint::Column::AssignedStaffId.eq(staff_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("clear_staff_assignments", e))?;

        Ok(assigned)
    }

    /// Complaint counts by status within a scope
    pub async fn status_counts(
        &self,
        scope: &ComplaintScope,
    ) -> Result<StatusCounts, InternalError> {
        let total = Self::scoped(scope)
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_complaints", e))?;

        let mut counts = StatusCounts {
            total,
            ..StatusCounts::default()
        };

        for status in [Status::Open, Status::InProgress, Status::Resolved] {
            let count = Self::scoped(scope)
                .filter(complaint::Column::Status.eq(status.as_str()))
                .count(&self.db)
                .await
                .map_err(|e| InternalError::database("count_complaints_by_status", e))?;

            match status {
                Status::Open => counts.open = count,
                Status::InProgress => counts.in_progress = count,
                Status::Resolved => counts.resolved = count,
            }
        }

        Ok(counts)
    }
}
