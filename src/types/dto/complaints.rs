use poem_openapi::Object;

use crate::stores::StatusCounts;
use crate::types::db::{activity_log, comment, complaint};

/// Full view of a complaint
///
/// `version` is the optimistic concurrency token; clients that want to
/// detect concurrent edits can compare it across reads.
#[derive(Object, Debug, Clone)]
pub struct ComplaintView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub student_id: String,
    pub assigned_staff_id: Option<String>,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<complaint::Model> for ComplaintView {
    fn from(c: complaint::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            category: c.category,
            status: c.status,
            student_id: c.student_id,
            assigned_staff_id: c.assigned_staff_id,
            version: c.version,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct CreateComplaintRequest {
    pub title: String,
    pub category: String,
    /// At least 20 characters
    pub description: String,
}

/// Status change request for the assignee (or an admin)
///
/// An optional note is appended to the comment thread after a
/// successful transition.
#[derive(Object, Debug)]
pub struct TransitionRequest {
    /// Target status: "open", "in_progress" or "resolved"
    pub status: String,
    pub note: Option<String>,
}

/// Admin update carrying the full desired state
///
/// An absent or blank `assigned_staff_id` unassigns the complaint.
#[derive(Object, Debug)]
pub struct ManageComplaintRequest {
    pub status: String,
    pub assigned_staff_id: Option<String>,
}

#[derive(Object, Debug)]
pub struct CreateCommentRequest {
    pub message: String,
}

#[derive(Object, Debug, Clone)]
pub struct CommentView {
    pub id: i32,
    pub complaint_id: i32,
    pub user_id: String,
    pub message: String,
    pub created_at: i64,
}

impl From<comment::Model> for CommentView {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            complaint_id: c.complaint_id,
            user_id: c.user_id,
            message: c.message,
            created_at: c.created_at,
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct ActivityEntryView {
    pub id: i32,
    pub action: String,
    /// Acting user, absent for system actions
    pub user_id: Option<String>,
    pub timestamp: i64,
}

impl From<activity_log::Model> for ActivityEntryView {
    fn from(entry: activity_log::Model) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            user_id: entry.user_id,
            timestamp: entry.timestamp,
        }
    }
}

/// Complaint counts by status
#[derive(Object, Debug)]
pub struct StatusCountsView {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

impl From<StatusCounts> for StatusCountsView {
    fn from(counts: StatusCounts) -> Self {
        Self {
            total: counts.total,
            open: counts.open,
            in_progress: counts.in_progress,
            resolved: counts.resolved,
        }
    }
}
