use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::{ActionError, InternalError};
use crate::services::access_guard::AccessGuard;
use crate::services::lifecycle::Lifecycle;
use crate::stores::{ActivityLogStore, CommentStore, ComplaintStore, StatusCounts, UserStore};
use crate::types::db::{activity_log, comment, complaint};
use crate::types::internal::{ActorContext, Operation, Role, Status};

/// Shortest acceptable complaint description
const MIN_DESCRIPTION_CHARS: usize = 20;

/// Upper bound for one page of activity history
const MAX_HISTORY_LIMIT: u64 = 100;

/// Desired assignee state accompanying a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeUpdate {
    /// Leave the current assignee untouched
    Unchanged,
    /// Assign the given staff member
    Assign(String),
    /// Remove the current assignee
    Clear,
}

/// Complaint lifecycle orchestration
///
/// Every operation takes an explicit [`ActorContext`] and runs the same
/// sequence: authorize against the access guard, validate against the
/// lifecycle table where a status change is requested, persist through
/// the version-guarded store write, then record exactly one activity
/// entry. Rejected calls mutate nothing and record nothing.
pub struct ComplaintService {
    complaint_store: Arc<ComplaintStore>,
    comment_store: Arc<CommentStore>,
    activity_log_store: Arc<ActivityLogStore>,
    user_store: Arc<UserStore>,
}

impl ComplaintService {
    /// Create a ComplaintService from AppData
    ///
    /// Extracts only the stores this service needs from the centralized
    /// AppData, following the main-owned stores pattern.
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            complaint_store: app_data.complaint_store.clone(),
            comment_store: app_data.comment_store.clone(),
            activity_log_store: app_data.activity_log_store.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    fn parse_status(complaint: &complaint::Model) -> Result<Status, ActionError> {
        Status::parse(&complaint.status).ok_or_else(|| {
            ActionError::Persistence(InternalError::parse(
                "status",
                format!(
                    "unknown status '{}' on complaint {}",
                    complaint.status, complaint.id
                ),
            ))
        })
    }

    /// File a new complaint
    ///
    /// Only active students create complaints; the creator becomes the
    /// owner for the lifetime of the record. New complaints start `open`
    /// and unassigned, and creation itself is recorded in the activity
    /// trail.
    ///
    /// # Errors
    /// * `NotAuthorized` - actor is not an active student
    /// * `Validation` - missing fields or a description under 20 characters
    pub async fn create_complaint(
        &self,
        actor: &ActorContext,
        title: &str,
        category: &str,
        description: &str,
    ) -> Result<complaint::Model, ActionError> {
        if !actor.active || actor.role != Role::Student {
            return Err(ActionError::NotAuthorized);
        }

        let title = title.trim();
        let category = category.trim();
        if title.is_empty() || category.is_empty() || description.trim().is_empty() {
            return Err(ActionError::validation("All fields are required."));
        }
        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(ActionError::validation(
                "Description must be at least 20 characters.",
            ));
        }

        let complaint = self
            .complaint_store
            .insert(&actor.id, title, category, description)
            .await?;

        self.activity_log_store
            .record(complaint.id, Some(&actor.id), "Complaint created")
            .await?;

        tracing::info!(
            "Complaint {} created by student {}",
            complaint.id,
            actor.id
        );

        Ok(complaint)
    }

    /// Fetch one complaint the actor is permitted to view
    pub async fn view_complaint(
        &self,
        actor: &ActorContext,
        complaint_id: i32,
    ) -> Result<complaint::Model, ActionError> {
        let complaint = self
            .complaint_store
            .find_by_id(complaint_id)
            .await?
            .ok_or(ActionError::NotFound("complaint"))?;

        let ops = AccessGuard::permitted_operations(actor, &complaint);
        if !ops.allows(Operation::View) {
            return Err(ActionError::NotAuthorized);
        }

        Ok(complaint)
    }

    /// List the complaints in the actor's scope
    ///
    /// Students see their own complaints, staff see their assignments,
    /// admins see everything.
    pub async fn list_complaints(
        &self,
        actor: &ActorContext,
    ) -> Result<Vec<complaint::Model>, ActionError> {
        if !actor.active {
            return Err(ActionError::NotAuthorized);
        }

        Ok(self.complaint_store.list(&actor.scope()).await?)
    }

    /// Complaint counts by status within the actor's scope
    pub async fn status_counts(&self, actor: &ActorContext) -> Result<StatusCounts, ActionError> {
        if !actor.active {
            return Err(ActionError::NotAuthorized);
        }

        Ok(self.complaint_store.status_counts(&actor.scope()).await?)
    }

    /// Apply a status and/or assignee change to a complaint
    ///
    /// Validation order: authorization first (transition, plus assign
    /// when the assignee changes), then reachability against the
    /// lifecycle table when the status actually changes, then the
    /// active-staff check on a new assignee. The write itself is
    /// compare-and-swapped on the version read here, so a concurrent
    /// update surfaces as `Conflict` instead of being overwritten.
    ///
    /// A call whose target status equals the current status is an
    /// assignment-only update; one that changes neither field is
    /// rejected before any write.
    ///
    /// # Returns
    /// The updated complaint. Exactly one activity entry is recorded,
    /// naming the acting user and the prior and new state.
    pub async fn apply_transition(
        &self,
        actor: &ActorContext,
        complaint_id: i32,
        new_status: Status,
        assignee: AssigneeUpdate,
    ) -> Result<complaint::Model, ActionError> {
        let complaint = self
            .complaint_store
            .find_by_id(complaint_id)
            .await?
            .ok_or(ActionError::NotFound("complaint"))?;

        let ops = AccessGuard::permitted_operations(actor, &complaint);
        if !ops.allows(Operation::Transition) {
            return Err(ActionError::NotAuthorized);
        }
        if assignee != AssigneeUpdate::Unchanged && !ops.allows(Operation::Assign) {
            return Err(ActionError::NotAuthorized);
        }

        let current = Self::parse_status(&complaint)?;
        let status_changes = new_status != current;
        if status_changes && !Lifecycle::can_transition(actor.role, current, new_status) {
            return Err(ActionError::IllegalTransition {
                from: current,
                to: new_status,
            });
        }

        let assignee_column = match &assignee {
            AssigneeUpdate::Unchanged => None,
            AssigneeUpdate::Clear => Some(None),
            AssigneeUpdate::Assign(staff_id) => {
                let staff = self
                    .user_store
                    .find_by_id(staff_id)
                    .await?
                    .filter(|u| u.is_active && Role::parse(&u.role) == Some(Role::Staff))
                    .ok_or_else(|| {
                        ActionError::validation("Assignee must be an active staff member.")
                    })?;
                Some(Some(staff.id))
            }
        };

        let assignee_changes = match &assignee_column {
            None => false,
            Some(new_value) => complaint.assigned_staff_id.as_deref() != new_value.as_deref(),
        };

        if !status_changes && !assignee_changes {
            return Err(ActionError::IllegalTransition {
                from: current,
                to: new_status,
            });
        }

        let applied = self
            .complaint_store
            .update_guarded(complaint.id, complaint.version, new_status, assignee_column)
            .await?;
        if !applied {
            return Err(ActionError::Conflict);
        }

        let mut changes = Vec::new();
        if status_changes {
            changes.push(format!("status {} -> {}", current, new_status));
        }
        if assignee_changes {
            match &assignee {
                AssigneeUpdate::Assign(staff_id) => {
                    changes.push(format!("assigned to {}", staff_id))
                }
                AssigneeUpdate::Clear => changes.push("unassigned".to_string()),
                AssigneeUpdate::Unchanged => {}
            }
        }
        let action = changes.join(", ");

        self.activity_log_store
            .record(complaint.id, Some(&actor.id), &action)
            .await?;

        tracing::info!(
            "Complaint {} updated by {} ({}): {}",
            complaint.id,
            actor.id,
            actor.role,
            action
        );

        self.complaint_store
            .find_by_id(complaint.id)
            .await?
            .ok_or(ActionError::NotFound("complaint"))
    }

    /// Append a comment to a complaint's thread
    ///
    /// The message must be non-empty after trimming. A successful append
    /// never touches the complaint's status; it records one `Comment
    /// added` activity entry.
    pub async fn append_comment(
        &self,
        actor: &ActorContext,
        complaint_id: i32,
        message: &str,
    ) -> Result<comment::Model, ActionError> {
        if message.trim().is_empty() {
            return Err(ActionError::validation("Comment cannot be empty."));
        }

        let complaint = self
            .complaint_store
            .find_by_id(complaint_id)
            .await?
            .ok_or(ActionError::NotFound("complaint"))?;

        let ops = AccessGuard::permitted_operations(actor, &complaint);
        if !ops.allows(Operation::Comment) {
            return Err(ActionError::NotAuthorized);
        }

        let comment = self
            .comment_store
            .insert(complaint.id, &actor.id, message)
            .await?;

        self.activity_log_store
            .record(complaint.id, Some(&actor.id), "Comment added")
            .await?;

        Ok(comment)
    }

    /// Comments on a complaint, oldest first
    ///
    /// Visible to every actor permitted to view the complaint.
    pub async fn list_comments(
        &self,
        actor: &ActorContext,
        complaint_id: i32,
    ) -> Result<Vec<comment::Model>, ActionError> {
        let complaint = self.view_complaint(actor, complaint_id).await?;
        Ok(self.comment_store.list_for_complaint(complaint.id).await?)
    }

    /// Activity entries for a complaint, newest first
    ///
    /// Readable by any actor permitted to view the complaint. The limit
    /// is clamped so one request never pulls an unbounded trail.
    pub async fn get_history(
        &self,
        actor: &ActorContext,
        complaint_id: i32,
        limit: u64,
    ) -> Result<Vec<activity_log::Model>, ActionError> {
        let complaint = self.view_complaint(actor, complaint_id).await?;
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        Ok(self.activity_log_store.history(complaint.id, limit).await?)
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod complaint_service_tests;
