use std::sync::Arc;

use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};

use crate::api::{resolve_actor, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{AssigneeUpdate, ComplaintService};
use crate::types::dto::complaints::{
    ActivityEntryView, CommentView, ComplaintView, CreateCommentRequest, CreateComplaintRequest,
    ManageComplaintRequest, StatusCountsView, TransitionRequest,
};
use crate::types::internal::Status;

/// Default page size for activity history, matching the detail views
const DEFAULT_HISTORY_LIMIT: u64 = 10;

#[derive(Tags)]
enum ComplaintTags {
    Complaints,
}

/// Complaint endpoints for all three roles
///
/// The same routes serve students, staff and admins; what each caller
/// may see and do is decided by the service layer per complaint, never
/// by the route shape.
pub struct ComplaintsApi {
    complaint_service: ComplaintService,
    app_data: Arc<AppData>,
}

impl ComplaintsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            complaint_service: ComplaintService::new(app_data.clone()),
            app_data,
        }
    }

    fn parse_status(status: &str) -> Result<Status, ApiError> {
        Status::parse(status)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown status '{}'.", status)))
    }
}

#[OpenApi(prefix_path = "/complaints")]
impl ComplaintsApi {
    /// List the complaints visible to the caller
    #[oai(path = "/", method = "get", tag = "ComplaintTags::Complaints")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<ComplaintView>>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let complaints = self
            .complaint_service
            .list_complaints(&actor)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(complaints.into_iter().map(Into::into).collect()))
    }

    /// File a new complaint (students only)
    #[oai(path = "/", method = "post", tag = "ComplaintTags::Complaints")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateComplaintRequest>,
    ) -> Result<Json<ComplaintView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let complaint = self
            .complaint_service
            .create_complaint(&actor, &body.title, &body.category, &body.description)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(complaint.into()))
    }

    /// Complaint counts by status within the caller's scope
    #[oai(path = "/stats", method = "get", tag = "ComplaintTags::Complaints")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<StatusCountsView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let counts = self
            .complaint_service
            .status_counts(&actor)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(counts.into()))
    }

    /// Fetch one complaint
    #[oai(path = "/:id", method = "get", tag = "ComplaintTags::Complaints")]
    async fn view(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<ComplaintView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let complaint = self
            .complaint_service
            .view_complaint(&actor, id.0)
            .await
            .map_err(ApiError::concealing)?;

        Ok(Json(complaint.into()))
    }

    /// Change a complaint's status, optionally attaching a note
    ///
    /// For the assigned staff member and admins. The assignee is left
    /// untouched; admins change assignments through `manage`.
    #[oai(
        path = "/:id/transition",
        method = "post",
        tag = "ComplaintTags::Complaints"
    )]
    async fn transition(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<TransitionRequest>,
    ) -> Result<Json<ComplaintView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;
        let new_status = Self::parse_status(&body.status)?;

        let complaint = self
            .complaint_service
            .apply_transition(&actor, id.0, new_status, AssigneeUpdate::Unchanged)
            .await
            .map_err(ApiError::concealing)?;

        if let Some(note) = body.note.as_deref() {
            if !note.trim().is_empty() {
                self.complaint_service
                    .append_comment(&actor, id.0, note)
                    .await
                    .map_err(ApiError::concealing)?;
            }
        }

        Ok(Json(complaint.into()))
    }

    /// Set a complaint's full status/assignee state (admins only)
    ///
    /// An absent or blank `assigned_staff_id` unassigns the complaint.
    /// Keeping the current status while changing the assignee is valid.
    #[oai(path = "/:id/manage", method = "post", tag = "ComplaintTags::Complaints")]
    async fn manage(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<ManageComplaintRequest>,
    ) -> Result<Json<ComplaintView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;
        let new_status = Self::parse_status(&body.status)?;

        let assignee = match body.assigned_staff_id.as_deref() {
            Some(staff_id) if !staff_id.trim().is_empty() => {
                AssigneeUpdate::Assign(staff_id.trim().to_string())
            }
            _ => AssigneeUpdate::Clear,
        };

        let complaint = self
            .complaint_service
            .apply_transition(&actor, id.0, new_status, assignee)
            .await
            .map_err(ApiError::concealing)?;

        Ok(Json(complaint.into()))
    }

    /// Comments on a complaint, oldest first
    #[oai(path = "/:id/comments", method = "get", tag = "ComplaintTags::Complaints")]
    async fn list_comments(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<Vec<CommentView>>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let comments = self
            .complaint_service
            .list_comments(&actor, id.0)
            .await
            .map_err(ApiError::concealing)?;

        Ok(Json(comments.into_iter().map(Into::into).collect()))
    }

    /// Append a comment to a complaint
    #[oai(
        path = "/:id/comments",
        method = "post",
        tag = "ComplaintTags::Complaints"
    )]
    async fn add_comment(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<CreateCommentRequest>,
    ) -> Result<Json<CommentView>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let comment = self
            .complaint_service
            .append_comment(&actor, id.0, &body.message)
            .await
            .map_err(ApiError::concealing)?;

        Ok(Json(comment.into()))
    }

    /// Activity history for a complaint, newest first
    #[oai(path = "/:id/history", method = "get", tag = "ComplaintTags::Complaints")]
    async fn history(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<ActivityEntryView>>, ApiError> {
        let actor = resolve_actor(&self.app_data, &auth).await?;

        let entries = self
            .complaint_service
            .get_history(&actor, id.0, limit.0.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
            .map_err(ApiError::concealing)?;

        Ok(Json(entries.into_iter().map(Into::into).collect()))
    }
}
