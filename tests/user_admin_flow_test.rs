// Admin user management interacting with the complaint lifecycle:
// deactivation cuts off access immediately and assignments are cleaned
// up so the active-staff assignee invariant keeps holding.

mod common;

use common::{actor_for, create_user, setup_app_data};

use complaint_desk_backend::errors::ActionError;
use complaint_desk_backend::services::{
    AccessGuard, AssigneeUpdate, ComplaintService, UserAdminService,
};
use complaint_desk_backend::types::internal::{Role, Status};

#[tokio::test]
async fn deactivated_staff_lose_access_and_assignments() {
    let app_data = setup_app_data().await;
    let complaint_service = ComplaintService::new(app_data.clone());
    let admin_service = UserAdminService::new(app_data.clone());

    let student = create_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
    let staff = create_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
    let admin = create_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

    let complaint = complaint_service
        .create_complaint(
            &actor_for(&student),
            "Broken projector",
            "Facilities",
            "The projector in room 204 is broken",
        )
        .await
        .unwrap();

    complaint_service
        .apply_transition(
            &actor_for(&admin),
            complaint.id,
            Status::InProgress,
            AssigneeUpdate::Assign(staff.id.clone()),
        )
        .await
        .unwrap();

    admin_service
        .toggle_active(&actor_for(&admin), &staff.id)
        .await
        .unwrap();

    // The assignment is gone
    let reloaded = complaint_service
        .view_complaint(&actor_for(&admin), complaint.id)
        .await
        .unwrap();
    assert_eq!(reloaded.assigned_staff_id, None);

    // A fresh actor snapshot reflects the deactivation: no operations
    // at all, even if an assignment had survived
    let actor = app_data
        .user_store
        .load_actor(&staff.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!actor.active);
    assert!(AccessGuard::permitted_operations(&actor, &reloaded).is_empty());

    // And the deactivated staff member cannot be re-assigned
    let result = complaint_service
        .apply_transition(
            &actor_for(&admin),
            complaint.id,
            Status::InProgress,
            AssigneeUpdate::Assign(staff.id.clone()),
        )
        .await;
    assert!(matches!(result, Err(ActionError::Validation(_))));
}

#[tokio::test]
async fn admin_self_management_is_always_denied() {
    let app_data = setup_app_data().await;
    let admin_service = UserAdminService::new(app_data.clone());

    let admin = create_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
    let second_admin = create_user(&app_data, "Root", "root@campus.edu", Role::Admin).await;

    // Self-targeting fails for every admin
    for a in [&admin, &second_admin] {
        let result = admin_service.toggle_active(&actor_for(a), &a.id).await;
        assert!(matches!(result, Err(ActionError::NotAuthorized)));

        let result = admin_service.delete_user(&actor_for(a), &a.id).await;
        assert!(matches!(result, Err(ActionError::NotAuthorized)));
    }

    // Managing each other is fine
    let toggled = admin_service
        .toggle_active(&actor_for(&admin), &second_admin.id)
        .await
        .unwrap();
    assert!(!toggled.is_active);
}

#[tokio::test]
async fn deleting_a_staff_member_preserves_the_record_trail() {
    let app_data = setup_app_data().await;
    let complaint_service = ComplaintService::new(app_data.clone());
    let admin_service = UserAdminService::new(app_data.clone());

    let student = create_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
    let staff = create_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
    let admin = create_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

    let complaint = complaint_service
        .create_complaint(
            &actor_for(&student),
            "Noisy construction at dawn",
            "Hostel",
            "Construction noise starts before six",
        )
        .await
        .unwrap();

    complaint_service
        .apply_transition(
            &actor_for(&admin),
            complaint.id,
            Status::InProgress,
            AssigneeUpdate::Assign(staff.id.clone()),
        )
        .await
        .unwrap();
    complaint_service
        .append_comment(&actor_for(&staff), complaint.id, "Raised with the contractor")
        .await
        .unwrap();

    admin_service
        .delete_user(&actor_for(&admin), &staff.id)
        .await
        .unwrap();

    assert!(app_data
        .user_store
        .find_by_id(&staff.id)
        .await
        .unwrap()
        .is_none());

    // Comments and activity entries survive as the historical record,
    // still carrying the deleted user's id
    let thread = complaint_service
        .list_comments(&actor_for(&student), complaint.id)
        .await
        .unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].user_id, staff.id);

    let entries = complaint_service
        .get_history(&actor_for(&student), complaint.id, 10)
        .await
        .unwrap();
    assert!(entries
        .iter()
        .any(|e| e.user_id.as_deref() == Some(staff.id.as_str())));
}
