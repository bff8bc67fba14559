#[cfg(test)]
mod tests {
    use super::super::UserAdminService;
    use crate::errors::ActionError;
    use crate::services::{AssigneeUpdate, ComplaintService};
    use crate::test::utils::{
        actor_for, create_test_complaint, create_test_user, setup_app_data,
    };
    use crate::types::internal::{Role, Status};

    // ==================== Test Group 1: authorization ====================

    mod authorization_tests {
        use super::*;

        #[tokio::test]
        async fn admin_cannot_toggle_or_delete_themselves() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
            let actor = actor_for(&admin);

            let result = service.toggle_active(&actor, &admin.id).await;
            assert!(matches!(result, Err(ActionError::NotAuthorized)));

            let result = service.delete_user(&actor, &admin.id).await;
            assert!(matches!(result, Err(ActionError::NotAuthorized)));

            // Still present and active
            let reloaded = app_data
                .user_store
                .find_by_id(&admin.id)
                .await
                .unwrap()
                .unwrap();
            assert!(reloaded.is_active);
        }

        #[tokio::test]
        async fn non_admins_cannot_manage_users() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let student =
                create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
            let staff = create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
            let target = create_test_user(&app_data, "Ben", "ben@campus.edu", Role::Student).await;

            for caller in [&student, &staff] {
                let result = service.toggle_active(&actor_for(caller), &target.id).await;
                assert!(matches!(result, Err(ActionError::NotAuthorized)));

                let result = service.delete_user(&actor_for(caller), &target.id).await;
                assert!(matches!(result, Err(ActionError::NotAuthorized)));

                let result = service.list_users(&actor_for(caller)).await;
                assert!(matches!(result, Err(ActionError::NotAuthorized)));
            }
        }

        #[tokio::test]
        async fn deactivated_admin_loses_management_access() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
            let target = create_test_user(&app_data, "Ben", "ben@campus.edu", Role::Student).await;

            app_data.user_store.set_active(&admin.id, false).await.unwrap();
            let actor = app_data
                .user_store
                .load_actor(&admin.id)
                .await
                .unwrap()
                .unwrap();

            let result = service.toggle_active(&actor, &target.id).await;
            assert!(matches!(result, Err(ActionError::NotAuthorized)));
        }

        #[tokio::test]
        async fn unknown_target_is_not_found() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

            let result = service
                .toggle_active(&actor_for(&admin), "no-such-user")
                .await;
            assert!(matches!(result, Err(ActionError::NotFound(_))));

            let result = service.delete_user(&actor_for(&admin), "no-such-user").await;
            assert!(matches!(result, Err(ActionError::NotFound(_))));
        }
    }

    // ==================== Test Group 2: toggle_active() ====================

    mod toggle_tests {
        use super::*;

        #[tokio::test]
        async fn toggle_flips_the_active_flag_both_ways() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
            let target = create_test_user(&app_data, "Ben", "ben@campus.edu", Role::Student).await;
            let actor = actor_for(&admin);

            let toggled = service.toggle_active(&actor, &target.id).await.unwrap();
            assert!(!toggled.is_active);

            let toggled = service.toggle_active(&actor, &target.id).await.unwrap();
            assert!(toggled.is_active);
        }

        #[tokio::test]
        async fn deactivating_staff_clears_their_assignments() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());
            let complaint_service = ComplaintService::new(app_data.clone());

            let student =
                create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
            let staff = create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

            let c1 = create_test_complaint(&app_data, &student).await;
            let c2 = create_test_complaint(&app_data, &student).await;

            for c in [&c1, &c2] {
                complaint_service
                    .apply_transition(
                        &actor_for(&admin),
                        c.id,
                        Status::InProgress,
                        AssigneeUpdate::Assign(staff.id.clone()),
                    )
                    .await
                    .unwrap();
            }

            service
                .toggle_active(&actor_for(&admin), &staff.id)
                .await
                .unwrap();

            for c in [&c1, &c2] {
                let reloaded = app_data
                    .complaint_store
                    .find_by_id(c.id)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(reloaded.assigned_staff_id, None);
                // Status is untouched by the cleanup
                assert_eq!(reloaded.status, Status::InProgress.as_str());

                // The cleanup left its own trail entry naming the admin
                let entries = app_data.activity_log_store.history(c.id, 1).await.unwrap();
                assert!(entries[0].action.starts_with("Assignee removed"));
                assert_eq!(entries[0].user_id.as_deref(), Some(admin.id.as_str()));
            }
        }

        #[tokio::test]
        async fn reactivation_does_not_restore_assignments() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());
            let complaint_service = ComplaintService::new(app_data.clone());

            let student =
                create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
            let staff = create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

            let complaint = create_test_complaint(&app_data, &student).await;
            complaint_service
                .apply_transition(
                    &actor_for(&admin),
                    complaint.id,
                    Status::InProgress,
                    AssigneeUpdate::Assign(staff.id.clone()),
                )
                .await
                .unwrap();

            service
                .toggle_active(&actor_for(&admin), &staff.id)
                .await
                .unwrap();
            service
                .toggle_active(&actor_for(&admin), &staff.id)
                .await
                .unwrap();

            let reloaded = app_data
                .complaint_store
                .find_by_id(complaint.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(reloaded.assigned_staff_id, None);
        }
    }

    // ==================== Test Group 3: delete_user() ====================

    mod delete_tests {
        use super::*;

        #[tokio::test]
        async fn delete_removes_the_account() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
            let target = create_test_user(&app_data, "Ben", "ben@campus.edu", Role::Student).await;

            service
                .delete_user(&actor_for(&admin), &target.id)
                .await
                .unwrap();

            let reloaded = app_data.user_store.find_by_id(&target.id).await.unwrap();
            assert!(reloaded.is_none());
        }

        #[tokio::test]
        async fn deleting_staff_unassigns_their_complaints_first() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());
            let complaint_service = ComplaintService::new(app_data.clone());

            let student =
                create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
            let staff = create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

            let complaint = create_test_complaint(&app_data, &student).await;
            complaint_service
                .apply_transition(
                    &actor_for(&admin),
                    complaint.id,
                    Status::InProgress,
                    AssigneeUpdate::Assign(staff.id.clone()),
                )
                .await
                .unwrap();

            service
                .delete_user(&actor_for(&admin), &staff.id)
                .await
                .unwrap();

            let reloaded = app_data
                .complaint_store
                .find_by_id(complaint.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(reloaded.assigned_staff_id, None);

            // The owner and their complaint are untouched
            assert_eq!(reloaded.student_id, student.id);
        }

        #[tokio::test]
        async fn comments_survive_their_authors_deletion() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());
            let complaint_service = ComplaintService::new(app_data.clone());

            let student =
                create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
            let staff = create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;

            let complaint = create_test_complaint(&app_data, &student).await;
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
                .append_comment(&actor_for(&staff), complaint.id, "looking into this")
                .await
                .unwrap();

            service
                .delete_user(&actor_for(&admin), &staff.id)
                .await
                .unwrap();

            let comments = app_data
                .comment_store
                .list_for_complaint(complaint.id)
                .await
                .unwrap();
            assert_eq!(comments.len(), 1);
            assert_eq!(comments[0].user_id, staff.id);
        }
    }

    // ==================== Test Group 4: listings and counts ====================

    mod listing_tests {
        use super::*;

        #[tokio::test]
        async fn role_counts_reflect_the_user_table() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
            create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;
            create_test_user(&app_data, "Ben", "ben@campus.edu", Role::Student).await;
            create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;

            let counts = service.role_counts(&actor_for(&admin)).await.unwrap();
            assert_eq!(counts.students, 2);
            assert_eq!(counts.staff, 1);
            assert_eq!(counts.admins, 1);
        }

        #[tokio::test]
        async fn staff_picker_lists_only_active_staff() {
            let app_data = setup_app_data().await;
            let service = UserAdminService::new(app_data.clone());

            let admin = create_test_user(&app_data, "Admin", "admin@campus.edu", Role::Admin).await;
            let active = create_test_user(&app_data, "Tomas", "tomas@campus.edu", Role::Staff).await;
            let inactive =
                create_test_user(&app_data, "Nadia", "nadia@campus.edu", Role::Staff).await;
            create_test_user(&app_data, "Asha", "asha@campus.edu", Role::Student).await;

            app_data
                .user_store
                .set_active(&inactive.id, false)
                .await
                .unwrap();

            let staff = service.list_active_staff(&actor_for(&admin)).await.unwrap();
            assert_eq!(staff.len(), 1);
            assert_eq!(staff[0].id, active.id);
        }
    }
}
