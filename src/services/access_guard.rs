use crate::types::db::complaint;
use crate::types::internal::{ActorContext, Operation, OperationSet, Role};

/// Centralized authorization decisions for complaint and user access
///
/// Every state-changing or read operation consults this guard before
/// touching storage. The guard is pure: it only looks at the snapshots
/// it is handed, which keeps the full rule set unit-testable without a
/// database or transport layer.
pub struct AccessGuard;

impl AccessGuard {
    /// Compute the operations `actor` may perform on `complaint`
    ///
    /// Rules, evaluated in order:
    /// - inactive actors get nothing, regardless of role
    /// - admins get every operation on any complaint
    /// - staff get view/comment/transition on complaints assigned to them
    /// - students get view/comment on complaints they own
    pub fn permitted_operations(
        actor: &ActorContext,
        complaint: &complaint::Model,
    ) -> OperationSet {
        if !actor.active {
            return OperationSet::none();
        }

        match actor.role {
            Role::Admin => OperationSet::all(),
            Role::Staff => {
                if complaint.assigned_staff_id.as_deref() == Some(actor.id.as_str()) {
                    OperationSet::of(&[Operation::View, Operation::Comment, Operation::Transition])
                } else {
                    OperationSet::none()
                }
            }
            Role::Student => {
                if complaint.student_id == actor.id {
                    OperationSet::of(&[Operation::View, Operation::Comment])
                } else {
                    OperationSet::none()
                }
            }
        }
    }

    /// Whether `actor` may manage (toggle/delete) the target user
    ///
    /// Self-targeting is denied regardless of role: an admin can never
    /// deactivate or delete their own account through these operations.
    pub fn can_manage_user(actor: &ActorContext, target_user_id: &str) -> bool {
        if actor.id == target_user_id {
            return false;
        }
        actor.active && actor.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::Status;

    fn complaint(student_id: &str, assigned_staff_id: Option<&str>) -> complaint::Model {
        complaint::Model {
            id: 1,
            student_id: student_id.to_string(),
            assigned_staff_id: assigned_staff_id.map(|s| s.to_string()),
            title: "Broken projector".to_string(),
            description: "The projector in room 204 stopped working".to_string(),
            category: "Facilities".to_string(),
            status: Status::Open.as_str().to_string(),
            version: 1,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn inactive_actor_gets_nothing_regardless_of_role() {
        let c = complaint("s1", Some("t1"));
        for role in [Role::Student, Role::Staff, Role::Admin] {
            let actor = ActorContext::new("s1", role, false);
            assert!(AccessGuard::permitted_operations(&actor, &c).is_empty());
        }
        // Even an inactive assignee/owner
        let owner = ActorContext::new("s1", Role::Student, false);
        assert!(AccessGuard::permitted_operations(&owner, &c).is_empty());
        let assignee = ActorContext::new("t1", Role::Staff, false);
        assert!(AccessGuard::permitted_operations(&assignee, &c).is_empty());
    }

    #[test]
    fn admin_gets_every_operation_on_any_complaint() {
        let admin = ActorContext::new("a1", Role::Admin, true);
        for c in [complaint("s1", None), complaint("s2", Some("t9"))] {
            let ops = AccessGuard::permitted_operations(&admin, &c);
            assert!(ops.allows(Operation::View));
            assert!(ops.allows(Operation::Comment));
            assert!(ops.allows(Operation::Transition));
            assert!(ops.allows(Operation::Assign));
        }
    }

    #[test]
    fn staff_assignee_gets_view_comment_transition_but_not_assign() {
        let staff = ActorContext::new("t1", Role::Staff, true);
        let c = complaint("s1", Some("t1"));

        let ops = AccessGuard::permitted_operations(&staff, &c);
        assert!(ops.allows(Operation::View));
        assert!(ops.allows(Operation::Comment));
        assert!(ops.allows(Operation::Transition));
        assert!(!ops.allows(Operation::Assign));
    }

    #[test]
    fn staff_gets_nothing_on_unassigned_or_foreign_complaints() {
        let staff = ActorContext::new("t1", Role::Staff, true);
        assert!(AccessGuard::permitted_operations(&staff, &complaint("s1", None)).is_empty());
        assert!(
            AccessGuard::permitted_operations(&staff, &complaint("s1", Some("t2"))).is_empty()
        );
    }

    #[test]
    fn owner_gets_view_and_comment_only() {
        let student = ActorContext::new("s1", Role::Student, true);
        let c = complaint("s1", Some("t1"));

        let ops = AccessGuard::permitted_operations(&student, &c);
        assert!(ops.allows(Operation::View));
        assert!(ops.allows(Operation::Comment));
        assert!(!ops.allows(Operation::Transition));
        assert!(!ops.allows(Operation::Assign));
    }

    #[test]
    fn other_students_get_nothing() {
        let other = ActorContext::new("s2", Role::Student, true);
        let c = complaint("s1", None);
        assert!(AccessGuard::permitted_operations(&other, &c).is_empty());
    }

    #[test]
    fn a_student_sharing_an_id_with_staff_is_not_the_assignee_path() {
        // Role decides which ownership field is consulted
        let student = ActorContext::new("t1", Role::Student, true);
        let c = complaint("s1", Some("t1"));
        assert!(AccessGuard::permitted_operations(&student, &c).is_empty());
    }

    #[test]
    fn admins_cannot_manage_themselves() {
        let admin = ActorContext::new("a1", Role::Admin, true);
        assert!(!AccessGuard::can_manage_user(&admin, "a1"));
        assert!(AccessGuard::can_manage_user(&admin, "a2"));
    }

    #[test]
    fn self_target_is_denied_regardless_of_role() {
        for role in [Role::Student, Role::Staff, Role::Admin] {
            let actor = ActorContext::new("u1", role, true);
            assert!(!AccessGuard::can_manage_user(&actor, "u1"));
        }
    }

    #[test]
    fn only_active_admins_manage_users() {
        let staff = ActorContext::new("t1", Role::Staff, true);
        assert!(!AccessGuard::can_manage_user(&staff, "u2"));

        let student = ActorContext::new("s1", Role::Student, true);
        assert!(!AccessGuard::can_manage_user(&student, "u2"));

        let inactive_admin = ActorContext::new("a1", Role::Admin, false);
        assert!(!AccessGuard::can_manage_user(&inactive_admin, "u2"));
    }
}
