use poem_openapi::Object;

use crate::stores::{RoleCounts, StatusCounts};
use crate::types::db::user;
use crate::types::dto::complaints::StatusCountsView;

/// Public view of a user account. Never carries the password hash.
#[derive(Object, Debug, Clone)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// User counts by role
#[derive(Object, Debug)]
pub struct RoleCountsView {
    pub students: u64,
    pub staff: u64,
    pub admins: u64,
}

impl From<RoleCounts> for RoleCountsView {
    fn from(counts: RoleCounts) -> Self {
        Self {
            students: counts.students,
            staff: counts.staff,
            admins: counts.admins,
        }
    }
}

/// Admin dashboard statistics
#[derive(Object, Debug)]
pub struct AdminStatsView {
    pub complaints: StatusCountsView,
    pub users: RoleCountsView,
}

impl AdminStatsView {
    pub fn new(complaints: StatusCounts, users: RoleCounts) -> Self {
        Self {
            complaints: complaints.into(),
            users: users.into(),
        }
    }
}
