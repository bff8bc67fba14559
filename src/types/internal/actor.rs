use std::fmt;

/// Role assigned to a user at registration. Immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Staff,
    Admin,
}

impl Role {
    /// String representation used in the database and in JWT claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }

    /// Parse from the stored string representation
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "staff" => Some(Role::Staff),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable snapshot of the authenticated caller
///
/// Produced by the session layer (token validation followed by a fresh
/// user load) and passed explicitly into every service operation. Core
/// logic never reads the current user from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    pub id: String,
    pub role: Role,
    pub active: bool,
}

impl ActorContext {
    pub fn new(id: impl Into<String>, role: Role, active: bool) -> Self {
        Self {
            id: id.into(),
            role,
            active,
        }
    }

    /// The subset of complaints this actor may list, derived from role
    pub fn scope(&self) -> ComplaintScope {
        match self.role {
            Role::Student => ComplaintScope::Own(self.id.clone()),
            Role::Staff => ComplaintScope::Assigned(self.id.clone()),
            Role::Admin => ComplaintScope::All,
        }
    }
}

/// Visibility scope for complaint listings and dashboard counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintScope {
    /// Complaints owned by the given student
    Own(String),
    /// Complaints assigned to the given staff member
    Assigned(String),
    /// Every complaint
    All,
}
