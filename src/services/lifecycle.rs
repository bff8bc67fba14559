use crate::types::internal::{Role, Status};

/// The complaint status state machine
///
/// Replaces free-form status writes with an explicit transition table.
/// Assignment-only updates keep their current status and never reach
/// this table; a call that names the current status as its target is
/// not a transition.
pub struct Lifecycle;

impl Lifecycle {
    /// Whether `from -> to` is a legal status change for `role`
    ///
    /// | From        | To          | Allowed actor            |
    /// |-------------|-------------|--------------------------|
    /// | open        | in_progress | staff (assignee), admin  |
    /// | open        | resolved    | staff (assignee), admin  |
    /// | in_progress | resolved    | staff (assignee), admin  |
    /// | in_progress | open        | admin                    |
    /// | resolved    | any         | admin (reopen)           |
    ///
    /// Whether the caller actually is the assignee is the access guard's
    /// decision; this table only rules on reachability per role.
    pub fn can_transition(role: Role, from: Status, to: Status) -> bool {
        if from == to {
            return false;
        }

        match role {
            Role::Student => false,
            Role::Staff => matches!(
                (from, to),
                (Status::Open, Status::InProgress)
                    | (Status::Open, Status::Resolved)
                    | (Status::InProgress, Status::Resolved)
            ),
            Role::Admin => match (from, to) {
                (Status::Open, Status::InProgress)
                | (Status::Open, Status::Resolved)
                | (Status::InProgress, Status::Resolved)
                | (Status::InProgress, Status::Open) => true,
                (Status::Resolved, _) => true,
                _ => false,
            },
        }
    }
}
