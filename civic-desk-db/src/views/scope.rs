use civic_desk_api::{Role, SessionContext};
use uuid::Uuid;

use crate::models::ComplaintModel;

/// Which complaints a session lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    /// Citizen: complaints they created
    Created(Uuid),
    /// Officer: complaints assigned to them
    AssignedTo(Uuid),
    /// Admin: everything
    All,
}

impl RoleScope {
    pub fn for_session(session: &SessionContext) -> Self {
        match session.role {
            Role::Citizen => RoleScope::Created(session.user_id),
            Role::Officer => RoleScope::AssignedTo(session.user_id),
            Role::Admin => RoleScope::All,
        }
    }

    pub fn matches(&self, complaint: &ComplaintModel) -> bool {
        match self {
            RoleScope::Created(user_id) => complaint.user_id == *user_id,
            RoleScope::AssignedTo(officer_id) => complaint.assigned_officer_id == Some(*officer_id),
            RoleScope::All => true,
        }
    }
}
