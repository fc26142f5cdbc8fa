use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common_enums::Role;

/// Identity of the signed-in actor.
///
/// Created once at sign-in from the actor's role assignment and passed
/// explicitly to every service operation; dropped at sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub role: Role,
    /// Home department, meaningful for officers and admins
    pub department_id: Option<Uuid>,
}

impl SessionContext {
    pub fn new(user_id: Uuid, role: Role, department_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            role,
            department_id,
        }
    }

    pub fn citizen(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Citizen, None)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_officer(&self) -> bool {
        self.role == Role::Officer
    }

    pub fn is_citizen(&self) -> bool {
        self.role == Role::Citizen
    }

    /// Admins and officers may change complaints; citizens only file them
    pub fn can_manage_complaints(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Officer)
    }
}
