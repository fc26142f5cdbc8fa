use civic_desk_api::{Role, SessionContext};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Role assignment of a user. Exactly one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRoleModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    /// Home department, meaningful for officers and admins
    pub department_id: Option<Uuid>,
}

impl UserRoleModel {
    pub fn new(user_id: Uuid, role: Role, department_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            department_id,
        }
    }

    /// Session context for the user at sign-in
    pub fn to_session(&self) -> SessionContext {
        SessionContext::new(self.user_id, self.role, self.department_id)
    }
}

impl Identifiable for UserRoleModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
