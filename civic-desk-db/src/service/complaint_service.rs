use async_trait::async_trait;
use civic_desk_api::{ApiResult, ComplaintChanges, NewComplaintRequest, Role, SessionContext};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ComplaintModel, DepartmentModel, StatusHistoryModel};

/// A complaint with its status trail, oldest entry first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDetail {
    pub complaint: ComplaintModel,
    pub history: Vec<StatusHistoryModel>,
}

/// Operations available to a signed-in actor.
///
/// Every call receives the actor's [`SessionContext`] explicitly and runs in
/// its own transaction.
#[async_trait]
pub trait ComplaintService: Send + Sync {
    /// Resolves the role assignment of `user_id`; users without one are citizens
    async fn start_session(&self, user_id: Uuid) -> ApiResult<SessionContext>;

    /// Files a complaint as the session user. Status starts open, priority medium.
    async fn submit_complaint(
        &self,
        session: &SessionContext,
        request: NewComplaintRequest,
    ) -> ApiResult<ComplaintModel>;

    /// Applies a status, priority or assignment change.
    ///
    /// The complaint update, its audit records and the status history entry
    /// are written in one transaction. A request that changes nothing writes
    /// nothing.
    async fn update_complaint(
        &self,
        session: &SessionContext,
        complaint_id: Uuid,
        changes: ComplaintChanges,
    ) -> ApiResult<()>;

    /// Complaints visible to the session, newest first
    async fn list_complaints(&self, session: &SessionContext) -> ApiResult<Vec<ComplaintModel>>;

    async fn complaint_detail(
        &self,
        session: &SessionContext,
        complaint_id: Uuid,
    ) -> ApiResult<ComplaintDetail>;

    async fn list_departments(&self) -> ApiResult<Vec<DepartmentModel>>;

    /// Adds a department; `operator` is recorded in the audit log.
    /// A duplicate name is a conflict.
    async fn create_department(&self, operator: Uuid, name: &str) -> ApiResult<DepartmentModel>;

    /// Gives `user_id` a role, replacing any previous assignment.
    ///
    /// Only officers belong to a department, which must exist. Returns the
    /// session the user gets from now on.
    async fn assign_role(
        &self,
        operator: Uuid,
        user_id: Uuid,
        role: Role,
        department_id: Option<Uuid>,
    ) -> ApiResult<SessionContext>;
}
