use civic_desk_api::{ApiError, ApiResult, ComplaintChanges, Role, SessionContext};

use crate::models::ComplaintModel;
use crate::views::RoleScope;

/// Server-side check for the update path.
///
/// - Citizens may not change complaints.
/// - Officers may only change the status of complaints assigned to them.
/// - Admins may change anything.
pub fn authorize_update(
    session: &SessionContext,
    complaint: &ComplaintModel,
    changes: &ComplaintChanges,
) -> ApiResult<()> {
    match session.role {
        Role::Admin => Ok(()),
        Role::Officer => {
            if complaint.assigned_officer_id != Some(session.user_id) {
                return Err(ApiError::Forbidden(format!(
                    "complaint {} is not assigned to officer {}",
                    complaint.id, session.user_id
                )));
            }
            if changes.touches_more_than_status() {
                return Err(ApiError::Forbidden(
                    "officers may only change the status of a complaint".to_string(),
                ));
            }
            Ok(())
        }
        Role::Citizen => Err(ApiError::Forbidden(
            "citizens may not change complaints".to_string(),
        )),
    }
}

/// Read access follows the listing scope: citizens see their own
/// complaints, officers the ones assigned to them, admins everything.
pub fn authorize_read(session: &SessionContext, complaint: &ComplaintModel) -> ApiResult<()> {
    if RoleScope::for_session(session).matches(complaint) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "complaint {} is not visible to {} {}",
            complaint.id, session.role, session.user_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::complaint;
    use civic_desk_api::{ComplaintPriority, ComplaintStatus};
    use uuid::Uuid;

    #[test]
    fn test_citizen_cannot_update() {
        let owner = Uuid::new_v4();
        let c = complaint("Water", "Mumbai", owner);
        let session = SessionContext::citizen(owner);
        let result = authorize_update(&session, &c, &ComplaintChanges::status(ComplaintStatus::Closed));
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_officer_limited_to_own_assignments_and_status() {
        let officer = Uuid::new_v4();
        let session = SessionContext::new(officer, Role::Officer, None);
        let mut c = complaint("Water", "Mumbai", Uuid::new_v4());

        let change = ComplaintChanges::status(ComplaintStatus::InProgress);
        assert!(authorize_update(&session, &c, &change).is_err());

        c.assigned_officer_id = Some(officer);
        assert!(authorize_update(&session, &c, &change).is_ok());

        let reprioritise = change.with_priority(ComplaintPriority::High);
        assert!(matches!(
            authorize_update(&session, &c, &reprioritise),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_may_change_anything() {
        let session = SessionContext::new(Uuid::new_v4(), Role::Admin, None);
        let c = complaint("Water", "Mumbai", Uuid::new_v4());
        let change = ComplaintChanges::default()
            .with_priority(ComplaintPriority::High)
            .with_officer(Some(Uuid::new_v4()));
        assert!(authorize_update(&session, &c, &change).is_ok());
    }

    #[test]
    fn test_read_scopes() {
        let owner = Uuid::new_v4();
        let officer = Uuid::new_v4();
        let mut c = complaint("Water", "Mumbai", owner);
        c.assigned_officer_id = Some(officer);

        assert!(authorize_read(&SessionContext::citizen(owner), &c).is_ok());
        assert!(authorize_read(&SessionContext::citizen(Uuid::new_v4()), &c).is_err());
        assert!(authorize_read(&SessionContext::new(officer, Role::Officer, None), &c).is_ok());
        assert!(authorize_read(&SessionContext::new(Uuid::new_v4(), Role::Officer, None), &c).is_err());
        assert!(authorize_read(&SessionContext::new(Uuid::new_v4(), Role::Admin, None), &c).is_ok());
    }
}
