use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use civic_desk_api::{
    ApiError, ApiResult, ComplaintChanges, NewComplaintRequest, Role, SessionContext,
};
use civic_desk_db::lifecycle::{authorize_read, authorize_update, plan_update, TransitionPolicy};
use civic_desk_db::models::{AuditLogModel, ComplaintModel, DepartmentModel, UserRoleModel};
use civic_desk_db::repository::{CreateBatch, Load, LoadBatch, UpdateBatch};
use civic_desk_db::service::{ComplaintDetail, ComplaintService};
use civic_desk_db::views::RoleScope;
use civic_desk_db::RepositoryError;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::postgres_repositories::{PostgresRepositories, RepositorySession};

/// Transactional [`ComplaintService`] over Postgres
pub struct ComplaintServiceImpl {
    repos: Arc<PostgresRepositories>,
    policy: Arc<dyn TransitionPolicy>,
}

impl ComplaintServiceImpl {
    pub fn new(repos: Arc<PostgresRepositories>, policy: Arc<dyn TransitionPolicy>) -> Self {
        Self { repos, policy }
    }

    async fn begin(&self) -> ApiResult<RepositorySession> {
        self.repos
            .begin_session()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }
}

/// Postgres keeps microseconds; truncating keeps hashes stable across a reload
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn map_repo_error(err: Box<dyn Error + Send + Sync>) -> ApiError {
    match RepositoryError::find(err.as_ref()) {
        Some(RepositoryError::NotFound { entity, id }) => {
            ApiError::NotFound(format!("{entity} {id} not found"))
        }
        Some(RepositoryError::ConcurrentModification { .. }) => ApiError::Conflict(err.to_string()),
        _ => match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                ApiError::Conflict(db.message().to_string())
            }
            _ => ApiError::DatabaseError(err.to_string()),
        },
    }
}

#[async_trait]
impl ComplaintService for ComplaintServiceImpl {
    async fn start_session(&self, user_id: Uuid) -> ApiResult<SessionContext> {
        let session = self.begin().await?;
        let role = session
            .directory_repos()
            .user_role_repository
            .find_by_user_id(user_id)
            .await
            .map_err(map_repo_error)?;
        session.rollback().await.map_err(map_repo_error)?;

        Ok(role
            .map(|r| r.to_session())
            .unwrap_or_else(|| SessionContext::citizen(user_id)))
    }

    async fn submit_complaint(
        &self,
        session: &SessionContext,
        request: NewComplaintRequest,
    ) -> ApiResult<ComplaintModel> {
        let request = request.validated()?;
        let now = now();
        let complaint = ComplaintModel::from_request(&request, session.user_id, now)
            .map_err(ApiError::ValidationError)?;

        let repos = self.begin().await?;
        let audit_log = AuditLogModel::new(session.user_id, now);
        repos
            .audit_repos()
            .audit_log_repository
            .create(&audit_log)
            .await
            .map_err(map_repo_error)?;
        let mut saved = repos
            .complaint_repos()
            .complaint_repository
            .create_batch(vec![complaint], Some(audit_log.id))
            .await
            .map_err(map_repo_error)?;
        repos.commit().await.map_err(map_repo_error)?;

        let saved = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("complaint was not saved".to_string()))?;
        info!(
            complaint_id = %saved.id,
            user_id = %session.user_id,
            category = %saved.category,
            "complaint submitted"
        );
        Ok(saved)
    }

    async fn update_complaint(
        &self,
        session: &SessionContext,
        complaint_id: Uuid,
        changes: ComplaintChanges,
    ) -> ApiResult<()> {
        if !session.can_manage_complaints() {
            warn!(user_id = %session.user_id, %complaint_id, "citizen attempted a complaint update");
            return Err(ApiError::Forbidden(
                "citizens may not change complaints".to_string(),
            ));
        }

        let repos = self.begin().await?;
        let complaint_repo = &repos.complaint_repos().complaint_repository;
        let current = complaint_repo.load(complaint_id).await.map_err(map_repo_error)?;

        if let Err(err) = authorize_update(session, &current, &changes) {
            warn!(user_id = %session.user_id, %complaint_id, "update denied: {err}");
            return Err(err);
        }

        let now = now();
        let plan = plan_update(&current, &changes, session.user_id, now, self.policy.as_ref())?;
        if !plan.changed {
            repos.rollback().await.map_err(map_repo_error)?;
            return Ok(());
        }

        let audit_log = AuditLogModel::new(session.user_id, now);
        repos
            .audit_repos()
            .audit_log_repository
            .create(&audit_log)
            .await
            .map_err(map_repo_error)?;

        let history_entry = plan.history_entry;
        let new_status = plan.complaint.status;
        let update = complaint_repo
            .update_batch(vec![plan.complaint], audit_log.id)
            .await
            .map_err(map_repo_error);
        if let Err(ApiError::Conflict(msg)) = &update {
            warn!(%complaint_id, "concurrent update rejected: {msg}");
        }
        update?;

        if let Some(entry) = &history_entry {
            repos
                .complaint_repos()
                .status_history_repository
                .create(entry, audit_log.id)
                .await
                .map_err(map_repo_error)?;
        }
        repos.commit().await.map_err(map_repo_error)?;

        if history_entry.is_some() {
            info!(
                %complaint_id,
                actor = %session.user_id,
                from = %current.status,
                to = %new_status,
                "complaint status changed"
            );
        } else {
            info!(%complaint_id, actor = %session.user_id, "complaint updated");
        }
        Ok(())
    }

    async fn list_complaints(&self, session: &SessionContext) -> ApiResult<Vec<ComplaintModel>> {
        let repos = self.begin().await?;
        let complaint_repo = &repos.complaint_repos().complaint_repository;
        let complaints = match RoleScope::for_session(session) {
            RoleScope::Created(user_id) => complaint_repo.find_by_user_id(user_id).await,
            RoleScope::AssignedTo(officer_id) => {
                complaint_repo.find_by_assigned_officer_id(officer_id).await
            }
            RoleScope::All => complaint_repo.find_all().await,
        }
        .map_err(map_repo_error)?;
        repos.rollback().await.map_err(map_repo_error)?;
        Ok(complaints)
    }

    async fn complaint_detail(
        &self,
        session: &SessionContext,
        complaint_id: Uuid,
    ) -> ApiResult<ComplaintDetail> {
        let repos = self.begin().await?;
        let complaint = repos
            .complaint_repos()
            .complaint_repository
            .load(complaint_id)
            .await
            .map_err(map_repo_error)?;
        authorize_read(session, &complaint)?;

        let history = repos
            .complaint_repos()
            .status_history_repository
            .find_by_complaint_id(complaint_id)
            .await
            .map_err(map_repo_error)?;
        repos.rollback().await.map_err(map_repo_error)?;

        Ok(ComplaintDetail { complaint, history })
    }

    async fn list_departments(&self) -> ApiResult<Vec<DepartmentModel>> {
        let repos = self.begin().await?;
        let departments = repos
            .directory_repos()
            .department_repository
            .find_all()
            .await
            .map_err(map_repo_error)?;
        repos.rollback().await.map_err(map_repo_error)?;
        Ok(departments)
    }

    async fn create_department(&self, operator: Uuid, name: &str) -> ApiResult<DepartmentModel> {
        let now = now();
        let department = DepartmentModel::new(name, now).map_err(ApiError::ValidationError)?;

        let repos = self.begin().await?;
        let audit_log = AuditLogModel::new(operator, now);
        repos
            .audit_repos()
            .audit_log_repository
            .create(&audit_log)
            .await
            .map_err(map_repo_error)?;
        let mut saved = repos
            .directory_repos()
            .department_repository
            .create_batch(vec![department], Some(audit_log.id))
            .await
            .map_err(map_repo_error)?;
        repos.commit().await.map_err(map_repo_error)?;

        let saved = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("department was not saved".to_string()))?;
        info!(department_id = %saved.id, name = %saved.name, %operator, "department created");
        Ok(saved)
    }

    async fn assign_role(
        &self,
        operator: Uuid,
        user_id: Uuid,
        role: Role,
        department_id: Option<Uuid>,
    ) -> ApiResult<SessionContext> {
        if department_id.is_some() && role != Role::Officer {
            return Err(ApiError::ValidationError(format!(
                "only officers belong to a department, not role {role}"
            )));
        }

        let repos = self.begin().await?;
        if let Some(department_id) = department_id {
            let found = repos
                .directory_repos()
                .department_repository
                .load_batch(&[department_id])
                .await
                .map_err(map_repo_error)?;
            if !matches!(found.as_slice(), [Some(_)]) {
                return Err(ApiError::NotFound(format!(
                    "Department {department_id} not found"
                )));
            }
        }

        let audit_log = AuditLogModel::new(operator, now());
        repos
            .audit_repos()
            .audit_log_repository
            .create(&audit_log)
            .await
            .map_err(map_repo_error)?;
        let saved = repos
            .directory_repos()
            .user_role_repository
            .assign(&UserRoleModel::new(user_id, role, department_id), audit_log.id)
            .await
            .map_err(map_repo_error)?;
        repos.commit().await.map_err(map_repo_error)?;

        info!(%user_id, %role, %operator, "role assigned");
        Ok(saved.to_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::complaint::complaint_repository::test_utils::create_test_audit_log;
    use crate::test_helper::{create_test_department, create_test_user_role, setup_shared_repos};
    use civic_desk_api::{ComplaintPriority, ComplaintStatus, Role};
    use civic_desk_db::lifecycle::{PermissiveTransitions, WorkflowTransitions};

    fn water_request() -> NewComplaintRequest {
        NewComplaintRequest {
            category: "Water".to_string(),
            sub_category: "No water supply".to_string(),
            description: "  no water 12  ".to_string(),
            city: "Mumbai".to_string(),
            area: "Andheri".to_string(),
            image_url: None,
        }
    }

    async fn service_with(
        policy: Arc<dyn TransitionPolicy>,
    ) -> Result<ComplaintServiceImpl, Box<dyn std::error::Error + Send + Sync>> {
        let repos = Arc::new(setup_shared_repos().await?);
        Ok(ComplaintServiceImpl::new(repos, policy))
    }

    async fn service() -> Result<ComplaintServiceImpl, Box<dyn std::error::Error + Send + Sync>> {
        service_with(Arc::new(PermissiveTransitions)).await
    }

    fn admin() -> SessionContext {
        SessionContext::new(Uuid::new_v4(), Role::Admin, None)
    }

    fn officer() -> SessionContext {
        SessionContext::new(Uuid::new_v4(), Role::Officer, None)
    }

    #[tokio::test]
    async fn test_submit_stores_open_medium_complaint() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());

        let saved = service.submit_complaint(&citizen, water_request()).await?;
        assert_eq!(saved.status, ComplaintStatus::Open);
        assert_eq!(saved.priority, ComplaintPriority::Medium);
        assert_eq!(saved.description, "no water 12");
        assert_eq!(saved.user_id, citizen.user_id);

        let detail = service.complaint_detail(&citizen, saved.id).await?;
        assert_eq!(detail.complaint, saved);
        assert!(detail.history.is_empty());

        let listed = service.list_complaints(&citizen).await?;
        assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![saved.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_submission_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let mut request = water_request();
        request.area = "Saket".to_string();

        let result = service.submit_complaint(&citizen, request).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
        assert!(service.list_complaints(&citizen).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_status_change_appends_history() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let admin = admin();
        let saved = service.submit_complaint(&citizen, water_request()).await?;

        service
            .update_complaint(
                &admin,
                saved.id,
                ComplaintChanges::status(ComplaintStatus::InProgress).with_note("crew dispatched"),
            )
            .await?;

        let detail = service.complaint_detail(&admin, saved.id).await?;
        assert_eq!(detail.complaint.status, ComplaintStatus::InProgress);
        assert_eq!(detail.history.len(), 1);
        let entry = &detail.history[0];
        assert_eq!(entry.old_status, Some(ComplaintStatus::Open));
        assert_eq!(entry.new_status, ComplaintStatus::InProgress);
        assert_eq!(entry.changed_by, admin.user_id);
        assert_eq!(entry.notes.as_deref(), Some("crew dispatched"));
        Ok(())
    }

    #[tokio::test]
    async fn test_priority_change_writes_no_history() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let admin = admin();
        let saved = service.submit_complaint(&citizen, water_request()).await?;

        service
            .update_complaint(
                &admin,
                saved.id,
                ComplaintChanges::default().with_priority(ComplaintPriority::High),
            )
            .await?;

        let detail = service.complaint_detail(&admin, saved.id).await?;
        assert_eq!(detail.complaint.priority, ComplaintPriority::High);
        assert!(detail.history.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_officer_rules_are_enforced() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let admin = admin();
        let officer_x = officer();
        let officer_y = officer();
        let saved = service.submit_complaint(&citizen, water_request()).await?;

        service
            .update_complaint(
                &admin,
                saved.id,
                ComplaintChanges::default().with_officer(Some(officer_x.user_id)),
            )
            .await?;

        let listed_x = service.list_complaints(&officer_x).await?;
        assert!(listed_x.iter().any(|c| c.id == saved.id));
        let listed_y = service.list_complaints(&officer_y).await?;
        assert!(listed_y.iter().all(|c| c.id != saved.id));

        let not_assigned = service
            .update_complaint(&officer_y, saved.id, ComplaintChanges::status(ComplaintStatus::Resolved))
            .await;
        assert!(matches!(not_assigned, Err(ApiError::Forbidden(_))));

        let beyond_status = service
            .update_complaint(
                &officer_x,
                saved.id,
                ComplaintChanges::default().with_priority(ComplaintPriority::Low),
            )
            .await;
        assert!(matches!(beyond_status, Err(ApiError::Forbidden(_))));

        service
            .update_complaint(&officer_x, saved.id, ComplaintChanges::status(ComplaintStatus::Resolved))
            .await?;
        let detail = service.complaint_detail(&officer_x, saved.id).await?;
        assert_eq!(detail.complaint.status, ComplaintStatus::Resolved);

        let citizen_update = service
            .update_complaint(&citizen, saved.id, ComplaintChanges::status(ComplaintStatus::Closed))
            .await;
        assert!(matches!(citizen_update, Err(ApiError::Forbidden(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_access_is_scoped() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let owner = SessionContext::citizen(Uuid::new_v4());
        let stranger = SessionContext::citizen(Uuid::new_v4());
        let saved = service.submit_complaint(&owner, water_request()).await?;

        let result = service.complaint_detail(&stranger, saved.id).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let missing = service.complaint_detail(&admin(), Uuid::new_v4()).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_of_missing_complaint_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let result = service
            .update_complaint(&admin(), Uuid::new_v4(), ComplaintChanges::status(ComplaintStatus::Closed))
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_workflow_policy_blocks_disallowed_move() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service_with(Arc::new(WorkflowTransitions)).await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let admin = admin();
        let saved = service.submit_complaint(&citizen, water_request()).await?;

        service
            .update_complaint(&admin, saved.id, ComplaintChanges::status(ComplaintStatus::Rejected))
            .await?;
        let result = service
            .update_complaint(&admin, saved.id, ComplaintChanges::status(ComplaintStatus::Resolved))
            .await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));

        let detail = service.complaint_detail(&admin, saved.id).await?;
        assert_eq!(detail.complaint.status, ComplaintStatus::Rejected);
        assert_eq!(detail.history.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_write_surfaces_as_conflict() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let saved = service.submit_complaint(&citizen, water_request()).await?;

        // A second writer changes the row after this copy was read.
        service
            .update_complaint(&admin(), saved.id, ComplaintChanges::status(ComplaintStatus::InProgress))
            .await?;

        let session = service.repos.begin_session().await?;
        let audit_log = create_test_audit_log();
        session.audit_repos().audit_log_repository.create(&audit_log).await?;
        let mut stale = saved.clone();
        stale.status = ComplaintStatus::Closed;
        let err = session
            .complaint_repos()
            .complaint_repository
            .update_batch(vec![stale], audit_log.id)
            .await
            .unwrap_err();
        assert!(matches!(map_repo_error(err), ApiError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_sessions_resolve_roles() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;

        let session = service.repos.begin_session().await?;
        let department = create_test_department(&format!("Dept {}", Uuid::new_v4().simple()));
        session
            .directory_repos()
            .department_repository
            .create_batch(vec![department.clone()], None)
            .await?;
        let officer_role = create_test_user_role(Role::Officer, Some(department.id));
        session
            .directory_repos()
            .user_role_repository
            .create_batch(vec![officer_role.clone()], None)
            .await?;
        session.commit().await?;

        let officer = service.start_session(officer_role.user_id).await?;
        assert!(officer.is_officer());
        assert_eq!(officer.department_id, Some(department.id));

        let unknown = service.start_session(Uuid::new_v4()).await?;
        assert!(unknown.is_citizen());

        let departments = service.list_departments().await?;
        assert!(departments.iter().any(|d| d.id == department.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_history_insert_leaves_complaint_untouched(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let citizen = SessionContext::citizen(Uuid::new_v4());
        let admin = admin();
        let saved = service.submit_complaint(&citizen, water_request()).await?;

        // Refuse history rows for this complaint only; other tests share the table.
        let name = format!("refuse_history_{}", saved.id.simple());
        let install = format!(
            r#"
            CREATE FUNCTION {name}() RETURNS trigger AS $$
            BEGIN
                IF NEW.complaint_id = '{id}'::uuid THEN
                    RAISE EXCEPTION 'history insert refused';
                END IF;
                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql;
            CREATE TRIGGER {name}
                BEFORE INSERT ON complaint_status_history
                FOR EACH ROW EXECUTE FUNCTION {name}();
            "#,
            id = saved.id
        );
        sqlx::raw_sql(&install).execute(service.repos.pool()).await?;

        let result = service
            .update_complaint(
                &admin,
                saved.id,
                ComplaintChanges::status(ComplaintStatus::Resolved).with_note("fixed"),
            )
            .await;

        let uninstall = format!(
            "DROP TRIGGER {name} ON complaint_status_history; DROP FUNCTION {name}();"
        );
        sqlx::raw_sql(&uninstall).execute(service.repos.pool()).await?;

        assert!(matches!(result, Err(ApiError::DatabaseError(_))));
        let detail = service.complaint_detail(&admin, saved.id).await?;
        assert_eq!(detail.complaint.status, ComplaintStatus::Open);
        assert_eq!(detail.complaint.hash, saved.hash);
        assert_eq!(detail.complaint.audit_log_id, saved.audit_log_id);
        assert!(detail.history.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_directory_setup_drives_sessions() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = service().await?;
        let operator = Uuid::new_v4();
        let name = format!("Streetlights {}", Uuid::new_v4().simple());

        let department = service.create_department(operator, &format!("  {name} ")).await?;
        assert_eq!(department.name.as_str(), name);
        let duplicate = service.create_department(operator, &name).await;
        assert!(matches!(duplicate, Err(ApiError::Conflict(_))));
        let blank = service.create_department(operator, "  ").await;
        assert!(matches!(blank, Err(ApiError::ValidationError(_))));

        let user_id = Uuid::new_v4();
        let granted = service
            .assign_role(operator, user_id, Role::Officer, Some(department.id))
            .await?;
        assert_eq!(granted, service.start_session(user_id).await?);
        assert!(granted.is_officer());
        assert_eq!(granted.department_id, Some(department.id));

        let promoted = service.assign_role(operator, user_id, Role::Admin, None).await?;
        assert!(promoted.is_admin());
        assert_eq!(service.start_session(user_id).await?, promoted);

        let unknown = service
            .assign_role(operator, Uuid::new_v4(), Role::Officer, Some(Uuid::new_v4()))
            .await;
        assert!(matches!(unknown, Err(ApiError::NotFound(_))));
        let citizen_in_department = service
            .assign_role(operator, Uuid::new_v4(), Role::Citizen, Some(department.id))
            .await;
        assert!(matches!(citizen_in_department, Err(ApiError::ValidationError(_))));
        Ok(())
    }
}
