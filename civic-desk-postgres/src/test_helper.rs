//! Transaction-scoped test isolation.
//!
//! [`setup_test_context`] hands out a [`RepositorySession`] whose transaction
//! is rolled back when the context is dropped, so tests never need cleanup.

use chrono::{SubsecRound, Utc};
use civic_desk_api::Role;
use civic_desk_db::models::{DepartmentModel, UserRoleModel};
use heapless::String as HeaplessString;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::PostgresConfig;
use crate::postgres_repositories::{PostgresRepositories, RepositorySession};

/// Open session that rolls back on drop
pub struct TestContext {
    session: RepositorySession,
}

impl Deref for TestContext {
    type Target = RepositorySession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let repos = setup_shared_repos().await?;
    let session = repos.begin_session().await?;
    Ok(TestContext { session })
}

/// Pool-backed repositories for tests that commit in one session and read in another
pub async fn setup_shared_repos() -> Result<PostgresRepositories, Box<dyn std::error::Error + Send + Sync>> {
    let pool = PostgresConfig::from_env().connect().await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(PostgresRepositories::new(Arc::new(pool)))
}

pub fn create_test_department(name: &str) -> DepartmentModel {
    DepartmentModel {
        id: Uuid::new_v4(),
        name: HeaplessString::from_str(name).unwrap(),
        created_at: Utc::now().trunc_subsecs(6),
    }
}

pub fn create_test_user_role(role: Role, department_id: Option<Uuid>) -> UserRoleModel {
    UserRoleModel {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        role,
        department_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_desk_db::models::AuditLogModel;
    use civic_desk_db::repository::LoadBatch;

    #[tokio::test]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let test_id = Uuid::new_v4();
        {
            let ctx = setup_test_context().await?;
            let audit_log = AuditLogModel {
                id: test_id,
                updated_at: Utc::now(),
                updated_by_person_id: Uuid::new_v4(),
            };
            ctx.audit_repos().audit_log_repository.create(&audit_log).await?;

            let loaded = ctx.audit_repos().audit_log_repository.load_batch(&[test_id]).await?;
            assert!(loaded[0].is_some());
        }

        let ctx = setup_test_context().await?;
        let loaded = ctx.audit_repos().audit_log_repository.load_batch(&[test_id]).await?;
        assert!(loaded[0].is_none());
        Ok(())
    }
}
