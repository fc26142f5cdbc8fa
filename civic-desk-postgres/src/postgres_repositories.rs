use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;

use crate::repository::audit::{AuditRepoFactory, AuditRepositories};
use crate::repository::complaint::{ComplaintRepoFactory, ComplaintRepositories};
use crate::repository::directory::{DirectoryRepoFactory, DirectoryRepositories};
use crate::unit_of_work;
use postgres_unit_of_work::Executor;

/// Entry point to the Postgres backend.
///
/// Holds the pool and the repository factories; every
/// [`begin_session`](Self::begin_session) opens one transaction shared by all
/// repositories of the returned session.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    audit_factory: Arc<AuditRepoFactory>,
    complaint_factory: Arc<ComplaintRepoFactory>,
    directory_factory: Arc<DirectoryRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            audit_factory: AuditRepoFactory::new(),
            complaint_factory: ComplaintRepoFactory::new(),
            directory_factory: DirectoryRepoFactory::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Opens a transaction and builds every repository on it
    pub async fn begin_session(&self) -> Result<RepositorySession, sqlx::Error> {
        let executor = Executor::new(self.pool.begin().await?);
        Ok(RepositorySession {
            audit_repos: self.audit_factory.build_all_repos(&executor),
            complaint_repos: self.complaint_factory.build_all_repos(&executor),
            directory_repos: self.directory_factory.build_all_repos(&executor),
            executor,
        })
    }
}

/// Repositories sharing one open transaction.
///
/// Dropping the session without committing rolls everything back.
pub struct RepositorySession {
    executor: Executor,
    pub audit_repos: AuditRepositories,
    pub complaint_repos: ComplaintRepositories,
    pub directory_repos: DirectoryRepositories,
}

impl RepositorySession {
    pub fn audit_repos(&self) -> &AuditRepositories {
        &self.audit_repos
    }

    pub fn complaint_repos(&self) -> &ComplaintRepositories {
        &self.complaint_repos
    }

    pub fn directory_repos(&self) -> &DirectoryRepositories {
        &self.directory_repos
    }

    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        unit_of_work::commit(&self.executor).await
    }

    pub async fn rollback(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        unit_of_work::rollback(&self.executor).await
    }
}
