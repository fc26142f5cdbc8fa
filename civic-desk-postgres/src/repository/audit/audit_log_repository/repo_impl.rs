use async_trait::async_trait;
use civic_desk_db::{
    models::AuditLogModel,
    repository::{Load, LoadBatch},
    RepositoryError,
};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use postgres_unit_of_work::Executor;

pub struct AuditLogRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    pub async fn create(&self, audit_log: &AuditLogModel) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, audit_log).await
    }
}

#[async_trait]
impl Load<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
        self.load_batch(&[id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| RepositoryError::NotFound { entity: "audit log", id }.into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<AuditLogModel>>, Box<dyn Error + Send + Sync>> {
        super::load_batch::load_batch_impl(&self.executor, ids).await
    }
}
