use civic_desk_db::models::AuditLinkModel;
use std::error::Error;
use uuid::Uuid;

use postgres_unit_of_work::Executor;

pub struct AuditLinkRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLinkRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    pub async fn create(&self, audit_link: &AuditLinkModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, audit_link).await
    }

    /// Entities written under one audit log
    pub async fn find_by_audit_log_id(
        &self,
        audit_log_id: Uuid,
    ) -> Result<Vec<AuditLinkModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_audit_log_id_impl(self, audit_log_id).await
    }
}
