use std::sync::Arc;

use super::{AuditLinkRepositoryImpl, AuditLogRepositoryImpl};
use postgres_unit_of_work::Executor;

/// Builds the audit repositories sharing one executor
#[derive(Default)]
pub struct AuditRepoFactory {}

impl AuditRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_audit_log_repo(&self, executor: &Executor) -> Arc<AuditLogRepositoryImpl> {
        Arc::new(AuditLogRepositoryImpl::new(executor.clone()))
    }

    pub fn build_audit_link_repo(&self, executor: &Executor) -> Arc<AuditLinkRepositoryImpl> {
        Arc::new(AuditLinkRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> AuditRepositories {
        AuditRepositories {
            audit_log_repository: self.build_audit_log_repo(executor),
            audit_link_repository: self.build_audit_link_repo(executor),
        }
    }
}

pub struct AuditRepositories {
    pub audit_log_repository: Arc<AuditLogRepositoryImpl>,
    pub audit_link_repository: Arc<AuditLinkRepositoryImpl>,
}
