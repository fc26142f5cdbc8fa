use std::sync::Arc;

use super::{ComplaintRepositoryImpl, StatusHistoryRepositoryImpl};
use postgres_unit_of_work::Executor;

/// Builds the complaint and status history repositories sharing one executor
#[derive(Default)]
pub struct ComplaintRepoFactory {}

impl ComplaintRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_complaint_repo(&self, executor: &Executor) -> Arc<ComplaintRepositoryImpl> {
        Arc::new(ComplaintRepositoryImpl::new(executor.clone()))
    }

    pub fn build_status_history_repo(
        &self,
        executor: &Executor,
    ) -> Arc<StatusHistoryRepositoryImpl> {
        Arc::new(StatusHistoryRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> ComplaintRepositories {
        ComplaintRepositories {
            complaint_repository: self.build_complaint_repo(executor),
            status_history_repository: self.build_status_history_repo(executor),
        }
    }
}

pub struct ComplaintRepositories {
    pub complaint_repository: Arc<ComplaintRepositoryImpl>,
    pub status_history_repository: Arc<StatusHistoryRepositoryImpl>,
}
