use std::sync::Arc;

use super::{DepartmentRepositoryImpl, UserRoleRepositoryImpl};
use postgres_unit_of_work::Executor;

/// Builds the department and role-assignment repositories sharing one executor
#[derive(Default)]
pub struct DirectoryRepoFactory {}

impl DirectoryRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_department_repo(&self, executor: &Executor) -> Arc<DepartmentRepositoryImpl> {
        Arc::new(DepartmentRepositoryImpl::new(executor.clone()))
    }

    pub fn build_user_role_repo(&self, executor: &Executor) -> Arc<UserRoleRepositoryImpl> {
        Arc::new(UserRoleRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> DirectoryRepositories {
        DirectoryRepositories {
            department_repository: self.build_department_repo(executor),
            user_role_repository: self.build_user_role_repo(executor),
        }
    }
}

pub struct DirectoryRepositories {
    pub department_repository: Arc<DepartmentRepositoryImpl>,
    pub user_role_repository: Arc<UserRoleRepositoryImpl>,
}
