pub mod department_repository;
pub mod factory;
pub mod user_role_repository;

pub use department_repository::DepartmentRepositoryImpl;
pub use factory::{DirectoryRepoFactory, DirectoryRepositories};
pub use user_role_repository::UserRoleRepositoryImpl;
