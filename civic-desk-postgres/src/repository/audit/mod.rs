pub mod audit_link_repository;
pub mod audit_log_repository;
pub mod factory;

pub use audit_link_repository::AuditLinkRepositoryImpl;
pub use audit_log_repository::AuditLogRepositoryImpl;
pub use factory::{AuditRepoFactory, AuditRepositories};
