pub mod complaint_repository;
pub mod factory;
pub mod status_history_repository;

pub use complaint_repository::ComplaintRepositoryImpl;
pub use factory::{ComplaintRepoFactory, ComplaintRepositories};
pub use status_history_repository::StatusHistoryRepositoryImpl;
