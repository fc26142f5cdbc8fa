pub mod create;
pub mod find_by_complaint_id;
pub mod repo_impl;

pub use repo_impl::StatusHistoryRepositoryImpl;
