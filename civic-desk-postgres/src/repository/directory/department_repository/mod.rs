pub mod create_batch;
pub mod find_all;
pub mod load_batch;
pub mod repo_impl;

pub use repo_impl::DepartmentRepositoryImpl;
