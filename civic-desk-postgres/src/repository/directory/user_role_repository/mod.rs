pub mod assign;
pub mod create_batch;
pub mod find_by_user_id;
pub mod repo_impl;

pub use repo_impl::UserRoleRepositoryImpl;
