pub mod create_batch;
pub mod exist_by_ids;
pub mod find_all;
pub mod find_by_assigned_officer_id;
pub mod find_by_user_id;
pub mod load_audits;
pub mod load_batch;
pub mod repo_impl;
pub mod update_batch;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ComplaintRepositoryImpl;
