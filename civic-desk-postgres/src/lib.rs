pub mod config;
pub mod postgres_repositories;
pub mod repository;
pub mod service;
pub mod unit_of_work;
pub mod utils;

pub use config::PostgresConfig;
pub use postgres_repositories::{PostgresRepositories, RepositorySession};
pub use service::ComplaintServiceImpl;

#[cfg(test)]
pub mod test_helper;
