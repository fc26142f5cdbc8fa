pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod repository_error;
pub mod service;
pub mod utils;
pub mod views;

pub use repository_error::RepositoryError;
