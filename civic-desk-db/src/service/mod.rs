pub mod complaint_service;

pub use complaint_service::*;
