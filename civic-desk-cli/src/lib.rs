pub mod cli;
pub mod config;
pub mod handler;
pub mod output;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
