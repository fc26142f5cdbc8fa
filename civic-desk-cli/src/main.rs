//! `civic-desk` operator binary.
//!
//! Configuration comes from the environment (a `.env` file is loaded first);
//! logs go to stderr so exported CSV on stdout stays clean.

use clap::Parser;
use civic_desk_cli::{handler, AppConfig, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    init_logging(&config);

    handler::run(cli, config).await
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
