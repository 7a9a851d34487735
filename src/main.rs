//! Binary entry point for the mail relay.
//!
//! Loads configuration, installs the tracing subscriber, and hands off to
//! [`mail_relay::server::run`].

use mail_relay::{config, server};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; deployed environments set variables directly.
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    // RUST_LOG wins over the configured level when both are set.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    server::run(config).await
}
