use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use snippetbox::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let (filter, rejected) = match config.env_filter() {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Some(e) = rejected {
        warn!("{e}; logging at info");
    }

    info!(addr = %config.addr, "snippetbox starting");

    snippetbox::app::run(config)
        .await
        .context("snippetbox exited with an error")
}
