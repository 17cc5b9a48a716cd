use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use jobsy_client::cli::{dispatch, Cli};
use jobsy_client::config::ConfigManager;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load()?;
    config.ensure_directories()?;

    // Logs go to a file in the state dir so interactive output stays clean.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.environment.log_path)
        .with_context(|| {
            format!(
                "failed to open log file {}",
                config.environment.log_path.display()
            )
        })?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Arc::new(log_file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(api = %config.service.api_base_url, "starting jobsy client");

    dispatch(cli, &config).await
}
