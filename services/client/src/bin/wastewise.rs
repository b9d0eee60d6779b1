//! services/client/src/bin/wastewise.rs

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use client_lib::{
    adapters::HttpApiAdapter,
    cli::{self, Cli},
    config::Config,
    error::ClientError,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wastewise_core::domain::LoadStatus;

#[tokio::main]
async fn main() -> Result<ExitCode, ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Using API at {}", config.api.base_url);

    // --- 2. Initialize the API Adapter ---
    let adapter = HttpApiAdapter::new(config.api.clone())
        .map_err(|e| ClientError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    // --- 3. Open the Requested Screen ---
    let status = cli::run(Arc::new(adapter), cli.command()).await?;

    Ok(match status {
        LoadStatus::Failed => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
