//! rendercheck - one-shot visual verification harness.
//!
//! Launches a headless browser, navigates to the configured page, waits
//! for the configured selector to render, and saves a full-page screenshot.
//! Any failure exits non-zero after printing diagnostics.

mod harness;

use anyhow::Context;
use rendercheck_core::VerifyConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = VerifyConfig::load_with_env().context("failed to load configuration")?;
    harness::run(&config).await
}
