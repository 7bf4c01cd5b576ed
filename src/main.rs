//! event-reports server
//!
//! Reads configuration from the environment (`PORT`, `REPORTS_DIR`, `SEPARATOR_IMAGE`,
//! `FETCH_TIMEOUT_SECS`, `FETCH_CONCURRENCY`) and serves the report API until SIGINT or
//! SIGTERM. Log verbosity follows `RUST_LOG` (default `info`).

use event_reports::{Config, run_with_shutdown};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    run_with_shutdown(config).await?;

    Ok(())
}
