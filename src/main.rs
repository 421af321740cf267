//! Taskboard server entry point.
//!
//! Reads configuration from the environment, applies the schema and serves
//! the task pages until interrupted.

use taskboard::app::{build_postgres_router, serve};
use taskboard::config::AppConfig;
use taskboard::telemetry::init_tracing;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_tracing();
    let config = AppConfig::from_env()?;
    let router = build_postgres_router(&config).await?;
    serve(&config, router).await?;
    Ok(())
}
