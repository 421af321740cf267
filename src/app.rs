//! Application bootstrap: pool, schema, router and server.

use crate::config::{AppConfig, DatabaseConfig};
use crate::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool, apply_migrations};
use crate::task::services::TaskService;
use crate::web::{self, AppState, views::TaskViews};
use axum::Router;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Failures that stop the application before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),

    /// Applying the schema failed.
    #[error("failed to apply migrations: {0}")]
    Migration(#[source] diesel::result::Error),

    /// The embedded templates failed to load.
    #[error("failed to load templates: {0}")]
    Views(#[source] minijinja::Error),

    /// Binding or serving the listener failed.
    #[error("server I/O failed: {0}")]
    Io(#[source] std::io::Error),

    /// A blocking bootstrap task panicked or was cancelled.
    #[error("bootstrap task failed: {0}")]
    Join(#[source] tokio::task::JoinError),
}

/// Builds the `PostgreSQL` pool described by `config`.
///
/// `min_idle` is capped at the pool size, which is at least one.
///
/// # Errors
///
/// Returns [`StartupError::Pool`] if the pool cannot open its initial
/// connections.
pub fn build_pool(config: &DatabaseConfig) -> Result<TaskPgPool, StartupError> {
    let max_size = config.max_pool_size.max(1);
    let manager = ConnectionManager::<PgConnection>::new(&config.url);
    Pool::builder()
        .max_size(max_size)
        .min_idle(Some(config.min_idle.min(max_size)))
        .connection_timeout(config.connection_timeout)
        .build(manager)
        .map_err(StartupError::Pool)
}

/// Applies the task schema on a pooled connection.
///
/// # Errors
///
/// Returns [`StartupError::Migration`] when the SQL fails, or
/// [`StartupError::Pool`] when no connection is available.
pub async fn run_migrations(pool: &TaskPgPool) -> Result<(), StartupError> {
    let handle = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = handle.get().map_err(StartupError::Pool)?;
        apply_migrations(&mut connection).map_err(StartupError::Migration)
    })
    .await
    .map_err(StartupError::Join)?
}

/// Wires the `PostgreSQL`-backed application and returns its router.
///
/// # Errors
///
/// Returns a [`StartupError`] if the pool, the migrations or the templates
/// fail.
pub async fn build_postgres_router(config: &AppConfig) -> Result<Router, StartupError> {
    let pool = build_pool(&config.database)?;
    run_migrations(&pool).await?;
    info!("database schema is up to date");

    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let service = Arc::new(TaskService::new(repository, Arc::new(DefaultClock)));
    let views = Arc::new(TaskViews::new(Arc::new(DefaultClock)).map_err(StartupError::Views)?);
    let state = AppState::new(service, views, config.page_size, config.environment);
    Ok(web::router(state))
}

/// Serves `router` on the configured address until Ctrl-C.
///
/// # Errors
///
/// Returns [`StartupError::Io`] if binding or serving fails.
pub async fn serve(config: &AppConfig, router: Router) -> Result<(), StartupError> {
    let listener = TcpListener::bind(config.bind_address())
        .await
        .map_err(StartupError::Io)?;
    let address = listener.local_addr().map_err(StartupError::Io)?;
    info!(%address, environment = config.environment.as_str(), "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Io)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
