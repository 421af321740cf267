//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::BoxError;
use super::cluster::{TemporaryDatabase, shared_cluster};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;
use taskboard::app::{build_pool, run_migrations};
use taskboard::config::DatabaseConfig;
use taskboard::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::TaskDraft,
    services::TaskService,
    validation::{ValidTask, validate_task},
};
use uuid::Uuid;

/// Repository, service and database for one test.
pub struct TaskTestContext {
    pub pool: TaskPgPool,
    pub repository: Arc<PostgresTaskRepository>,
    pub service: TaskService<PostgresTaskRepository, DefaultClock>,
    _temp_db: TemporaryDatabase,
}

/// Creates a migrated database and wires a repository to it.
///
/// # Errors
///
/// Returns an error if the cluster, database or pool cannot be prepared.
pub async fn setup_task_context() -> Result<TaskTestContext, BoxError> {
    let cluster = shared_cluster()?;
    let db = cluster
        .temporary_database(format!("tasks_{}", Uuid::new_v4().simple()))
        .await?;

    let pool = build_pool(&DatabaseConfig {
        url: db.url().to_owned(),
        max_pool_size: 4,
        min_idle: 0,
        connection_timeout: Duration::from_secs(10),
    })?;
    run_migrations(&pool).await?;

    let repository = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let service = TaskService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    Ok(TaskTestContext {
        pool,
        repository,
        service,
        _temp_db: db,
    })
}

/// Provides a fresh task database per test.
#[fixture]
pub async fn context() -> Result<TaskTestContext, BoxError> {
    setup_task_context().await
}

/// Builds a validated task numbered `n`.
pub fn numbered_task(n: usize) -> ValidTask {
    validate_task(TaskDraft::new(
        format!("Task number {n}"),
        format!("Description for task {n}"),
    ))
    .expect("numbered task should be valid")
}
