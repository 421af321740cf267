//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskDraft,
    services::TaskService,
    validation::{ValidTask, validate_task},
};

/// Service type used by the in-memory tests.
pub type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Provides an empty in-memory repository.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Provides a service over an empty in-memory repository.
#[fixture]
pub fn service() -> TestService {
    TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Builds a validated task numbered `n`.
pub fn numbered_task(n: usize) -> ValidTask {
    validate_task(TaskDraft::new(
        format!("Task number {n}"),
        format!("Description for task {n}"),
    ))
    .expect("numbered task should be valid")
}
