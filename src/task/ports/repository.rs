//! Repository port for task persistence.

use crate::task::{
    domain::{PageRequest, PaginatedResult, Task, TaskId},
    validation::ValidTask,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation runs as one atomic unit against the backing store. Write
/// operations report whether a row was affected instead of failing when the
/// target identifier does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns its store-assigned identifier.
    ///
    /// The store sets the creation timestamp and leaves `updated_at` unset.
    async fn create(&self, task: &ValidTask) -> TaskRepositoryResult<TaskId>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one page of tasks, newest identifier first, with the total
    /// task count.
    async fn list_page(&self, request: PageRequest) -> TaskRepositoryResult<PaginatedResult<Task>>;

    /// Replaces the editable fields of an existing task and stamps
    /// `updated_at`.
    ///
    /// Returns `false` when no task has the identifier.
    async fn update(
        &self,
        id: TaskId,
        task: &ValidTask,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool>;

    /// Flips the completion flag and stamps `updated_at` in one atomic step.
    ///
    /// Returns `false` when no task has the identifier.
    async fn toggle(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<bool>;

    /// Removes a task.
    ///
    /// Returns `false` when no task has the identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Performs a cheap round-trip to the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store cannot be
    /// reached.
    async fn check_health(&self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
