//! Service layer that validates task input and drives the repository.

use crate::task::{
    domain::{PageRequest, PaginatedResult, Task, TaskDraft, TaskId, mutation_stamp},
    ports::{TaskRepository, TaskRepositoryError},
    validation::{FieldErrors, validate_task},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Result of a mutating task operation.
///
/// Validation failures and missing tasks are ordinary outcomes, not errors;
/// only store failures surface as [`TaskServiceError`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum TaskOutcome {
    /// The operation completed for the given task.
    Success(TaskId),
    /// The submitted draft failed validation.
    Invalid(FieldErrors),
    /// No task has the targeted identifier.
    NotFound,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates and stores a new task.
    ///
    /// New tasks always start incomplete, whatever the draft says. The
    /// repository is only called when validation passes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn create_task(&self, draft: TaskDraft) -> TaskServiceResult<TaskOutcome> {
        let valid = match validate_task(draft.with_completed(false)) {
            Ok(valid) => valid,
            Err(errors) => {
                debug!(%errors, "rejected task creation");
                return Ok(TaskOutcome::Invalid(errors));
            }
        };

        let id = self.repository.create(&valid).await?;
        info!(task_id = %id, "created task");
        Ok(TaskOutcome::Success(id))
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_task_by_id(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Retrieves one page of tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the query fails.
    pub async fn get_paginated_tasks(
        &self,
        request: PageRequest,
    ) -> TaskServiceResult<PaginatedResult<Task>> {
        Ok(self.repository.list_page(request).await?)
    }

    /// Validates a draft and applies it to an existing task.
    ///
    /// A missing task short-circuits to [`TaskOutcome::NotFound`] before the
    /// draft is validated. The creation timestamp is preserved and
    /// `updated_at` is stamped from the service clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        draft: TaskDraft,
    ) -> TaskServiceResult<TaskOutcome> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            warn!(task_id = %id, "update requested for unknown task");
            return Ok(TaskOutcome::NotFound);
        };

        let valid = match validate_task(draft) {
            Ok(valid) => valid,
            Err(errors) => {
                debug!(task_id = %id, %errors, "rejected task update");
                return Ok(TaskOutcome::Invalid(errors));
            }
        };

        let updated_at = mutation_stamp(existing.created_at(), self.clock.utc());
        if self.repository.update(id, &valid, updated_at).await? {
            info!(task_id = %id, "updated task");
            Ok(TaskOutcome::Success(id))
        } else {
            warn!(task_id = %id, "task disappeared before update");
            Ok(TaskOutcome::NotFound)
        }
    }

    /// Flips a task's completion flag.
    ///
    /// Persisted values are not revalidated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn toggle_task_completion(&self, id: TaskId) -> TaskServiceResult<TaskOutcome> {
        let toggled = self.repository.toggle(id, self.clock.utc()).await?;
        Ok(affected_outcome(id, toggled, "toggled task completion"))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<TaskOutcome> {
        let deleted = self.repository.delete(id).await?;
        Ok(affected_outcome(id, deleted, "deleted task"))
    }

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store probe fails.
    pub async fn check_health(&self) -> TaskServiceResult<()> {
        Ok(self.repository.check_health().await?)
    }
}

fn affected_outcome(id: TaskId, affected: bool, action: &'static str) -> TaskOutcome {
    if affected {
        info!(task_id = %id, "{action}");
        TaskOutcome::Success(id)
    } else {
        warn!(task_id = %id, "no task matched: {action}");
        TaskOutcome::NotFound
    }
}
