//! In-memory task repository for tests and local development.

use crate::task::{
    domain::{PageRequest, PaginatedResult, PersistedTaskData, Task, TaskId, mutation_stamp},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    validation::ValidTask,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a counter starting at 1 and are never
/// reused, mirroring a database sequence.
#[derive(Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository stamping creation times from the system
    /// clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty repository stamping creation times from `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryTaskRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskRepository")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Rebuilds `task` with new field values while keeping its identity and
/// creation time.
fn rebuild(
    task: &Task,
    valid: Option<&ValidTask>,
    completed: bool,
    updated_at: DateTime<Utc>,
) -> Task {
    let draft = valid.map_or_else(|| task.to_draft(), |v| v.draft().clone());
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        title: draft.title().to_owned(),
        description: draft.description().to_owned(),
        long_description: draft.long_description().map(str::to_owned),
        completed,
        created_at: task.created_at(),
        updated_at: Some(mutation_stamp(task.created_at(), updated_at)),
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &ValidTask) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write()?;
        let id = TaskId::from_raw(state.last_id + 1);
        let draft = task.draft();
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            long_description: draft.long_description().map(str::to_owned),
            completed: draft.completed(),
            created_at: self.clock.utc(),
            updated_at: None,
        });
        state.tasks.insert(id, stored);
        state.last_id = id.into_inner();
        Ok(id)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_page(&self, request: PageRequest) -> TaskRepositoryResult<PaginatedResult<Task>> {
        let state = self.read()?;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
        let items = state
            .tasks
            .values()
            .rev()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();
        let total = u64::try_from(state.tasks.len()).map_err(TaskRepositoryError::persistence)?;
        Ok(PaginatedResult::new(items, total, request))
    }

    async fn update(
        &self,
        id: TaskId,
        task: &ValidTask,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(existing) = state.tasks.get_mut(&id) else {
            return Ok(false);
        };
        *existing = rebuild(existing, Some(task), task.draft().completed(), updated_at);
        Ok(true)
    }

    async fn toggle(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        // Read and flip under one write guard.
        let mut state = self.write()?;
        let Some(existing) = state.tasks.get_mut(&id) else {
            return Ok(false);
        };
        *existing = rebuild(existing, None, !existing.completed(), at);
        Ok(true)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn check_health(&self) -> TaskRepositoryResult<()> {
        self.read().map(drop)
    }
}
