//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PageRequest, PaginatedResult, PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    validation::ValidTask,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &ValidTask) -> TaskRepositoryResult<TaskId> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(TaskId::from_raw(id))
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn list_page(&self, request: PageRequest) -> TaskRepositoryResult<PaginatedResult<Task>> {
        let offset = i64::try_from(request.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = i64::from(request.page_size());
        self.run_blocking(move |connection| {
            // One snapshot so the count and the slice agree.
            let (total, rows) = connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, DieselError, _>(|tx| {
                    let total = tasks::table.count().get_result::<i64>(tx)?;
                    let rows = tasks::table
                        .order(tasks::id.desc())
                        .limit(limit)
                        .offset(offset)
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(tx)?;
                    Ok((total, rows))
                })
                .map_err(TaskRepositoryError::persistence)?;
            let total_count = u64::try_from(total).map_err(TaskRepositoryError::persistence)?;
            let items = rows.into_iter().map(row_to_task).collect();
            Ok(PaginatedResult::new(items, total_count, request))
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        task: &ValidTask,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        let changeset = to_changeset(task, updated_at);
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn toggle(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            // Flip and stamp must stay a single statement.
            let affected = diesel::sql_query(concat!(
                "UPDATE tasks SET completed = NOT completed, ",
                "updated_at = GREATEST($2, created_at) ",
                "WHERE id = $1",
            ))
            .bind::<diesel::sql_types::BigInt, _>(id.into_inner())
            .bind::<diesel::sql_types::Timestamptz, _>(at)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn check_health(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query("SELECT 1")
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &ValidTask) -> NewTaskRow {
    let draft = task.draft();
    NewTaskRow {
        title: draft.title().to_owned(),
        description: draft.description().to_owned(),
        long_description: draft.long_description().map(str::to_owned),
        completed: draft.completed(),
    }
}

fn to_changeset(task: &ValidTask, updated_at: DateTime<Utc>) -> TaskChangeset {
    let draft = task.draft();
    TaskChangeset {
        title: draft.title().to_owned(),
        description: draft.description().to_owned(),
        long_description: draft.long_description().map(str::to_owned),
        completed: draft.completed(),
        updated_at: Some(updated_at),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        description,
        long_description,
        completed,
        created_at,
        updated_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_raw(id),
        title,
        description,
        long_description,
        completed,
        created_at,
        updated_at,
    })
}
