//! Shared helpers for router tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::config::AppEnvironment;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PageRequest, PaginatedResult, Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{TaskOutcome, TaskService},
    validation::ValidTask,
};
use taskboard::web::{AppState, router, views::TaskViews};
use tower::ServiceExt;

/// Router plus a handle on its service for arranging state.
pub struct TestApp {
    pub router: Router,
    pub service: Arc<TaskService<InMemoryTaskRepository, DefaultClock>>,
}

impl TestApp {
    /// Stores a task directly through the service and returns its id.
    pub async fn seed(&self, title: &str, description: &str) -> TaskId {
        match self
            .service
            .create_task(TaskDraft::new(title, description))
            .await
            .expect("seeding should succeed")
        {
            TaskOutcome::Success(id) => id,
            other => panic!("seed draft should be valid, got {other:?}"),
        }
    }

    /// Sends a request and returns the status and body text.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        send(&self.router, request).await
    }
}

fn views() -> Arc<TaskViews> {
    Arc::new(TaskViews::new(Arc::new(DefaultClock)).expect("templates should load"))
}

/// Provides a router over an empty in-memory store.
#[fixture]
pub fn app() -> TestApp {
    let service = Arc::new(TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    ));
    let state = AppState::new(Arc::clone(&service), views(), 10, AppEnvironment::Test);
    TestApp {
        router: router(state),
        service,
    }
}

/// Builds a router whose store always fails.
pub fn unavailable_router(environment: AppEnvironment) -> Router {
    let service = Arc::new(TaskService::new(
        Arc::new(UnavailableRepository),
        Arc::new(DefaultClock),
    ));
    router(AppState::new(service, views(), 10, environment))
}

/// Sends `request` to `router`.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = String::from_utf8(bytes.to_vec()).expect("body should be UTF-8");
    (status, body)
}

/// Builds a `GET` request.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

/// Builds a form `POST` request.
pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .expect("request should build")
}

/// Repository whose every call fails as if the database were down.
struct UnavailableRepository;

fn unavailable() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other("database is down"))
}

#[async_trait]
impl TaskRepository for UnavailableRepository {
    async fn create(&self, _task: &ValidTask) -> TaskRepositoryResult<TaskId> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Err(unavailable())
    }

    async fn list_page(
        &self,
        _request: PageRequest,
    ) -> TaskRepositoryResult<PaginatedResult<Task>> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _id: TaskId,
        _task: &ValidTask,
        _updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        Err(unavailable())
    }

    async fn toggle(&self, _id: TaskId, _at: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        Err(unavailable())
    }

    async fn delete(&self, _id: TaskId) -> TaskRepositoryResult<bool> {
        Err(unavailable())
    }

    async fn check_health(&self) -> TaskRepositoryResult<()> {
        Err(unavailable())
    }
}
