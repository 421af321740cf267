//! HTTP surface for the task list.
//!
//! Routes render server-side HTML through [`views::TaskViews`]. The router is
//! generic over the repository so tests can drive it with the in-memory
//! adapter.

mod error;
mod forms;
mod handlers;
mod health;
pub mod views;

pub use error::WebError;
pub use forms::{PageQuery, TaskForm};

use crate::config::AppEnvironment;
use crate::task::{ports::TaskRepository, services::TaskService};
use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};
use mockable::Clock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use views::TaskViews;

/// Shared handler state.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: Arc<TaskService<R, C>>,
    views: Arc<TaskViews>,
    page_size: u32,
    environment: AppEnvironment,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            views: Arc::clone(&self.views),
            page_size: self.page_size,
            environment: self.environment,
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Bundles the handler dependencies.
    #[must_use]
    pub const fn new(
        service: Arc<TaskService<R, C>>,
        views: Arc<TaskViews>,
        page_size: u32,
        environment: AppEnvironment,
    ) -> Self {
        Self {
            service,
            views,
            page_size,
            environment,
        }
    }
}

/// Builds the application router.
#[must_use]
pub fn router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(|| async { Redirect::to("/tasks") }))
        .route(
            "/tasks",
            get(handlers::list_tasks::<R, C>).post(handlers::create_task::<R, C>),
        )
        .route("/tasks/create", get(handlers::create_form::<R, C>))
        .route("/tasks/:id", get(handlers::show_task::<R, C>))
        .route(
            "/tasks/:id/edit",
            get(handlers::edit_form::<R, C>).post(handlers::update_task::<R, C>),
        )
        .route("/tasks/:id/toggle", post(handlers::toggle_task::<R, C>))
        .route("/tasks/:id/delete", post(handlers::delete_task::<R, C>))
        .route("/admin/liveness", get(health::liveness))
        .route("/admin/readiness", get(health::readiness::<R, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
