//! Route handlers for the task pages.
//!
//! Each mutating handler matches the service outcome exhaustively and picks
//! the page to render from it.

use super::AppState;
use super::error::WebError;
use super::forms::{PageQuery, TaskForm};
use super::views::Banner;
use crate::task::{
    domain::{PageRequest, TaskId},
    ports::TaskRepository,
    services::TaskOutcome,
};
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use mockable::Clock;
use tracing::debug;

type HandlerResult = Result<Response, WebError>;

fn invalid_task_id(raw: &str) -> Response {
    debug!(raw_id = raw, "rejected malformed task id");
    (StatusCode::BAD_REQUEST, "Invalid task ID").into_response()
}

fn not_found_message(id: TaskId) -> String {
    format!("Task with ID {id} was not found")
}

async fn render_index<R, C>(state: &AppState<R, C>, page: u32, banner: &Banner) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = PageRequest::new(page, state.page_size);
    let tasks = state.service.get_paginated_tasks(request).await?;
    let body = state.views.index(&tasks, banner)?;
    Ok(Html(body).into_response())
}

/// `GET /tasks`
pub(super) async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    Query(query): Query<PageQuery>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    render_index(&state, query.page_number(), &Banner::None).await
}

/// `GET /tasks/create`
pub(super) async fn create_form<R, C>(State(state): State<AppState<R, C>>) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let body = state.views.create_form(None, None)?;
    Ok(Html(body).into_response())
}

/// `POST /tasks`
pub(super) async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    Form(form): Form<TaskForm>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let draft = form.into_draft().with_completed(false);
    match state.service.create_task(draft.clone()).await? {
        TaskOutcome::Success(_) => {
            render_index(&state, 1, &Banner::success("Task created successfully!")).await
        }
        TaskOutcome::Invalid(errors) => {
            let body = state.views.create_form(Some(&draft), Some(&errors))?;
            Ok(Html(body).into_response())
        }
        TaskOutcome::NotFound => Err(WebError::UnexpectedOutcome("create reported not found")),
    }
}

/// `GET /tasks/{id}`
pub(super) async fn show_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return Ok(invalid_task_id(&raw_id));
    };
    match state.service.get_task_by_id(id).await? {
        Some(task) => Ok(Html(state.views.show(&task, &Banner::None)?).into_response()),
        None => render_index(&state, 1, &Banner::error(not_found_message(id))).await,
    }
}

/// `GET /tasks/{id}/edit`
pub(super) async fn edit_form<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return Ok(invalid_task_id(&raw_id));
    };
    match state.service.get_task_by_id(id).await? {
        Some(task) => {
            let body = state.views.edit_form(id, &task.to_draft(), None)?;
            Ok(Html(body).into_response())
        }
        None => render_index(&state, 1, &Banner::error(not_found_message(id))).await,
    }
}

/// `POST /tasks/{id}/edit`
pub(super) async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
    Form(form): Form<TaskForm>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return Ok(invalid_task_id(&raw_id));
    };
    let draft = form.into_draft();
    match state.service.update_task(id, draft.clone()).await? {
        TaskOutcome::Success(_) => {
            render_index(&state, 1, &Banner::success("Task updated successfully!")).await
        }
        TaskOutcome::Invalid(errors) => {
            let body = state.views.edit_form(id, &draft, Some(&errors))?;
            Ok(Html(body).into_response())
        }
        TaskOutcome::NotFound => {
            render_index(&state, 1, &Banner::error(not_found_message(id))).await
        }
    }
}

/// `POST /tasks/{id}/toggle`
pub(super) async fn toggle_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return Ok(invalid_task_id(&raw_id));
    };
    match state.service.toggle_task_completion(id).await? {
        TaskOutcome::Success(_) => {
            // A concurrent delete can remove the task between the two calls.
            let Some(task) = state.service.get_task_by_id(id).await? else {
                return Ok((StatusCode::NOT_FOUND, not_found_message(id)).into_response());
            };
            let banner = Banner::success("Task status updated successfully!");
            Ok(Html(state.views.show(&task, &banner)?).into_response())
        }
        TaskOutcome::NotFound => {
            Ok((StatusCode::NOT_FOUND, not_found_message(id)).into_response())
        }
        TaskOutcome::Invalid(_) => {
            Err(WebError::UnexpectedOutcome("toggle reported invalid input"))
        }
    }
}

/// `POST /tasks/{id}/delete`
pub(super) async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return Ok(invalid_task_id(&raw_id));
    };
    match state.service.delete_task(id).await? {
        TaskOutcome::Success(_) => {
            render_index(&state, 1, &Banner::success("Task deleted successfully!")).await
        }
        TaskOutcome::NotFound => {
            Ok((StatusCode::NOT_FOUND, not_found_message(id)).into_response())
        }
        TaskOutcome::Invalid(_) => {
            Err(WebError::UnexpectedOutcome("delete reported invalid input"))
        }
    }
}
