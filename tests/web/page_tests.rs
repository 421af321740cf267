//! Read-only pages.

use axum::http::StatusCode;
use rstest::rstest;
use taskboard::config::AppEnvironment;

use super::helpers::{TestApp, app, get, send, unavailable_router};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn root_redirects_to_task_list(app: TestApp) {
    let response = app.send(get("/")).await;
    assert_eq!(response.0, StatusCode::SEE_OTHER);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_list_says_so(app: TestApp) {
    let (status, body) = app.send(get("/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No tasks yet."));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_paginates_newest_first(app: TestApp) {
    for n in 1..=12 {
        app.seed(&format!("Chore {n:02}"), "Something around the house")
            .await;
    }

    let (_, first) = app.send(get("/tasks")).await;
    let (_, second) = app.send(get("/tasks?page=2")).await;

    assert!(first.contains("Chore 12"));
    assert!(!first.contains("Chore 02"));
    assert!(first.contains("Page 1 of 2"));
    assert!(second.contains("Chore 01"));
    assert!(second.contains("Page 2 of 2"));
}

#[rstest]
#[case("/tasks?page=abc")]
#[case("/tasks?page=0")]
#[case("/tasks?page=-2")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_page_falls_back_to_first(app: TestApp, #[case] uri: &str) {
    for n in 1..=11 {
        app.seed(&format!("Chore {n:02}"), "Something around the house")
            .await;
    }
    let (status, body) = app.send(get(uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Page 1 of 2"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_page_shows_task(app: TestApp) {
    let id = app.seed("Water plants", "Both balconies, twice").await;
    let (status, body) = app.send(get(&format!("/tasks/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Water plants"));
    assert!(body.contains("Pending"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_detail_shows_error_banner(app: TestApp) {
    let (status, body) = app.send(get("/tasks/77")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Task with ID 77 was not found"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_form_is_prefilled(app: TestApp) {
    let id = app.seed("Water plants", "Both balconies, twice").await;
    let (status, body) = app.send(get(&format!("/tasks/{id}/edit"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Water plants""#));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_form_renders(app: TestApp) {
    let (status, body) = app.send(get("/tasks/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("New task"));
    assert!(body.contains(r#"<input name="completed" type="checkbox">"#));
}

#[rstest]
#[case("/tasks/abc")]
#[case("/tasks/abc/edit")]
#[case("/tasks/%207")]
#[case("/tasks/7%20")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_id_is_bad_request(app: TestApp, #[case] uri: &str) {
    for n in 1..=7 {
        app.seed(&format!("Chore {n:02}"), "Something around the house")
            .await;
    }
    let (status, body) = app.send(get(uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid task ID");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_is_internal_error() {
    let router = unavailable_router(AppEnvironment::Test);
    let (status, body) = send(&router, get("/tasks")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal server error");
}
