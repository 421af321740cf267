//! Service flows exercised end to end over the in-memory store.

use rstest::rstest;
use taskboard::task::{
    domain::{PageRequest, TaskDraft},
    services::TaskOutcome,
};

use super::helpers::{TestService, service};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_survives_a_full_lifecycle(service: TestService) {
    let draft = TaskDraft::new("Plan the trip", "Pick dates and book the train")
        .with_long_description("Check the rail strike calendar first");
    let TaskOutcome::Success(id) = service
        .create_task(draft.clone())
        .await
        .expect("create should succeed")
    else {
        panic!("valid draft should be created");
    };

    let created = service
        .get_task_by_id(id)
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(created.to_draft(), draft);

    let toggled = service
        .toggle_task_completion(id)
        .await
        .expect("toggle should succeed");
    assert_eq!(toggled, TaskOutcome::Success(id));

    let edited = TaskDraft::new("Plan the trip", "Dates picked, train still to book");
    let updated = service
        .update_task(id, edited.clone())
        .await
        .expect("update should succeed");
    assert_eq!(updated, TaskOutcome::Success(id));

    let stored = service
        .get_task_by_id(id)
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.to_draft(), edited);
    assert_eq!(stored.created_at(), created.created_at());
    assert!(stored.updated_at() >= Some(stored.created_at()));

    let deleted = service.delete_task(id).await.expect("delete should succeed");
    assert_eq!(deleted, TaskOutcome::Success(id));
    let page = service
        .get_paginated_tasks(PageRequest::default())
        .await
        .expect("listing should succeed");
    assert_eq!(page.total_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_drafts_are_not_listed(service: TestService) {
    let outcome = service
        .create_task(TaskDraft::new("Hi", "Too short"))
        .await
        .expect("validation failure is not an error");
    assert!(matches!(outcome, TaskOutcome::Invalid(ref errors) if errors.len() == 2));

    let page = service
        .get_paginated_tasks(PageRequest::default())
        .await
        .expect("listing should succeed");
    assert!(page.items().is_empty());
}
