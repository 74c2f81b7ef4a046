//! Conversion of raw request payloads into validated domain input.

use crate::task::domain::{PatchField, TaskDomainError, TaskState};
use crate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use crate::user::domain::UserId;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("null")]
#[case("  ")]
fn empty_or_null_assignee_means_unassigned(#[case] raw: &str) {
    let draft = CreateTaskRequest::new("Plan")
        .with_assignee(raw)
        .with_state("done")
        .into_new_task(&TaskState::backlog())
        .expect("valid request");

    assert_eq!(draft.assignee, None);
}

#[rstest]
fn missing_state_defaults_to_backlog() {
    let draft = CreateTaskRequest::new("Plan")
        .with_assignee(UserId::new().to_string())
        .into_new_task(&TaskState::backlog())
        .expect("valid request");

    assert_eq!(draft.state, TaskState::backlog());
}

#[rstest]
fn malformed_assignee_is_rejected() {
    let result = CreateTaskRequest::new("Plan")
        .with_assignee("u2")
        .into_new_task(&TaskState::backlog());

    assert_eq!(result, Err(TaskDomainError::InvalidAssignee("u2".to_owned())));
}

#[rstest]
fn update_request_reports_present_keys() {
    let request = UpdateTaskRequest::new()
        .with_title("x")
        .with_state("done")
        .with_description("");

    assert_eq!(
        request.fields(),
        vec![PatchField::State, PatchField::Title, PatchField::Description]
    );
}

#[rstest]
fn update_request_converts_assignee_and_priority() {
    let assignee = UserId::new();
    let patch = UpdateTaskRequest::new()
        .with_priority(3.8)
        .with_assignee(assignee.to_string())
        .into_patch()
        .expect("valid patch");

    assert_eq!(patch.priority.map(|priority| priority.value()), Some(3));
    assert_eq!(patch.assignee, Some(Some(assignee)));

    let unassign = UpdateTaskRequest::new()
        .with_assignee("")
        .into_patch()
        .expect("valid patch");
    assert_eq!(unassign.assignee, Some(None));
}

#[rstest]
fn blank_title_in_update_is_rejected() {
    let result = UpdateTaskRequest::new().with_title("  ").into_patch();
    assert_eq!(result, Err(TaskDomainError::EmptyTitle));
}
