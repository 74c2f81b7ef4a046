//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Tracker, tracker};
use rstest::rstest;
use taskflow::access::AuthorizationError;
use taskflow::task::services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_tasks_always_start_in_backlog(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, _) = tracker.admin_and_member().await?;

    for state in ["inprogress", "done", "anything"] {
        let created = tracker
            .lifecycle
            .create_task(&admin, CreateTaskRequest::new("Loose end").with_state(state))
            .await?;
        eyre::ensure!(created.task.state().as_str() == "backlog");
        eyre::ensure!(created.task.assignee().is_none());
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_may_move_but_not_retitle(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let member_principal = taskflow::access::Principal::member(member.id());
    let task = tracker.assigned_task(&admin, &member, "inprogress").await?;
    let id = task.task.id();

    let moved = tracker
        .lifecycle
        .update_task(&member_principal, id, UpdateTaskRequest::new().with_state("done"))
        .await?;
    eyre::ensure!(moved.task.state().as_str() == "done");

    let denied = tracker
        .lifecycle
        .update_task(
            &member_principal,
            id,
            UpdateTaskRequest::new().with_state("backlog").with_title("x"),
        )
        .await;
    eyre::ensure!(matches!(
        denied,
        Err(TaskLifecycleError::Authorization(
            AuthorizationError::PatchNotPermitted { .. }
        ))
    ));

    let stored = tracker.lifecycle.get_task(&admin, id).await?;
    eyre::ensure!(stored.task.state().as_str() == "done");
    eyre::ensure!(stored.task.title().as_str() == "Write release notes");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unchanged_priority_still_notifies_once(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let member_principal = taskflow::access::Principal::member(member.id());
    let task = tracker.assigned_task(&admin, &member, "inprogress").await?;
    let id = task.task.id();
    tracker
        .lifecycle
        .update_task(&admin, id, UpdateTaskRequest::new().with_priority(3.0))
        .await?;
    let before = tracker.inbox.list(&member_principal).await?.len();

    tracker
        .lifecycle
        .update_task(&admin, id, UpdateTaskRequest::new().with_priority(3.0))
        .await?;

    let inbox = tracker.inbox.list(&member_principal).await?;
    eyre::ensure!(inbox.len() == before + 1, "expected exactly one new notification");
    let newest = inbox.first().ok_or_else(|| eyre::eyre!("empty inbox"))?;
    eyre::ensure!(newest.message().contains("changed to 3"));
    Ok(())
}

#[rstest]
#[case("inprogress", 0)]
#[case("done", 1)]
#[tokio::test(flavor = "multi_thread")]
async fn state_change_notifies_only_on_a_real_change(
    tracker: Tracker,
    #[case] target: &str,
    #[case] expected: usize,
) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let member_principal = taskflow::access::Principal::member(member.id());
    let task = tracker.assigned_task(&admin, &member, "inprogress").await?;
    let before = tracker.inbox.list(&member_principal).await?.len();

    tracker
        .lifecycle
        .update_task(
            &admin,
            task.task.id(),
            UpdateTaskRequest::new().with_state(target),
        )
        .await?;

    let after = tracker.inbox.list(&member_principal).await?.len();
    eyre::ensure!(after - before == expected, "got {} new notifications", after - before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn state_change_on_unassigned_task_is_silent(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let member_principal = taskflow::access::Principal::member(member.id());
    let task = tracker
        .lifecycle
        .create_task(&admin, CreateTaskRequest::new("Nobody's"))
        .await?;

    tracker
        .lifecycle
        .update_task(
            &admin,
            task.task.id(),
            UpdateTaskRequest::new().with_state("done"),
        )
        .await?;

    eyre::ensure!(tracker.inbox.list(&member_principal).await?.is_empty());
    eyre::ensure!(tracker.inbox.list(&admin).await?.is_empty());
    Ok(())
}
