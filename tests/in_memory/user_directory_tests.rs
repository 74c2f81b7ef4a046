//! In-memory integration tests for the user directory.

use super::helpers::{Tracker, tracker};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_user_tasks_return_to_backlog(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let first = tracker.assigned_task(&admin, &member, "inprogress").await?;
    let second = tracker.assigned_task(&admin, &member, "done").await?;

    tracker.directory.delete_user(&admin, member.id()).await?;

    for id in [first.task.id(), second.task.id()] {
        let task = tracker.lifecycle.get_task(&admin, id).await?;
        eyre::ensure!(task.task.state().as_str() == "backlog");
        eyre::ensure!(task.task.assignee().is_none());
        eyre::ensure!(task.assignee_name.is_none());
    }
    let remaining = tracker.directory.list_users(&admin).await?;
    eyre::ensure!(
        remaining.iter().all(|user| user.id() != member.id()),
        "deleted user still listed"
    );
    Ok(())
}
