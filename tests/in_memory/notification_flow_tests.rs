//! In-memory integration tests for notifications and error reports.

use super::helpers::{Tracker, tracker};
use rstest::rstest;
use taskflow::access::Principal;
use taskflow::error::{ErrorReport, StatusClass};
use taskflow::notification::services::NotificationInboxError;
use taskflow::task::services::UpdateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_notification_can_be_read_only_by_its_owner(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let member_principal = Principal::member(member.id());
    tracker.assigned_task(&admin, &member, "inprogress").await?;

    let inbox = tracker.inbox.list(&member_principal).await?;
    eyre::ensure!(inbox.len() == 1, "expected one notification, got {}", inbox.len());
    let queued = inbox.first().ok_or_else(|| eyre::eyre!("empty inbox"))?;
    eyre::ensure!(!queued.is_read());

    let read = tracker
        .inbox
        .mark_read(&member_principal, queued.id())
        .await?;
    eyre::ensure!(read.is_read());

    let stolen = tracker.inbox.mark_read(&admin, queued.id()).await;
    eyre::ensure!(matches!(stolen, Err(NotificationInboxError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denied_patch_reports_forbidden(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let task = tracker.assigned_task(&admin, &member, "inprogress").await?;

    let err = tracker
        .lifecycle
        .update_task(
            &Principal::member(member.id()),
            task.task.id(),
            UpdateTaskRequest::new().with_title("mine now"),
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("member retitle should be denied"))?;

    let report = ErrorReport::from_error(&err);
    eyre::ensure!(report.status == StatusClass::Forbidden);
    eyre::ensure!(report.message.contains("title"), "message: {}", report.message);
    Ok(())
}
