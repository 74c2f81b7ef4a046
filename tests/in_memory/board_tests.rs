//! In-memory integration tests for the board projection.

use super::helpers::{Tracker, tracker};
use rstest::rstest;
use taskflow::access::Principal;
use taskflow::board::domain::{ColumnId, ColumnUpdate};
use taskflow::board::ports::BoardRepository;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_in_unknown_column_is_on_the_board_but_in_no_bucket(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let stray = tracker
        .assigned_task(&admin, &member, "unknown-column")
        .await?;

    let board = tracker.boards.get_board(&admin).await?;

    let id = stray.task.id();
    eyre::ensure!(board.task(id).is_some(), "task missing from the task map");
    eyre::ensure!(
        board.columns().values().all(|column| !column.task_ids.contains(&id)),
        "task should not sit in any column"
    );
    let view = board.task(id).ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(view.assignee_name.as_deref() == Some("member"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_and_task_views_order_comments_oppositely(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let (admin, member) = tracker.admin_and_member().await?;
    let member_principal = Principal::member(member.id());
    let task = tracker.assigned_task(&admin, &member, "inprogress").await?;
    let id = task.task.id();
    for body in ["one", "two", "three"] {
        tracker
            .lifecycle
            .add_comment(&member_principal, id, body)
            .await?;
    }

    let board = tracker.boards.get_board(&member_principal).await?;
    let on_board: Vec<String> = board
        .task(id)
        .ok_or_else(|| eyre::eyre!("task missing from board"))?
        .comments
        .iter()
        .map(|view| view.comment.content().as_str().to_owned())
        .collect();
    let single = tracker.lifecycle.get_task(&member_principal, id).await?;
    let on_task: Vec<String> = single
        .comments
        .iter()
        .map(|view| view.comment.content().as_str().to_owned())
        .collect();

    eyre::ensure!(on_board == ["one", "two", "three"], "board order: {on_board:?}");
    eyre::ensure!(on_task == ["three", "two", "one"], "task order: {on_task:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_batch_commits_together(tracker: Tracker) -> Result<(), eyre::Report> {
    let (admin, _) = tracker.admin_and_member().await?;
    let updates = vec![
        ColumnUpdate::new("backlog", "A", 1)?,
        ColumnUpdate::new("inprogress", "B", 2)?,
    ];

    tracker.boards.update_columns(&admin, &updates).await?;

    let board = tracker.boards.get_board(&admin).await?;
    let titles: Vec<&str> = board
        .ordered_columns()
        .iter()
        .map(|column| column.title.as_str())
        .collect();
    eyre::ensure!(titles == ["A", "B"], "titles: {titles:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_batch_failing_mid_way_commits_nothing(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let (admin, _) = tracker.admin_and_member().await?;
    let order_before = tracker.board.load_column_order().await?;
    tracker.board.fail_order_writes(true)?;

    let result = tracker
        .boards
        .update_columns(
            &admin,
            &[
                ColumnUpdate::new("backlog", "A", 1)?,
                ColumnUpdate::new("inprogress", "B", 2)?,
            ],
        )
        .await;

    eyre::ensure!(result.is_err(), "batch should fail");
    let columns = tracker.board.list_columns().await?;
    let backlog = ColumnId::new("backlog")?;
    let inprogress = ColumnId::new("inprogress")?;
    for column in &columns {
        if column.id() == &backlog {
            eyre::ensure!(column.title() == "Backlog");
        }
        if column.id() == &inprogress {
            eyre::ensure!(column.title() == "In Progress");
        }
    }
    eyre::ensure!(tracker.board.load_column_order().await? == order_before);
    Ok(())
}
