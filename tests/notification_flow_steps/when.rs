//! When steps for notification flow BDD scenarios.

use super::world::{NotificationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskflow::task::services::UpdateTaskRequest;

#[when(r#"the administrator creates a task "{title}" assigned to the member"#)]
fn create_assigned_task(world: &mut NotificationWorld, title: String) -> Result<(), eyre::Report> {
    world.create_assigned_task(title)
}

#[when("the member marks the newest notification read")]
fn member_marks_read(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    let member = world.member_principal()?;
    let newest = newest_notification_id(world)?;
    world.last_mark_result = Some(run_async(world.inbox.mark_read(&member, newest)));
    Ok(())
}

#[when("the administrator tries to mark the member's newest notification read")]
fn admin_marks_read(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    let newest = newest_notification_id(world)?;
    world.last_mark_result = Some(run_async(world.inbox.mark_read(&admin, newest)));
    Ok(())
}

#[when(r#"the member moves the task to "{state}""#)]
fn member_moves_task(world: &mut NotificationWorld, state: String) -> Result<(), eyre::Report> {
    let member = world.member_principal()?;
    let task_id = world
        .task
        .as_ref()
        .map(|view| view.task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let moved = run_async(world.lifecycle.update_task(
        &member,
        task_id,
        UpdateTaskRequest::new().with_state(state),
    ))
    .wrap_err("move the task as the member")?;
    world.task = Some(moved);
    Ok(())
}

fn newest_notification_id(
    world: &NotificationWorld,
) -> Result<taskflow::notification::domain::NotificationId, eyre::Report> {
    world
        .member_inbox()?
        .first()
        .map(taskflow::notification::domain::Notification::id)
        .ok_or_else(|| eyre::eyre!("member inbox is empty"))
}
