//! Then steps for notification flow BDD scenarios.

use super::world::NotificationWorld;
use rstest_bdd_macros::then;
use taskflow::notification::services::NotificationInboxError;

#[then("the member has {count:usize} unread notifications")]
fn member_has_unread(world: &NotificationWorld, count: usize) -> Result<(), eyre::Report> {
    let unread = world
        .member_inbox()?
        .iter()
        .filter(|notification| !notification.is_read())
        .count();
    if unread != count {
        return Err(eyre::eyre!("expected {count} unread notifications, found {unread}"));
    }
    Ok(())
}

#[then(r#"the newest notification mentions "{text}""#)]
fn newest_mentions(world: &NotificationWorld, text: String) -> Result<(), eyre::Report> {
    let inbox = world.member_inbox()?;
    let newest = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("member inbox is empty"))?;
    if !newest.message().contains(text.as_str()) {
        return Err(eyre::eyre!(
            "expected '{}' to mention '{text}'",
            newest.message()
        ));
    }
    Ok(())
}

#[then("the newest notification is read")]
fn newest_is_read(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_mark_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing mark-read result"))?;
    match result {
        Ok(notification) if notification.is_read() => Ok(()),
        other => Err(eyre::eyre!("expected a read notification, got {other:?}")),
    }
}

#[then("marking fails with not found")]
fn marking_fails_not_found(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_mark_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing mark-read result"))?;
    if !matches!(result, Err(NotificationInboxError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound, got {result:?}"));
    }
    Ok(())
}
