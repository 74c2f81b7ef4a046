//! Best-effort notification dispatch.

use crate::notification::{
    domain::{Notification, NotificationMessage},
    ports::NotificationRepository,
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;

/// Records notifications on behalf of task mutations.
///
/// Dispatch is fire-and-forget relative to the caller: a storage failure is
/// logged and discarded, so the triggering operation still succeeds.
/// Delivery is at most once; nothing retries.
#[derive(Clone)]
pub struct NotificationDispatcher<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<N>,
    clock: Arc<C>,
}

impl<N, C> NotificationDispatcher<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher writing to `repository`.
    #[must_use]
    pub const fn new(repository: Arc<N>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records `message` for `recipient`.
    pub async fn notify(&self, recipient: UserId, message: NotificationMessage) {
        let notification = Notification::new(recipient, &message, &*self.clock);
        match self.repository.store(&notification).await {
            Ok(()) => tracing::debug!(
                notification_id = %notification.id(),
                recipient = %recipient,
                "notification recorded"
            ),
            Err(err) => tracing::warn!(
                recipient = %recipient,
                message = %message,
                error = %err,
                "failed to record notification"
            ),
        }
    }
}
