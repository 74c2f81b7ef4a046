//! Principal-scoped notification reads and the read flag.

use crate::access::Principal;
use crate::error::{Classify, ErrorKind};
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for inbox operations.
#[derive(Debug, Error)]
pub enum NotificationInboxError {
    /// No notification with this identifier belongs to the caller.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

impl Classify for NotificationInboxError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for inbox operations.
pub type NotificationInboxResult<T> = Result<T, NotificationInboxError>;

/// Inbox over the caller's own notifications.
#[derive(Clone)]
pub struct NotificationInbox<N>
where
    N: NotificationRepository,
{
    repository: Arc<N>,
}

impl<N> NotificationInbox<N>
where
    N: NotificationRepository,
{
    /// Creates an inbox service.
    #[must_use]
    pub const fn new(repository: Arc<N>) -> Self {
        Self { repository }
    }

    /// Lists the caller's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationInboxError::Repository`] when the lookup fails.
    pub async fn list(&self, principal: &Principal) -> NotificationInboxResult<Vec<Notification>> {
        let notifications = self.repository.list_for_user(principal.user_id()).await?;
        tracing::debug!(
            user_id = %principal.user_id(),
            count = notifications.len(),
            "listed notifications"
        );
        Ok(notifications)
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationInboxError::NotFound`] when the notification does
    /// not exist or belongs to another user.
    pub async fn mark_read(
        &self,
        principal: &Principal,
        id: NotificationId,
    ) -> NotificationInboxResult<Notification> {
        let notification = self
            .repository
            .mark_read(principal.user_id(), id)
            .await?
            .ok_or(NotificationInboxError::NotFound(id))?;
        tracing::info!(notification_id = %id, user_id = %principal.user_id(), "notification read");
        Ok(notification)
    }
}
