//! Repository port for notification storage and inbox queries.

use crate::notification::domain::{Notification, NotificationId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a new notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::DuplicateNotification`] when the
    /// identifier already exists.
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Returns the recipient's notifications, newest first.
    async fn list_for_user(&self, user_id: UserId)
    -> NotificationRepositoryResult<Vec<Notification>>;

    /// Sets the read flag on a notification owned by `user_id`.
    ///
    /// Returns `None` when no notification matches both the identifier and
    /// the owner.
    async fn mark_read(
        &self,
        user_id: UserId,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A notification with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
