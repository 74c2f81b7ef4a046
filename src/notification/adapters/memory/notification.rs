//! In-memory repository for notification tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory notification repository.
///
/// Notifications are kept in insertion order so that equal timestamps still
/// list deterministically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        if notifications
            .iter()
            .any(|existing| existing.id() == notification.id())
        {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        notifications.push(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(lock_error)?;
        let mut owned: Vec<Notification> = notifications
            .iter()
            .filter(|notification| notification.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(Notification::created_at);
        owned.reverse();
        Ok(owned)
    }

    async fn mark_read(
        &self,
        user_id: UserId,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        Ok(notifications
            .iter_mut()
            .find(|notification| notification.id() == id && notification.user_id() == user_id)
            .map(|notification| {
                notification.mark_read();
                notification.clone()
            }))
    }
}
