//! Diesel row models for notification persistence.

use super::schema::notifications;
use crate::notification::domain::{Notification, NotificationId, PersistedNotificationData};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by inserts and queries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Recipient user identifier.
    pub user_id: uuid::Uuid,
    /// Rendered message.
    pub message: String,
    /// Read flag.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id().into_inner(),
            user_id: notification.user_id().into_inner(),
            message: notification.message().to_owned(),
            read: notification.is_read(),
            created_at: notification.created_at(),
        }
    }
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self::from_persisted(PersistedNotificationData {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        })
    }
}
