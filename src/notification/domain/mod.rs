//! Domain model for notifications.

mod message;
mod notification;

pub use message::NotificationMessage;
pub use notification::{Notification, NotificationId, PersistedNotificationData};
