//! Application services for notification dispatch and inbox access.

mod dispatcher;
mod inbox;

pub use dispatcher::NotificationDispatcher;
pub use inbox::{NotificationInbox, NotificationInboxError, NotificationInboxResult};
