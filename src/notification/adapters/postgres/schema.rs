//! Diesel schema for notification persistence.

diesel::table! {
    /// Per-recipient notifications.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient user identifier.
        user_id -> Uuid,
        /// Rendered message.
        message -> Text,
        /// Read flag.
        read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
