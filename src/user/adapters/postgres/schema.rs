//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        username -> Varchar,
        /// Unique, lowercased login email.
        #[max_length = 255]
        email -> Varchar,
        /// Role name (`admin` or `member`).
        #[max_length = 20]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
