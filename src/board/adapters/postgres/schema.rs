//! Diesel schema for board configuration.

diesel::table! {
    /// Board column definitions.
    board_columns (id) {
        /// Column identifier referenced by task states.
        #[max_length = 255]
        id -> Varchar,
        /// Display title.
        title -> Text,
        /// Sort position.
        column_order -> Int4,
    }
}

diesel::table! {
    /// Single-row board configuration.
    board_config (id) {
        /// Always `1`.
        id -> Int4,
        /// JSON list of column ids in rendering order.
        column_order -> Text,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
