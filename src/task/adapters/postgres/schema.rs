//! Diesel schema for task and comment persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Free-form state, conventionally a column id.
        #[max_length = 255]
        state -> Varchar,
        /// Integer priority.
        priority -> Int4,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task comments.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Comment author.
        author_id -> Uuid,
        /// Comment body.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(comments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(comments, tasks);
