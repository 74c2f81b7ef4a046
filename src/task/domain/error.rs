//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task state is blank.
    #[error("task state must not be empty")]
    EmptyState,

    /// The comment content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyCommentContent,

    /// The priority is not a finite number within the integer range.
    #[error("invalid priority {0}, expected a finite number")]
    InvalidPriority(String),

    /// The assignee is neither empty nor a user identifier.
    #[error("invalid assignee '{0}', expected a user id or an empty value")]
    InvalidAssignee(String),
}
