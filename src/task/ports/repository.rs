//! Repository port for task and comment persistence.

use crate::task::domain::{
    Comment, CommentId, CommentOrder, Task, TaskId, TaskPatch, TaskSnapshot, TaskState,
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result of applying a patch: the task before and after the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Snapshot taken inside the same atomic write as the update.
    pub previous: TaskSnapshot,
    /// Task after the update.
    pub task: Task,
}

/// Task and comment persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task, most recently created first.
    async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies `patch` to the stored task and advances its `updated_at` to
    /// `at`.
    ///
    /// The returned pre-image is captured atomically with the write, so
    /// concurrent patches never observe a stale baseline. Returns `None` when
    /// no row was affected.
    async fn apply_patch(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<PatchOutcome>>;

    /// Deletes a task together with its comments.
    ///
    /// Returns `false` when the task did not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Moves every task assigned to `user_id` to `backlog` and clears the
    /// assignee. Returns the number of tasks changed.
    async fn release_assignee(
        &self,
        user_id: UserId,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64>;

    /// Appends a comment to its task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owning task does not
    /// exist or [`TaskRepositoryError::DuplicateComment`] when the comment ID
    /// is taken.
    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()>;

    /// Returns the comments of a task in the requested order.
    async fn comments_for(
        &self,
        task_id: TaskId,
        order: CommentOrder,
    ) -> TaskRepositoryResult<Vec<Comment>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
