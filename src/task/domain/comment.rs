//! Append-only task comments.

use super::{CommentId, TaskDomainError, TaskId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentContent(String);

impl CommentContent {
    /// Creates validated comment content.
    ///
    /// Surrounding whitespace is kept; only all-blank content is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentContent`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyCommentContent);
        }
        Ok(Self(raw))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordering for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOrder {
    /// Most recent first, used by task detail reads.
    NewestFirst,
    /// Oldest first, used by the board projection.
    OldestFirst,
}

/// Comment owned by exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    content: CommentContent,
    author: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted identifier.
    pub id: CommentId,
    /// Owning task.
    pub task_id: TaskId,
    /// Persisted content.
    pub content: CommentContent,
    /// Author identifier.
    pub author: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment on `task_id`.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        author: UserId,
        content: CommentContent,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task_id,
            content,
            author,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            content: data.content,
            author: data.author,
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the content.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
