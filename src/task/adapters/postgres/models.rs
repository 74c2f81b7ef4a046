//! Diesel row models for task and comment persistence.

use super::schema::{comments, tasks};
use crate::task::domain::{Comment, Task, TaskPatch};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by task inserts and queries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// State.
    pub state: String,
    /// Priority.
    pub priority: i32,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            state: task.state().as_str().to_owned(),
            priority: task.priority().value(),
            assignee_id: task.assignee().map(|user| user.into_inner()),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Sparse update for task records.
///
/// `None` leaves a column untouched; `assignee_id: Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New state.
    pub state: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<i32>,
    /// New assignee or explicit unassignment.
    pub assignee_id: Option<Option<uuid::Uuid>>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskChangeset {
    /// Builds the changeset for `patch` stamped with `at`.
    #[must_use]
    pub fn from_patch(patch: &TaskPatch, at: DateTime<Utc>) -> Self {
        Self {
            state: patch.state.as_ref().map(|state| state.as_str().to_owned()),
            title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
            description: patch.description.clone(),
            priority: patch.priority.map(|priority| priority.value()),
            assignee_id: patch
                .assignee
                .map(|assignee| assignee.map(|user| user.into_inner())),
            updated_at: at,
        }
    }
}

/// Row shape shared by comment inserts and queries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Author.
    pub author_id: uuid::Uuid,
    /// Body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().into_inner(),
            task_id: comment.task_id().into_inner(),
            author_id: comment.author().into_inner(),
            content: comment.content().as_str().to_owned(),
            created_at: comment.created_at(),
        }
    }
}
