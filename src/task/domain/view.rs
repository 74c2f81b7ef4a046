//! Read models returned to callers, enriched with usernames.

use super::{Comment, Task};
use serde::Serialize;

/// Task enriched with its assignee's username and its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// The task itself.
    pub task: Task,
    /// Assignee username, when assigned and resolvable.
    pub assignee_name: Option<String>,
    /// Comments in the order the producing read asked for.
    pub comments: Vec<CommentView>,
}

impl TaskView {
    /// Wraps a task with no enrichment.
    #[must_use]
    pub const fn bare(task: Task) -> Self {
        Self {
            task,
            assignee_name: None,
            comments: Vec::new(),
        }
    }

    /// Sets the assignee username.
    #[must_use]
    pub fn with_assignee_name(mut self, name: Option<String>) -> Self {
        self.assignee_name = name;
        self
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: Vec<CommentView>) -> Self {
        self.comments = comments;
        self
    }
}

/// Comment enriched with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// The comment itself.
    pub comment: Comment,
    /// Author username, when resolvable.
    pub author_name: Option<String>,
}
