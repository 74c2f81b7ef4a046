//! Notification message templates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event a notification reports to its recipient.
///
/// The rendered text is what gets stored; the variant only exists until
/// dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationMessage {
    /// A task was created already assigned to the recipient.
    NewTaskAssigned {
        /// Task title.
        title: String,
    },
    /// An existing task was reassigned to the recipient.
    TaskAssigned {
        /// Task title.
        title: String,
    },
    /// The recipient's task moved to another state.
    StatusChanged {
        /// New state.
        state: String,
    },
    /// A priority value was submitted for the recipient's task.
    PriorityChanged {
        /// Task title.
        title: String,
        /// Submitted priority.
        priority: i32,
    },
    /// The recipient's task was deleted.
    TaskDeleted {
        /// Task title.
        title: String,
    },
    /// Someone commented on the recipient's task.
    CommentAdded {
        /// Task title.
        title: String,
    },
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewTaskAssigned { title } => {
                write!(f, "You have been assigned a new task: {title}")
            }
            Self::TaskAssigned { title } => write!(f, "You have been assigned the task: {title}"),
            Self::StatusChanged { state } => write!(f, "Your task status changed to: {state}"),
            Self::PriorityChanged { title, priority } => {
                write!(f, "Priority of task '{title}' changed to {priority}")
            }
            Self::TaskDeleted { title } => write!(f, "Task '{title}' was deleted"),
            Self::CommentAdded { title } => write!(f, "A comment was added to task '{title}'"),
        }
    }
}
