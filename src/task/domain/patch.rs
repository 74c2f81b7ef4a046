//! Sparse task patches and the notifications they trigger.

use super::{Priority, TaskSnapshot, TaskState, TaskTitle};
use crate::notification::domain::NotificationMessage;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognised patch keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchField {
    /// `state`
    State,
    /// `title`
    Title,
    /// `description`
    Description,
    /// `priority`
    Priority,
    /// `assignee`
    Assignee,
}

impl PatchField {
    /// Returns the wire name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
        }
    }
}

impl fmt::Display for PatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated sparse update to a task.
///
/// Each field is independently absent (`None`) or present. For `assignee`,
/// `Some(None)` unassigns and `Some(Some(id))` assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New state.
    pub state: Option<TaskState>,
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New assignee, or an explicit unassignment.
    pub assignee: Option<Option<UserId>>,
}

/// Notification owed to a user as a result of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    /// Recipient.
    pub recipient: UserId,
    /// Message to record.
    pub message: NotificationMessage,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state.
    #[must_use]
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Returns the keys present in the patch, in a fixed order.
    #[must_use]
    pub fn fields(&self) -> Vec<PatchField> {
        [
            (self.state.is_some(), PatchField::State),
            (self.title.is_some(), PatchField::Title),
            (self.description.is_some(), PatchField::Description),
            (self.priority.is_some(), PatchField::Priority),
            (self.assignee.is_some(), PatchField::Assignee),
        ]
        .into_iter()
        .filter_map(|(present, field)| present.then_some(field))
        .collect()
    }

    /// Returns `true` when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.state.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
    }

    /// Decides which notifications applying this patch owes, given the task
    /// as it was immediately before the write.
    ///
    /// Rules are evaluated independently, in this order:
    ///
    /// - state differs from `before.state` and `before` had an assignee:
    ///   the previous assignee hears about the new state;
    /// - priority is present and `before` had an assignee: the previous
    ///   assignee hears about it, even when the value is unchanged;
    /// - a new, different assignee is set: the new assignee hears about it.
    #[must_use]
    pub fn notifications(&self, before: &TaskSnapshot) -> Vec<PendingNotification> {
        let mut pending = Vec::new();

        if let (Some(state), Some(recipient)) = (&self.state, before.assignee)
            && *state != before.state
        {
            pending.push(PendingNotification {
                recipient,
                message: NotificationMessage::StatusChanged {
                    state: state.as_str().to_owned(),
                },
            });
        }

        if let (Some(priority), Some(recipient)) = (self.priority, before.assignee) {
            pending.push(PendingNotification {
                recipient,
                message: NotificationMessage::PriorityChanged {
                    title: before.title.as_str().to_owned(),
                    priority: priority.value(),
                },
            });
        }

        if let Some(Some(assignee)) = self.assignee
            && before.assignee != Some(assignee)
        {
            pending.push(PendingNotification {
                recipient: assignee,
                message: NotificationMessage::TaskAssigned {
                    title: before.title.as_str().to_owned(),
                },
            });
        }

        pending
    }
}
