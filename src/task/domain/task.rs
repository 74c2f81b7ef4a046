//! Task aggregate root and its validated scalar values.

use super::{TaskDomainError, TaskId, TaskPatch};
use crate::config::DEFAULT_BACKLOG_STATE;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form task state, conventionally a column identifier.
///
/// States are not checked against the configured columns; a task whose state
/// matches no column is still a valid task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskState(String);

impl TaskState {
    /// Creates a task state from caller input, kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyState`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyState);
        }
        Ok(Self(raw))
    }

    /// Wraps a stored state without validation.
    ///
    /// Rows written before blank input was rejected still load.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the built-in backlog state.
    #[must_use]
    pub fn backlog() -> Self {
        Self(DEFAULT_BACKLOG_STATE.to_owned())
    }

    /// Returns the state as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskState {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    /// Creates a priority from an integer value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Creates a priority from a numeric value, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPriority`] when the value is not
    /// finite or its integer part does not fit in an `i32`.
    pub fn from_number(value: f64) -> Result<Self, TaskDomainError> {
        let truncated = value.trunc();
        if !truncated.is_finite()
            || truncated < f64::from(i32::MIN)
            || truncated > f64::from(i32::MAX)
        {
            return Err(TaskDomainError::InvalidPriority(value.to_string()));
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "range checked against i32 bounds above"
        )]
        let whole = truncated as i32;
        Ok(Self(whole))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Free-text description, possibly empty.
    pub description: String,
    /// Requested state; ignored for unassigned tasks.
    pub state: TaskState,
    /// Initial priority.
    pub priority: Priority,
    /// Initial assignee.
    pub assignee: Option<UserId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    state: TaskState,
    priority: Priority,
    assignee: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted state.
    pub state: TaskState,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields of a task that drive notification decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Title at snapshot time.
    pub title: TaskTitle,
    /// State at snapshot time.
    pub state: TaskState,
    /// Assignee at snapshot time.
    pub assignee: Option<UserId>,
}

impl Task {
    /// Creates a new task.
    ///
    /// A task without an assignee always starts in `backlog`, whatever state
    /// the caller asked for.
    #[must_use]
    pub fn new(draft: NewTask, backlog: &TaskState, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let state = if draft.assignee.is_some() {
            draft.state
        } else {
            backlog.clone()
        };

        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            state,
            priority: draft.priority,
            assignee: draft.assignee,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            state: data.state,
            priority: data.priority,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the state.
    #[must_use]
    pub const fn state(&self) -> &TaskState {
        &self.state
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Captures the fields notification decisions compare against.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            title: self.title.clone(),
            state: self.state.clone(),
            assignee: self.assignee,
        }
    }

    /// Applies every present field of `patch` and advances `updated_at`.
    pub fn apply_patch(&mut self, patch: &TaskPatch, at: DateTime<Utc>) {
        if let Some(state) = &patch.state {
            self.state = state.clone();
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        self.updated_at = at;
    }

    /// Clears the assignee and moves the task to `backlog`.
    pub fn release_to(&mut self, backlog: &TaskState, at: DateTime<Utc>) {
        self.assignee = None;
        self.state = backlog.clone();
        self.updated_at = at;
    }
}
