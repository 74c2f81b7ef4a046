//! Raw request payloads accepted by the task lifecycle service.

use crate::task::domain::{
    NewTask, PatchField, Priority, TaskDomainError, TaskPatch, TaskState, TaskTitle,
};
use crate::user::domain::UserId;

/// Sentinel some clients send instead of an empty assignee.
const NULL_ASSIGNEE: &str = "null";

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    state: Option<String>,
    priority: Option<f64>,
    assignee: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            state: None,
            priority: None,
            assignee: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested state, honoured only for assigned tasks.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the raw assignee: a user id, `""` or `"null"`.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Validates the request into domain input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when a field is malformed.
    pub fn into_new_task(self, backlog: &TaskState) -> Result<NewTask, TaskDomainError> {
        let assignee = self.assignee.as_deref().map(parse_assignee).transpose()?;
        let state = self
            .state
            .map(TaskState::new)
            .transpose()?
            .unwrap_or_else(|| backlog.clone());
        let priority = self
            .priority
            .map(Priority::from_number)
            .transpose()?
            .unwrap_or_default();

        Ok(NewTask {
            title: TaskTitle::new(self.title)?,
            description: self.description.unwrap_or_default(),
            state,
            priority,
            assignee: assignee.flatten(),
        })
    }
}

/// Request payload for a sparse task update.
///
/// Every field is optional; only present fields count towards the key set
/// the permission guard inspects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskRequest {
    state: Option<String>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<f64>,
    assignee: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority; fractional values are truncated.
    #[must_use]
    pub const fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the raw assignee; `""` or `"null"` unassigns.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Returns the keys present in the request.
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

    /// Validates the request into a typed patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when a present field is malformed.
    pub fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        Ok(TaskPatch {
            state: self.state.map(TaskState::new).transpose()?,
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            priority: self.priority.map(Priority::from_number).transpose()?,
            assignee: self.assignee.as_deref().map(parse_assignee).transpose()?,
        })
    }
}

fn parse_assignee(raw: &str) -> Result<Option<UserId>, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NULL_ASSIGNEE {
        return Ok(None);
    }
    UserId::parse(trimmed)
        .map(Some)
        .map_err(|_| TaskDomainError::InvalidAssignee(raw.to_owned()))
}
