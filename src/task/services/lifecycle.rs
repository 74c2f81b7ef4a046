//! Service layer for task creation, reads, patches, deletion and comments.

use super::{CreateTaskRequest, UpdateTaskRequest};
use crate::access::{AuthorizationError, Capability, Principal, authorize, authorize_patch};
use crate::config::WorkflowSettings;
use crate::error::{Classify, ErrorKind};
use crate::notification::{
    domain::NotificationMessage, ports::NotificationRepository, services::NotificationDispatcher,
};
use crate::task::{
    domain::{
        Comment, CommentContent, CommentOrder, CommentView, Task, TaskDomainError, TaskId,
        TaskView,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{UserId, UsernameIndex},
    ports::UserRepository,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The caller's role does not permit the operation.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The task existed when checked but the update touched no row.
    #[error("update of task {0} affected no rows")]
    NoRowsAffected(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl Classify for TaskLifecycleError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::NoRowsAffected(_) | Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Primary failures (validation, authorization, a missing task, storage of
/// the task itself) abort the operation. Secondary steps (username lookups
/// for the response, notification dispatch) are logged and skipped.
#[derive(Clone)]
pub struct TaskLifecycleService<T, U, N, C>
where
    T: TaskRepository,
    U: UserRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    dispatcher: NotificationDispatcher<N, C>,
    clock: Arc<C>,
    settings: WorkflowSettings,
}

impl<T, U, N, C> TaskLifecycleService<T, U, N, C>
where
    T: TaskRepository,
    U: UserRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with default workflow settings.
    #[must_use]
    pub fn new(tasks: Arc<T>, users: Arc<U>, notifications: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            dispatcher: NotificationDispatcher::new(notifications, Arc::clone(&clock)),
            clock,
            settings: WorkflowSettings::default(),
        }
    }

    /// Replaces the workflow settings.
    #[must_use]
    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Creates a task.
    ///
    /// A task created without an assignee (or with `""`/`"null"`) is placed
    /// in the backlog state regardless of the requested state. An assigned
    /// task notifies its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the caller lacks
    /// [`Capability::CreateTask`], the request is malformed, or the task
    /// cannot be stored.
    pub async fn create_task(
        &self,
        principal: &Principal,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<TaskView> {
        authorize(principal.role(), Capability::CreateTask)?;
        let backlog = self.settings.backlog_state();
        let draft = request.into_new_task(backlog)?;
        let task = Task::new(draft, backlog, &*self.clock);
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            state = %task.state(),
            actor = %principal.user_id(),
            "task created"
        );

        let assignee_name = match task.assignee() {
            Some(assignee) => {
                let name = self.username_of(assignee).await;
                self.dispatcher
                    .notify(
                        assignee,
                        NotificationMessage::NewTaskAssigned {
                            title: task.title().as_str().to_owned(),
                        },
                    )
                    .await;
                name
            }
            None => None,
        };

        Ok(TaskView::bare(task).with_assignee_name(assignee_name))
    }

    /// Loads a task with its comments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or a repository error when the task or its comments cannot be read.
    pub async fn get_task(
        &self,
        principal: &Principal,
        id: TaskId,
    ) -> TaskLifecycleResult<TaskView> {
        authorize(principal.role(), Capability::ReadTask)?;
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        let comments = self
            .tasks
            .comments_for(id, CommentOrder::NewestFirst)
            .await?;
        let names = self.username_index().await;
        tracing::debug!(task_id = %id, comments = comments.len(), "task loaded");

        let assignee_name = task.assignee().and_then(|assignee| names.name_of(assignee));
        let comment_views = comments
            .into_iter()
            .map(|comment| CommentView {
                author_name: names.name_of(comment.author()),
                comment,
            })
            .collect();
        Ok(TaskView::bare(task)
            .with_assignee_name(assignee_name)
            .with_comments(comment_views))
    }

    /// Applies a sparse update to a task.
    ///
    /// The guard inspects the request's key set before anything is validated
    /// or read. Notifications are decided against the pre-image the
    /// repository captured atomically with the write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Authorization`] when the key set is not
    /// permitted for the caller's role, [`TaskLifecycleError::Domain`] for a
    /// malformed field, [`TaskLifecycleError::NotFound`] when the task does
    /// not exist, and [`TaskLifecycleError::NoRowsAffected`] when the write
    /// touched nothing.
    pub async fn update_task(
        &self,
        principal: &Principal,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskView> {
        let fields = request.fields();
        authorize_patch(principal.role(), &fields)?;
        let patch = request.into_patch()?;

        if self.tasks.find_by_id(id).await?.is_none() {
            return Err(TaskLifecycleError::NotFound(id));
        }
        let outcome = self
            .tasks
            .apply_patch(id, &patch, self.clock.utc())
            .await?
            .ok_or(TaskLifecycleError::NoRowsAffected(id))?;
        tracing::info!(
            task_id = %id,
            fields = ?fields,
            actor = %principal.user_id(),
            "task updated"
        );

        for pending in patch.notifications(&outcome.previous) {
            self.dispatcher
                .notify(pending.recipient, pending.message)
                .await;
        }

        let assignee_name = match outcome.task.assignee() {
            Some(assignee) => self.username_of(assignee).await,
            None => None,
        };
        Ok(TaskView::bare(outcome.task).with_assignee_name(assignee_name))
    }

    /// Deletes a task and its comments.
    ///
    /// The task is read first only to address the "task deleted"
    /// notification; a failed read does not stop the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task was deleted, or a
    /// repository error when deletion fails.
    pub async fn delete_task(&self, principal: &Principal, id: TaskId) -> TaskLifecycleResult<()> {
        authorize(principal.role(), Capability::DeleteTask)?;
        let before = match self.tasks.find_by_id(id).await {
            Ok(found) => found.map(|task| task.snapshot()),
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "pre-delete read failed");
                None
            }
        };

        if !self.tasks.delete(id).await? {
            return Err(TaskLifecycleError::NotFound(id));
        }
        tracing::info!(task_id = %id, actor = %principal.user_id(), "task deleted");

        if let Some(snapshot) = before
            && let Some(assignee) = snapshot.assignee
        {
            self.dispatcher
                .notify(
                    assignee,
                    NotificationMessage::TaskDeleted {
                        title: snapshot.title.as_str().to_owned(),
                    },
                )
                .await;
        }
        Ok(())
    }

    /// Appends a comment authored by the caller.
    ///
    /// The task's current assignee is notified, even when they wrote the
    /// comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for blank content,
    /// [`TaskLifecycleError::NotFound`] when the task does not exist, or a
    /// repository error when the comment cannot be stored.
    pub async fn add_comment(
        &self,
        principal: &Principal,
        task_id: TaskId,
        body: impl Into<String>,
    ) -> TaskLifecycleResult<CommentView> {
        authorize(principal.role(), Capability::AddComment)?;
        let content = CommentContent::new(body)?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        let comment = Comment::new(task_id, principal.user_id(), content, &*self.clock);
        self.tasks.add_comment(&comment).await?;
        tracing::info!(
            task_id = %task_id,
            comment_id = %comment.id(),
            author = %principal.user_id(),
            "comment added"
        );

        let author_name = self.username_of(principal.user_id()).await;
        if let Some(assignee) = task.assignee() {
            self.dispatcher
                .notify(
                    assignee,
                    NotificationMessage::CommentAdded {
                        title: task.title().as_str().to_owned(),
                    },
                )
                .await;
        }
        Ok(CommentView {
            comment,
            author_name,
        })
    }

    async fn username_of(&self, id: UserId) -> Option<String> {
        match self.users.find_by_id(id).await {
            Ok(Some(user)) => Some(user.username().as_str().to_owned()),
            Ok(None) => {
                tracing::warn!(user_id = %id, "username lookup found no user");
                None
            }
            Err(err) => {
                tracing::warn!(user_id = %id, error = %err, "username lookup failed");
                None
            }
        }
    }

    async fn username_index(&self) -> UsernameIndex {
        match self.users.list().await {
            Ok(users) => UsernameIndex::from_users(&users),
            Err(err) => {
                tracing::warn!(error = %err, "user listing for name resolution failed");
                UsernameIndex::default()
            }
        }
    }
}
