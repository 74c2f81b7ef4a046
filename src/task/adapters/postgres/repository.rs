//! `PostgreSQL` repository implementation for task and comment storage.

use super::{
    models::{CommentRow, TaskChangeset, TaskRow},
    schema::{comments, tasks},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::task::{
    domain::{
        Comment, CommentContent, CommentId, CommentOrder, PersistedCommentData, PersistedTaskData,
        Priority, Task, TaskId, TaskPatch, TaskState, TaskTitle,
    },
    ports::{PatchOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = TaskRow::from(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn apply_patch(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<PatchOutcome>> {
        let changeset = TaskChangeset::from_patch(patch, at);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let Some(current) = tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(tx)
                    .optional()?
                else {
                    return Ok(None);
                };
                let previous = row_to_task(current)?.snapshot();

                let updated = diesel::update(tasks::table.find(id.into_inner()))
                    .set(&changeset)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .optional()?;
                let Some(row) = updated else {
                    return Ok(None);
                };
                Ok(Some(PatchOutcome {
                    previous,
                    task: row_to_task(row)?,
                }))
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::delete(comments::table.filter(comments::task_id.eq(id.into_inner())))
                    .execute(tx)?;
                let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(tx)?;
                Ok(deleted > 0)
            })
        })
        .await
    }

    async fn release_assignee(
        &self,
        user_id: UserId,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        let backlog_state = backlog.as_str().to_owned();
        self.run_blocking(move |connection| {
            let released =
                diesel::update(tasks::table.filter(tasks::assignee_id.eq(user_id.into_inner())))
                    .set((
                        tasks::assignee_id.eq(None::<uuid::Uuid>),
                        tasks::state.eq(backlog_state),
                        tasks::updated_at.eq(at),
                    ))
                    .execute(connection)?;
            u64::try_from(released).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let task_id = comment.task_id();
        let comment_id = comment.id();
        let row = CommentRow::from(comment);

        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn comments_for(
        &self,
        task_id: TaskId,
        order: CommentOrder,
    ) -> TaskRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let query = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .select(CommentRow::as_select())
                .into_boxed();
            let ordered = match order {
                CommentOrder::NewestFirst => query.order(comments::created_at.desc()),
                CommentOrder::OldestFirst => query.order(comments::created_at.asc()),
            };
            let rows = ordered.load::<CommentRow>(connection)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title,
        description: row.description,
        state: TaskState::from_persisted(row.state),
        priority: Priority::new(row.priority),
        assignee: row.assignee_id.map(UserId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_comment(row: CommentRow) -> TaskRepositoryResult<Comment> {
    let content = CommentContent::new(row.content).map_err(TaskRepositoryError::persistence)?;

    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        content,
        author: UserId::from_uuid(row.author_id),
        created_at: row.created_at,
    }))
}
