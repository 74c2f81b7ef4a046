//! Board aggregation and column management.

use crate::access::{AuthorizationError, Capability, Principal, authorize};
use crate::board::{
    domain::{
        Board, BoardDomainError, Column, ColumnId, ColumnUpdate, decode_column_order,
        encode_column_order,
    },
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::config::WorkflowSettings;
use crate::error::{Classify, ErrorKind};
use crate::task::{
    domain::{CommentOrder, CommentView, TaskId, TaskView},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{domain::UsernameIndex, ports::UserRepository};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Column validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The caller's role does not permit the operation.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The column does not exist.
    #[error("column not found: {0}")]
    NotFound(ColumnId),
    /// The column order could not be serialised.
    #[error("column order encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
    /// Board repository operation failed.
    #[error(transparent)]
    Board(#[from] BoardRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl Classify for BoardServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) | Self::Board(BoardRepositoryError::ColumnNotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Board(BoardRepositoryError::DuplicateColumn(_)) => ErrorKind::Validation,
            Self::Encoding(_) | Self::Board(_) | Self::Tasks(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Builds the board projection and manages its columns.
///
/// The projection favours completeness over consistency: a missing or
/// malformed column order falls back to the configured default, and a task
/// whose comments cannot be read is still shown without them.
#[derive(Clone)]
pub struct BoardService<B, T, U, C>
where
    B: BoardRepository,
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    board: Arc<B>,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    settings: WorkflowSettings,
}

impl<B, T, U, C> BoardService<B, T, U, C>
where
    B: BoardRepository,
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a board service with default workflow settings.
    #[must_use]
    pub fn new(board: Arc<B>, tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            board,
            tasks,
            users,
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

    /// Assembles the board.
    ///
    /// Tasks are read newest first, so each column bucket lists its tasks in
    /// reverse creation order. Comments are attached oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the caller cannot read the board or
    /// the columns or tasks cannot be loaded.
    pub async fn get_board(&self, principal: &Principal) -> BoardServiceResult<Board> {
        authorize(principal.role(), Capability::ReadBoard)?;
        let column_order = self.column_order().await;
        let columns = self.board.list_columns().await?;
        let tasks = self.tasks.list_newest_first().await?;
        let names = self.username_index().await;

        let mut board = Board::new(columns, column_order);
        let mut task_ids: Vec<TaskId> = Vec::with_capacity(tasks.len());
        for task in tasks {
            task_ids.push(task.id());
            let assignee_name = task.assignee().and_then(|assignee| names.name_of(assignee));
            board.place_task(TaskView::bare(task).with_assignee_name(assignee_name));
        }

        for task_id in task_ids {
            match self
                .tasks
                .comments_for(task_id, CommentOrder::OldestFirst)
                .await
            {
                Ok(comments) => {
                    let views = comments
                        .into_iter()
                        .map(|comment| CommentView {
                            author_name: names.name_of(comment.author()),
                            comment,
                        })
                        .collect();
                    board.attach_comments(task_id, views);
                }
                Err(err) => {
                    tracing::warn!(task_id = %task_id, error = %err, "skipping task comments");
                }
            }
        }

        tracing::debug!(
            tasks = board.tasks().len(),
            columns = board.columns().len(),
            unplaced = board.unplaced_task_ids().len(),
            "board assembled"
        );
        Ok(board)
    }

    /// Lists the stored columns by `order`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the caller cannot read the board or
    /// the columns cannot be loaded.
    pub async fn list_columns(&self, principal: &Principal) -> BoardServiceResult<Vec<Column>> {
        authorize(principal.role(), Capability::ReadBoard)?;
        Ok(self.board.list_columns().await?)
    }

    /// Renames and reorders columns, replacing the column order with the ids
    /// in the given sequence. The whole batch commits or nothing does.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Authorization`] for non-admins,
    /// [`BoardServiceError::Board`] with
    /// [`BoardRepositoryError::ColumnNotFound`] for an unknown column, or a
    /// storage error.
    pub async fn update_columns(
        &self,
        principal: &Principal,
        updates: &[ColumnUpdate],
    ) -> BoardServiceResult<()> {
        authorize(principal.role(), Capability::ManageUsers)?;
        let ids: Vec<ColumnId> = updates.iter().map(|update| update.id.clone()).collect();
        let payload = encode_column_order(&ids)?;
        self.board.update_columns(updates, &payload).await?;
        tracing::info!(
            columns = updates.len(),
            actor = %principal.user_id(),
            "board columns updated"
        );
        Ok(())
    }

    /// Appends a column after the current highest `order`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] for non-admins, a blank title, or a
    /// storage failure.
    pub async fn add_column(
        &self,
        principal: &Principal,
        title: impl Into<String>,
    ) -> BoardServiceResult<Column> {
        authorize(principal.role(), Capability::ManageUsers)?;
        let order = self.board.max_order().await?.saturating_add(1);
        let column = Column::new(ColumnId::generated(order), title, order)?;
        self.board.create_column(&column).await?;
        tracing::info!(column_id = %column.id(), order, actor = %principal.user_id(), "column added");
        Ok(column)
    }

    /// Deletes the column and moves its tasks to the backlog unassigned, as
    /// one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when the column does not exist,
    /// leaving every task untouched, or a storage error.
    pub async fn delete_column(
        &self,
        principal: &Principal,
        id: &ColumnId,
    ) -> BoardServiceResult<()> {
        authorize(principal.role(), Capability::ManageUsers)?;
        let released = self
            .board
            .delete_column_releasing_tasks(id, self.settings.backlog_state(), self.clock.utc())
            .await?
            .ok_or_else(|| BoardServiceError::NotFound(id.clone()))?;
        tracing::info!(column_id = %id, released, actor = %principal.user_id(), "column deleted");
        Ok(())
    }

    async fn column_order(&self) -> Vec<ColumnId> {
        let fallback = || self.settings.default_column_order().to_vec();
        match self.board.load_column_order().await {
            Ok(Some(payload)) => decode_column_order(&payload).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "stored column order is malformed, using default");
                fallback()
            }),
            Ok(None) => {
                tracing::warn!("no stored column order, using default");
                fallback()
            }
            Err(err) => {
                tracing::warn!(error = %err, "column order read failed, using default");
                fallback()
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
