//! Repository port for columns and the persisted column order.

use crate::board::domain::{Column, ColumnId, ColumnUpdate};
use crate::task::domain::TaskState;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Column and board configuration persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Returns the raw persisted column order payload, if one exists.
    async fn load_column_order(&self) -> BoardRepositoryResult<Option<String>>;

    /// Returns every stored column, sorted by `order`.
    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>>;

    /// Applies every update and replaces the column order payload as one
    /// atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when an update names
    /// an unknown column. No update is retained on any error.
    async fn update_columns(
        &self,
        updates: &[ColumnUpdate],
        column_order: &str,
    ) -> BoardRepositoryResult<()>;

    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateColumn`] when the id is taken.
    async fn create_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Returns the highest stored `order`, or `0` without columns.
    async fn max_order(&self) -> BoardRepositoryResult<i32>;

    /// Deletes a column and moves every task whose state is the column id to
    /// `backlog` without an assignee, as one atomic unit.
    ///
    /// Returns the number of released tasks, or `None` when the column does
    /// not exist. Nothing changes in that case.
    async fn delete_column_releasing_tasks(
        &self,
        id: &ColumnId,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Option<u64>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// No column with this identifier exists.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// A column with this identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
