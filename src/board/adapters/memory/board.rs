//! In-memory repository for board tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Column, ColumnId, ColumnUpdate, encode_column_order},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::config::DEFAULT_COLUMN_ORDER;
use crate::task::{adapters::memory::InMemoryTaskRepository, domain::TaskState};

const DEFAULT_COLUMN_TITLES: [&str; 4] = ["Backlog", "In Progress", "Approve", "Done"];

/// Thread-safe in-memory board repository.
///
/// Column updates are staged on a copy of the state and committed by
/// replacing it, so a failure part-way through a batch leaves nothing
/// behind. Column deletion releases tasks in the task store attached with
/// [`InMemoryBoardRepository::sharing_tasks`]; without one it releases
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
    tasks: InMemoryTaskRepository,
}

#[derive(Debug, Clone, Default)]
struct InMemoryBoardState {
    columns: Vec<Column>,
    column_order: Option<String>,
    fail_order_writes: bool,
}

impl InMemoryBoardRepository {
    /// Creates an empty repository with no columns and no stored order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the four default columns and their
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError`] when the seed cannot be built.
    pub fn with_default_columns() -> BoardRepositoryResult<Self> {
        let mut columns = Vec::with_capacity(DEFAULT_COLUMN_ORDER.len());
        for (position, (id, title)) in DEFAULT_COLUMN_ORDER
            .into_iter()
            .zip(DEFAULT_COLUMN_TITLES)
            .enumerate()
        {
            let order = i32::try_from(position + 1).map_err(BoardRepositoryError::persistence)?;
            let column = Column::new(ColumnId::from_static(id), title, order)
                .map_err(BoardRepositoryError::persistence)?;
            columns.push(column);
        }
        let ids: Vec<ColumnId> = columns.iter().map(|column| column.id().clone()).collect();
        let payload = encode_column_order(&ids).map_err(BoardRepositoryError::persistence)?;

        Ok(Self {
            state: Arc::new(RwLock::new(InMemoryBoardState {
                columns,
                column_order: Some(payload),
                fail_order_writes: false,
            })),
            tasks: InMemoryTaskRepository::default(),
        })
    }

    /// Attaches the task store whose tasks are released when a column is
    /// deleted.
    #[must_use]
    pub fn sharing_tasks(mut self, tasks: &InMemoryTaskRepository) -> Self {
        self.tasks = tasks.clone();
        self
    }

    /// Overwrites the raw stored column order payload.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn set_column_order_payload(&self, payload: Option<String>) -> BoardRepositoryResult<()> {
        self.write()?.column_order = payload;
        Ok(())
    }

    /// Makes every later column order write fail, after column writes in the
    /// same batch have been staged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn fail_order_writes(&self, fail: bool) -> BoardRepositoryResult<()> {
        self.write()?.fail_order_writes = fail;
        Ok(())
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| lock_error(&err))
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| lock_error(&err))
    }
}

fn lock_error(err: &impl std::fmt::Display) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn load_column_order(&self) -> BoardRepositoryResult<Option<String>> {
        Ok(self.read()?.column_order.clone())
    }

    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        let mut columns = self.read()?.columns.clone();
        columns.sort_by_key(Column::order);
        Ok(columns)
    }

    async fn update_columns(
        &self,
        updates: &[ColumnUpdate],
        column_order: &str,
    ) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let mut staged = state.clone();

        for update in updates {
            let column = staged
                .columns
                .iter_mut()
                .find(|column| column.id() == &update.id)
                .ok_or_else(|| BoardRepositoryError::ColumnNotFound(update.id.clone()))?;
            column.apply(update);
        }
        if staged.fail_order_writes {
            return Err(BoardRepositoryError::persistence(std::io::Error::other(
                "column order write rejected",
            )));
        }
        staged.column_order = Some(column_order.to_owned());

        *state = staged;
        Ok(())
    }

    async fn create_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.columns.iter().any(|existing| existing.id() == column.id()) {
            return Err(BoardRepositoryError::DuplicateColumn(column.id().clone()));
        }
        state.columns.push(column.clone());
        Ok(())
    }

    async fn max_order(&self) -> BoardRepositoryResult<i32> {
        Ok(self
            .read()?
            .columns
            .iter()
            .map(Column::order)
            .max()
            .unwrap_or(0))
    }

    async fn delete_column_releasing_tasks(
        &self,
        id: &ColumnId,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Option<u64>> {
        let mut state = self.write()?;
        let Some(position) = state.columns.iter().position(|column| column.id() == id) else {
            return Ok(None);
        };
        let column_state = TaskState::from_persisted(id.as_str().to_owned());
        let released = self
            .tasks
            .release_state(&column_state, backlog, at)
            .map_err(BoardRepositoryError::persistence)?;
        state.columns.remove(position);
        Ok(Some(released))
    }
}
