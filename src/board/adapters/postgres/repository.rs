//! `PostgreSQL` repository implementation for board configuration.

use super::{
    models::ColumnRow,
    schema::{board_columns, board_config},
};
use crate::board::{
    domain::{Column, ColumnId, ColumnUpdate},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::task::{adapters::postgres::schema::tasks, domain::TaskState};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{max, now};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const BOARD_CONFIG_ID: i32 = 1;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, BoardRepositoryError::persistence)?;
                f(&mut connection)
            },
            BoardRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn load_column_order(&self) -> BoardRepositoryResult<Option<String>> {
        self.run_blocking(move |connection| {
            let payload = board_config::table
                .find(BOARD_CONFIG_ID)
                .select(board_config::column_order)
                .first::<String>(connection)
                .optional()?;
            Ok(payload)
        })
        .await
    }

    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = board_columns::table
                .order(board_columns::column_order.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }

    async fn update_columns(
        &self,
        updates: &[ColumnUpdate],
        column_order: &str,
    ) -> BoardRepositoryResult<()> {
        let staged = updates.to_vec();
        let payload = column_order.to_owned();

        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                for update in &staged {
                    let touched =
                        diesel::update(board_columns::table.find(update.id.as_str()))
                            .set((
                                board_columns::title.eq(&update.title),
                                board_columns::column_order.eq(update.order),
                            ))
                            .execute(tx)?;
                    if touched == 0 {
                        return Err(BoardRepositoryError::ColumnNotFound(update.id.clone()));
                    }
                }

                diesel::insert_into(board_config::table)
                    .values((
                        board_config::id.eq(BOARD_CONFIG_ID),
                        board_config::column_order.eq(&payload),
                        board_config::updated_at.eq(now),
                    ))
                    .on_conflict(board_config::id)
                    .do_update()
                    .set((
                        board_config::column_order.eq(&payload),
                        board_config::updated_at.eq(now),
                    ))
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn create_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id().clone();
        let row = ColumnRow::from(column);

        self.run_blocking(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateColumn(column_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn max_order(&self) -> BoardRepositoryResult<i32> {
        self.run_blocking(move |connection| {
            let highest = board_columns::table
                .select(max(board_columns::column_order))
                .first::<Option<i32>>(connection)?;
            Ok(highest.unwrap_or(0))
        })
        .await
    }

    async fn delete_column_releasing_tasks(
        &self,
        id: &ColumnId,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Option<u64>> {
        let column_id = id.as_str().to_owned();
        let backlog_state = backlog.as_str().to_owned();

        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let deleted =
                    diesel::delete(board_columns::table.find(&column_id)).execute(tx)?;
                if deleted == 0 {
                    return Ok(None);
                }
                let touched = diesel::update(tasks::table.filter(tasks::state.eq(&column_id)))
                    .set((
                        tasks::assignee_id.eq(None::<uuid::Uuid>),
                        tasks::state.eq(&backlog_state),
                        tasks::updated_at.eq(at),
                    ))
                    .execute(tx)?;
                let released = u64::try_from(touched).map_err(BoardRepositoryError::persistence)?;
                Ok(Some(released))
            })
        })
        .await
    }
}

fn row_to_column(row: ColumnRow) -> BoardRepositoryResult<Column> {
    let id = ColumnId::new(row.id).map_err(BoardRepositoryError::persistence)?;
    Column::new(id, row.title, row.column_order).map_err(BoardRepositoryError::persistence)
}
