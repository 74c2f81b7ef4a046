//! `PostgreSQL` repository implementation for notification storage.

use super::{models::NotificationRow, schema::notifications};
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection =
                    get_conn_with(&pool, NotificationRepositoryError::persistence)?;
                f(&mut connection)
            },
            NotificationRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let notification_id = notification.id();
        let row = NotificationRow::from(notification);

        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::DuplicateNotification(notification_id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        self.run_blocking(move |connection| {
            let rows = notifications::table
                .filter(notifications::user_id.eq(user_id.into_inner()))
                .order(notifications::created_at.desc())
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(rows.into_iter().map(Notification::from).collect())
        })
        .await
    }

    async fn mark_read(
        &self,
        user_id: UserId,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        self.run_blocking(move |connection| {
            let row = diesel::update(
                notifications::table
                    .filter(notifications::id.eq(id.into_inner()))
                    .filter(notifications::user_id.eq(user_id.into_inner())),
            )
            .set(notifications::read.eq(true))
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(connection)
            .optional()
            .map_err(NotificationRepositoryError::persistence)?;
            Ok(row.map(Notification::from))
        })
        .await
    }
}
