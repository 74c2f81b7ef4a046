//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::access::Role;
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::user::{
    domain::{Email, PersistedUserData, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, UserRepositoryError::persistence)?;
                f(&mut connection)
            },
            UserRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = NewUserRow::from_domain(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info
                            .constraint_name()
                            .is_some_and(|name| name == EMAIL_UNIQUE_CONSTRAINT) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(|connection| {
            users::table
                .order(users::created_at.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }

    async fn count(&self) -> UserRepositoryResult<u64> {
        self.run_blocking(|connection| {
            let total: i64 = users::table
                .count()
                .get_result(connection)
                .map_err(UserRepositoryError::persistence)?;
            u64::try_from(total).map_err(UserRepositoryError::persistence)
        })
        .await
    }

    async fn update_role(&self, id: UserId, role: Role) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = diesel::update(users::table.find(id.into_inner()))
                .set(users::role.eq(role.as_str()))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(users::table.find(id.into_inner()))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        username,
        email,
        role,
        created_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        username: Username::new(username).map_err(UserRepositoryError::persistence)?,
        email: Email::new(email).map_err(UserRepositoryError::persistence)?,
        role: Role::try_from(role.as_str()).map_err(UserRepositoryError::persistence)?,
        created_at,
    };
    Ok(User::from_persisted(data))
}
