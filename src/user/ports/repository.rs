//! Repository port for user persistence and lookup.

use crate::access::Role;
use crate::user::domain::{Email, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier is
    /// taken or [`UserRepositoryError::DuplicateEmail`] when another user
    /// already owns the email address.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by email address.
    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>>;

    /// Returns every user, oldest first.
    async fn list(&self) -> UserRepositoryResult<Vec<User>>;

    /// Returns the number of stored users.
    async fn count(&self) -> UserRepositoryResult<u64>;

    /// Replaces a user's role.
    ///
    /// Returns the updated user, or `None` when no user matched.
    async fn update_role(&self, id: UserId, role: Role) -> UserRepositoryResult<Option<User>>;

    /// Deletes a user.
    ///
    /// Returns `false` when no user matched.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email address already exists.
    #[error("email address already registered: {0}")]
    DuplicateEmail(Email),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
