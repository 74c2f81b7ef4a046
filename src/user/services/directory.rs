//! User registration, lookup and administration.

use crate::access::{AuthorizationError, Capability, Principal, Role, authorize};
use crate::config::WorkflowSettings;
use crate::error::{Classify, ErrorKind};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::user::{
    domain::{Email, User, UserDomainError, UserId, Username},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The caller's role does not permit the operation.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// No user has this identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// No user has this email address.
    #[error("no user registered with email {0}")]
    EmailNotFound(Email),
    /// User repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Releasing the user's tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl Classify for UserDirectoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_)
            | Self::Repository(
                UserRepositoryError::DuplicateEmail(_) | UserRepositoryError::DuplicateUser(_),
            ) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) | Self::EmailNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Tasks(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory service.
#[derive(Clone)]
pub struct UserDirectory<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    tasks: Arc<T>,
    clock: Arc<C>,
    settings: WorkflowSettings,
}

impl<U, T, C> UserDirectory<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a user directory with default workflow settings.
    #[must_use]
    pub fn new(users: Arc<U>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            tasks,
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

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] when the caller cannot read the board
    /// or the listing fails.
    pub async fn list_users(&self, principal: &Principal) -> UserDirectoryResult<Vec<User>> {
        authorize(principal.role(), Capability::ReadBoard)?;
        Ok(self.users.list().await?)
    }

    /// Returns the caller's own record.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when the principal has no
    /// stored user.
    pub async fn current_user(&self, principal: &Principal) -> UserDirectoryResult<User> {
        let id = principal.user_id();
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserDirectoryError::NotFound(id))
    }

    /// Looks a user up by email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] for a malformed address and
    /// [`UserDirectoryError::EmailNotFound`] when nobody uses it.
    pub async fn find_by_email(&self, raw_email: &str) -> UserDirectoryResult<User> {
        let email = Email::new(raw_email)?;
        match self.users.find_by_email(&email).await? {
            Some(user) => Ok(user),
            None => Err(UserDirectoryError::EmailNotFound(email)),
        }
    }

    /// Registers a user. The first user ever registered becomes an
    /// administrator; everyone after is a member.
    ///
    /// The count and insert are separate steps, so two concurrent first
    /// registrations may both become administrators.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] for invalid input, a taken email
    /// address, or a storage failure.
    pub async fn register(
        &self,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> UserDirectoryResult<User> {
        let name = Username::new(username)?;
        let address = Email::new(email)?;
        let role = if self.users.count().await? == 0 {
            Role::Admin
        } else {
            Role::Member
        };
        let user = User::new(name, address, role, &*self.clock);
        self.users.store(&user).await?;
        tracing::info!(user_id = %user.id(), role = %role, "user registered");
        Ok(user)
    }

    /// Creates a user with an explicit role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] for non-admins, invalid input, a taken
    /// email address, or a storage failure.
    pub async fn create_user(
        &self,
        principal: &Principal,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> UserDirectoryResult<User> {
        authorize(principal.role(), Capability::ManageUsers)?;
        let user = User::new(Username::new(username)?, Email::new(email)?, role, &*self.clock);
        self.users.store(&user).await?;
        tracing::info!(
            user_id = %user.id(),
            role = %role,
            actor = %principal.user_id(),
            "user created"
        );
        Ok(user)
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] for an unknown user.
    pub async fn update_role(
        &self,
        principal: &Principal,
        id: UserId,
        role: Role,
    ) -> UserDirectoryResult<User> {
        authorize(principal.role(), Capability::ManageUsers)?;
        let user = self
            .users
            .update_role(id, role)
            .await?
            .ok_or(UserDirectoryError::NotFound(id))?;
        tracing::info!(user_id = %id, role = %role, actor = %principal.user_id(), "role changed");
        Ok(user)
    }

    /// Returns the user's tasks to the backlog unassigned, then deletes the
    /// user.
    ///
    /// An unknown user leaves every task untouched. Once the user is found
    /// the two steps are not atomic: when the delete fails, the tasks stay
    /// released.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when the user does not exist
    /// or was removed concurrently, or a storage error from any step.
    pub async fn delete_user(&self, principal: &Principal, id: UserId) -> UserDirectoryResult<()> {
        authorize(principal.role(), Capability::ManageUsers)?;
        if self.users.find_by_id(id).await?.is_none() {
            return Err(UserDirectoryError::NotFound(id));
        }
        let released = self
            .tasks
            .release_assignee(id, self.settings.backlog_state(), self.clock.utc())
            .await?;
        if !self.users.delete(id).await? {
            return Err(UserDirectoryError::NotFound(id));
        }
        tracing::info!(user_id = %id, released, actor = %principal.user_id(), "user deleted");
        Ok(())
    }
}
