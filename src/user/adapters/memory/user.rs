//! In-memory repository for user directory tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::access::Role;
use crate::user::{
    domain::{Email, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    insertion_order: Vec<UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> UserRepositoryResult<RwLockReadGuard<'_, InMemoryUserState>> {
        self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> UserRepositoryResult<RwLockWriteGuard<'_, InMemoryUserState>> {
        self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write()?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.insertion_order.push(user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.read()?;
        let mut users: Vec<User> = state
            .insertion_order
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect();
        users.sort_by_key(User::created_at);
        Ok(users)
    }

    async fn count(&self) -> UserRepositoryResult<u64> {
        let state = self.read()?;
        u64::try_from(state.users.len()).map_err(UserRepositoryError::persistence)
    }

    async fn update_role(&self, id: UserId, role: Role) -> UserRepositoryResult<Option<User>> {
        let mut state = self.write()?;
        Ok(state.users.get_mut(&id).map(|user| {
            user.change_role(role);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        let mut state = self.write()?;
        let removed = state.users.remove(&id).is_some();
        if removed {
            state.insertion_order.retain(|existing| *existing != id);
        }
        Ok(removed)
    }
}
