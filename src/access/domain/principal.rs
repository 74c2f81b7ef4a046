//! Authenticated actor passed into every core operation.

use super::Role;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// Already-validated `{user id, role}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    user_id: UserId,
    role: Role,
}

impl Principal {
    /// Creates a principal.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates an administrator principal.
    #[must_use]
    pub const fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    /// Creates a member principal.
    #[must_use]
    pub const fn member(user_id: UserId) -> Self {
        Self::new(user_id, Role::Member)
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
