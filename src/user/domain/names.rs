//! Lookup table from user identifiers to usernames.

use super::{User, UserId};
use std::collections::HashMap;

/// Username lookup built from a user listing.
///
/// Used to enrich task and comment read models without one query per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameIndex {
    names: HashMap<UserId, String>,
}

impl UsernameIndex {
    /// Builds an index over `users`.
    #[must_use]
    pub fn from_users(users: &[User]) -> Self {
        Self {
            names: users
                .iter()
                .map(|user| (user.id(), user.username().as_str().to_owned()))
                .collect(),
        }
    }

    /// Returns the username for `id`, if known.
    #[must_use]
    pub fn name_of(&self, id: UserId) -> Option<String> {
        self.names.get(&id).cloned()
    }

    /// Returns the number of indexed users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no users are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
