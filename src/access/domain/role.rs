//! User roles and their capability sets.

use super::Capability;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control over tasks, board configuration and users.
    Admin,
    /// May read, move tasks between states and comment.
    Member,
}

const ADMIN_CAPABILITIES: &[Capability] = &Capability::ALL;

const MEMBER_CAPABILITIES: &[Capability] = &[
    Capability::ReadBoard,
    Capability::ReadTask,
    Capability::PatchStateOnly,
    Capability::AddComment,
];

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns the capabilities granted to this role.
    #[must_use]
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Admin => ADMIN_CAPABILITIES,
            Self::Member => MEMBER_CAPABILITIES,
        }
    }

    /// Returns `true` when the role holds `capability`.
    #[must_use]
    pub fn allows(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing roles from persistence or tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            // Rows written before the member rename still say "user".
            "member" | "user" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
