//! Capabilities evaluated per request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single permission a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Read the aggregated board.
    ReadBoard,
    /// Read a single task with its comments.
    ReadTask,
    /// Create a task.
    CreateTask,
    /// Patch a task when the patch touches only its state.
    PatchStateOnly,
    /// Patch any task field.
    PatchFull,
    /// Delete a task.
    DeleteTask,
    /// Comment on a task.
    AddComment,
    /// Manage users and board configuration.
    ManageUsers,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ReadBoard,
        Self::ReadTask,
        Self::CreateTask,
        Self::PatchStateOnly,
        Self::PatchFull,
        Self::DeleteTask,
        Self::AddComment,
        Self::ManageUsers,
    ];

    /// Returns the canonical kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadBoard => "read-board",
            Self::ReadTask => "read-task",
            Self::CreateTask => "create-task",
            Self::PatchStateOnly => "patch-state-only",
            Self::PatchFull => "patch-full",
            Self::DeleteTask => "delete-task",
            Self::AddComment => "add-comment",
            Self::ManageUsers => "manage-users",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
