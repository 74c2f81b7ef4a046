//! Domain model for tasks and their comments.
//!
//! Task state is a free-form string. The domain validates shapes (non-empty
//! titles, finite priorities) and decides which notifications a patch owes;
//! it never checks a state against the configured columns.

mod comment;
mod error;
mod ids;
mod patch;
mod task;
mod view;

pub use comment::{Comment, CommentContent, CommentOrder, PersistedCommentData};
pub use error::TaskDomainError;
pub use ids::{CommentId, TaskId};
pub use patch::{PatchField, PendingNotification, TaskPatch};
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskSnapshot, TaskState, TaskTitle};
pub use view::{CommentView, TaskView};
