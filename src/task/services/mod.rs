//! Application services for task lifecycle orchestration.

mod lifecycle;
mod requests;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use requests::{CreateTaskRequest, UpdateTaskRequest};
