//! Mock ports shared by the unit tests.

use crate::access::Role;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryResult},
};
use crate::task::{
    domain::{Comment, CommentOrder, Task, TaskId, TaskPatch, TaskState},
    ports::{PatchOutcome, TaskRepository, TaskRepositoryResult},
};
use crate::user::{
    domain::{Email, User, UserId},
    ports::{UserRepository, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

mock! {
    pub NotificationStore {}

    #[async_trait]
    impl NotificationRepository for NotificationStore {
        async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;
        async fn list_for_user(
            &self,
            user_id: UserId,
        ) -> NotificationRepositoryResult<Vec<Notification>>;
        async fn mark_read(
            &self,
            user_id: UserId,
            id: NotificationId,
        ) -> NotificationRepositoryResult<Option<Notification>>;
    }
}

mock! {
    pub UserStore {}

    #[async_trait]
    impl UserRepository for UserStore {
        async fn store(&self, user: &User) -> UserRepositoryResult<()>;
        async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;
        async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>>;
        async fn list(&self) -> UserRepositoryResult<Vec<User>>;
        async fn count(&self) -> UserRepositoryResult<u64>;
        async fn update_role(&self, id: UserId, role: Role) -> UserRepositoryResult<Option<User>>;
        async fn delete(&self, id: UserId) -> UserRepositoryResult<bool>;
    }
}

mock! {
    pub TaskStore {}

    #[async_trait]
    impl TaskRepository for TaskStore {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn apply_patch(
            &self,
            id: TaskId,
            patch: &TaskPatch,
            at: DateTime<Utc>,
        ) -> TaskRepositoryResult<Option<PatchOutcome>>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
        async fn release_assignee(
            &self,
            user_id: UserId,
            backlog: &TaskState,
            at: DateTime<Utc>,
        ) -> TaskRepositoryResult<u64>;
        async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()>;
        async fn comments_for(
            &self,
            task_id: TaskId,
            order: CommentOrder,
        ) -> TaskRepositoryResult<Vec<Comment>>;
    }
}

/// Builds an I/O error standing in for a storage outage.
pub fn outage() -> std::io::Error {
    std::io::Error::other("storage unavailable")
}
