//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::access::{Principal, Role};
use taskflow::board::{adapters::memory::InMemoryBoardRepository, services::BoardService};
use taskflow::notification::{
    adapters::memory::InMemoryNotificationRepository, services::NotificationInbox,
};
use taskflow::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskView,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use taskflow::user::{
    adapters::memory::InMemoryUserRepository, domain::User, services::UserDirectory,
};

/// Lifecycle service over the in-memory adapters.
pub type Lifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryNotificationRepository,
    DefaultClock,
>;

/// Board service over the in-memory adapters.
pub type Boards = BoardService<
    InMemoryBoardRepository,
    InMemoryTaskRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// User directory over the in-memory adapters.
pub type Directory = UserDirectory<InMemoryUserRepository, InMemoryTaskRepository, DefaultClock>;

/// Every service wired to one shared set of repositories.
pub struct Tracker {
    /// Board storage, exposed for failure injection.
    pub board: Arc<InMemoryBoardRepository>,
    /// Task lifecycle service.
    pub lifecycle: Lifecycle,
    /// Board service.
    pub boards: Boards,
    /// User directory.
    pub directory: Directory,
    /// Notification inbox.
    pub inbox: NotificationInbox<InMemoryNotificationRepository>,
}

impl Tracker {
    /// Registers a user and returns the stored record with its principal.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn register(&self, name: &str) -> Result<(User, Principal), eyre::Report> {
        let user = self
            .directory
            .register(name, format!("{name}@example.com"))
            .await?;
        let principal = Principal::new(user.id(), user.role());
        Ok((user, principal))
    }

    /// Registers an administrator and a member, in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if either registration fails or the roles are not
    /// the expected ones.
    pub async fn admin_and_member(&self) -> Result<(Principal, User), eyre::Report> {
        let (_, admin) = self.register("admin").await?;
        let (member, _) = self.register("member").await?;
        eyre::ensure!(admin.role() == Role::Admin, "first user should be admin");
        eyre::ensure!(member.role() == Role::Member, "second user should be member");
        Ok((admin, member))
    }

    /// Creates a task assigned to `assignee` in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    pub async fn assigned_task(
        &self,
        admin: &Principal,
        assignee: &User,
        state: &str,
    ) -> Result<TaskView, eyre::Report> {
        let created = self
            .lifecycle
            .create_task(
                admin,
                CreateTaskRequest::new("Write release notes")
                    .with_state(state)
                    .with_assignee(assignee.id().to_string()),
            )
            .await?;
        Ok(created)
    }
}

/// Provides a tracker seeded with the default board columns.
///
/// # Panics
///
/// Panics if the default columns cannot be seeded.
#[fixture]
#[expect(clippy::expect_used, reason = "fixture setup failure should abort the test")]
pub fn tracker() -> Tracker {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let board = Arc::new(
        InMemoryBoardRepository::with_default_columns()
            .expect("default columns should seed")
            .sharing_tasks(&tasks),
    );
    let clock = Arc::new(DefaultClock);

    Tracker {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&users),
            Arc::clone(&notifications),
            Arc::clone(&clock),
        ),
        boards: BoardService::new(
            Arc::clone(&board),
            Arc::clone(&tasks),
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        directory: UserDirectory::new(users, tasks, clock),
        inbox: NotificationInbox::new(notifications),
        board,
    }
}
