//! Shared world state for notification flow BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskflow::access::Principal;
use taskflow::notification::{
    adapters::memory::InMemoryNotificationRepository,
    domain::Notification,
    services::{NotificationInbox, NotificationInboxError},
};
use taskflow::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskView,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use taskflow::user::{
    adapters::memory::InMemoryUserRepository, domain::User, services::UserDirectory,
};

/// Lifecycle service used by the BDD world.
pub type TestLifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryNotificationRepository,
    DefaultClock,
>;

/// Scenario world for notification flow behaviour tests.
pub struct NotificationWorld {
    pub lifecycle: TestLifecycle,
    pub directory: UserDirectory<InMemoryUserRepository, InMemoryTaskRepository, DefaultClock>,
    pub inbox: NotificationInbox<InMemoryNotificationRepository>,
    pub admin: Option<Principal>,
    pub member: Option<User>,
    pub task: Option<TaskView>,
    pub last_mark_result: Option<Result<Notification, NotificationInboxError>>,
}

impl NotificationWorld {
    /// Creates a world over empty in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let clock = Arc::new(DefaultClock);

        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&users),
                Arc::clone(&notifications),
                Arc::clone(&clock),
            ),
            directory: UserDirectory::new(users, tasks, clock),
            inbox: NotificationInbox::new(notifications),
            admin: None,
            member: None,
            task: None,
            last_mark_result: None,
        }
    }

    /// Returns the administrator principal.
    ///
    /// # Errors
    ///
    /// Returns an error when no administrator was registered.
    pub fn admin(&self) -> Result<Principal, eyre::Report> {
        self.admin
            .ok_or_else(|| eyre::eyre!("missing administrator in scenario world"))
    }

    /// Returns the member principal.
    ///
    /// # Errors
    ///
    /// Returns an error when no member was registered.
    pub fn member_principal(&self) -> Result<Principal, eyre::Report> {
        self.member
            .as_ref()
            .map(|member| Principal::new(member.id(), member.role()))
            .ok_or_else(|| eyre::eyre!("missing member in scenario world"))
    }

    /// Creates a task in progress assigned to the member.
    ///
    /// # Errors
    ///
    /// Returns an error when either principal is missing or creation fails.
    pub fn create_assigned_task(&mut self, title: String) -> Result<(), eyre::Report> {
        let admin = self.admin()?;
        let member = self.member_principal()?;
        let created = run_async(self.lifecycle.create_task(
            &admin,
            CreateTaskRequest::new(title)
                .with_state("inprogress")
                .with_assignee(member.user_id().to_string()),
        ))
        .wrap_err("create an assigned task")?;
        self.task = Some(created);
        Ok(())
    }

    /// Returns the member's inbox, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error when no member exists or the inbox cannot be read.
    pub fn member_inbox(&self) -> Result<Vec<Notification>, eyre::Report> {
        let member = self.member_principal()?;
        Ok(run_async(self.inbox.list(&member))?)
    }
}

impl Default for NotificationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NotificationWorld {
    NotificationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
