//! User directory orchestration tests.

use std::sync::Arc;

use crate::access::{Principal, Role};
use crate::error::{Classify, ErrorKind};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, Priority, Task, TaskState, TaskTitle},
    ports::TaskRepository,
};
use crate::test_support::{MockUserStore, outage};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Email, User, UserId, Username},
    ports::UserRepositoryError,
    services::{UserDirectory, UserDirectoryError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestDirectory = UserDirectory<InMemoryUserRepository, InMemoryTaskRepository, DefaultClock>;

struct Harness {
    tasks: Arc<InMemoryTaskRepository>,
    directory: TestDirectory,
    admin: Principal,
}

impl Harness {
    async fn member(&self, name: &str) -> User {
        self.directory
            .create_user(
                &self.admin,
                name,
                format!("{name}@example.com"),
                Role::Member,
            )
            .await
            .expect("user creation should succeed")
    }

    async fn assigned_task(&self, assignee: UserId, state: &str) -> Task {
        let task = Task::new(
            NewTask {
                title: TaskTitle::new("Owned").expect("valid title"),
                description: String::new(),
                state: TaskState::new(state).expect("valid state"),
                priority: Priority::default(),
                assignee: Some(assignee),
            },
            &TaskState::backlog(),
            &DefaultClock,
        );
        self.tasks.store(&task).await.expect("store task");
        task
    }
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let directory = UserDirectory::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::clone(&tasks),
        Arc::new(DefaultClock),
    );
    Harness {
        tasks,
        directory,
        admin: Principal::admin(UserId::new()),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_registration_becomes_admin(harness: Harness) {
    let first = harness
        .directory
        .register("ada", "ada@example.com")
        .await
        .expect("registration should succeed");
    let second = harness
        .directory
        .register("bob", "bob@example.com")
        .await
        .expect("registration should succeed");

    assert_eq!(first.role(), Role::Admin);
    assert_eq!(second.role(), Role::Member);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_a_validation_error(harness: Harness) {
    harness.member("ada").await;

    let err = harness
        .directory
        .register("ada again", "ADA@example.com")
        .await
        .expect_err("registration should fail");

    assert!(matches!(
        err,
        UserDirectoryError::Repository(UserRepositoryError::DuplicateEmail(_))
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_are_found_by_normalised_email(harness: Harness) {
    let ada = harness.member("ada").await;

    let found = harness
        .directory
        .find_by_email(" Ada@Example.com ")
        .await
        .expect("lookup should succeed");
    let missing = harness
        .directory
        .find_by_email("nobody@example.com")
        .await
        .expect_err("lookup should fail");

    assert_eq!(found.id(), ada.id());
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn current_user_resolves_the_principal(harness: Harness) {
    let ada = harness.member("ada").await;

    let me = harness
        .directory
        .current_user(&Principal::member(ada.id()))
        .await
        .expect("lookup should succeed");
    let stranger = harness
        .directory
        .current_user(&Principal::member(UserId::new()))
        .await
        .expect_err("unknown principal");

    assert_eq!(me, ada);
    assert!(matches!(stranger, UserDirectoryError::NotFound(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_administer_users(harness: Harness) {
    let ada = harness.member("ada").await;
    let member = Principal::member(ada.id());

    let created = harness
        .directory
        .create_user(&member, "eve", "eve@example.com", Role::Admin)
        .await
        .expect_err("members may not create users");
    let promoted = harness
        .directory
        .update_role(&member, ada.id(), Role::Admin)
        .await
        .expect_err("members may not change roles");
    let deleted = harness
        .directory
        .delete_user(&member, ada.id())
        .await
        .expect_err("members may not delete users");

    for err in [created, promoted, deleted] {
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admins_change_roles(harness: Harness) {
    let ada = harness.member("ada").await;

    let promoted = harness
        .directory
        .update_role(&harness.admin, ada.id(), Role::Admin)
        .await
        .expect("role change should succeed");
    let missing = harness
        .directory
        .update_role(&harness.admin, UserId::new(), Role::Admin)
        .await
        .expect_err("unknown user");

    assert_eq!(promoted.role(), Role::Admin);
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_releases_their_tasks(harness: Harness) {
    let ada = harness.member("ada").await;
    let bob = harness.member("bob").await;
    let adas = harness.assigned_task(ada.id(), "inprogress").await;
    let bobs = harness.assigned_task(bob.id(), "done").await;

    harness
        .directory
        .delete_user(&harness.admin, ada.id())
        .await
        .expect("delete should succeed");

    let released = harness
        .tasks
        .find_by_id(adas.id())
        .await
        .expect("read task")
        .expect("task kept");
    assert_eq!(released.state().as_str(), "backlog");
    assert_eq!(released.assignee(), None);
    let kept = harness
        .tasks
        .find_by_id(bobs.id())
        .await
        .expect("read task")
        .expect("task kept");
    assert_eq!(kept.assignee(), Some(bob.id()));

    let remaining: Vec<UserId> = harness
        .directory
        .list_users(&harness.admin)
        .await
        .expect("list users")
        .iter()
        .map(User::id)
        .collect();
    assert_eq!(remaining, vec![bob.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_user_is_not_found(harness: Harness) {
    let dangling = UserId::new();
    let task = harness.assigned_task(dangling, "inprogress").await;

    let err = harness
        .directory
        .delete_user(&harness.admin, dangling)
        .await
        .expect_err("delete should fail");

    assert!(matches!(err, UserDirectoryError::NotFound(_)));
    let stored = harness
        .tasks
        .find_by_id(task.id())
        .await
        .expect("read task")
        .expect("task kept");
    assert_eq!(stored.state().as_str(), "inprogress");
    assert_eq!(stored.assignee(), Some(dangling));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_user_delete_keeps_tasks_released() {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let leaver = User::new(
        Username::new("leaver").expect("valid username"),
        Email::new("leaver@example.com").expect("valid email"),
        Role::Member,
        &DefaultClock,
    );
    let assignee = leaver.id();
    let task = Task::new(
        NewTask {
            title: TaskTitle::new("Orphaned").expect("valid title"),
            description: String::new(),
            state: TaskState::new("inprogress").expect("valid state"),
            priority: Priority::default(),
            assignee: Some(assignee),
        },
        &TaskState::backlog(),
        &DefaultClock,
    );
    tasks.store(&task).await.expect("store task");

    let mut users = MockUserStore::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(leaver.clone())));
    users
        .expect_delete()
        .returning(|_| Err(UserRepositoryError::persistence(outage())));
    let directory = UserDirectory::new(Arc::new(users), Arc::clone(&tasks), Arc::new(DefaultClock));

    let err = directory
        .delete_user(&Principal::admin(UserId::new()), assignee)
        .await
        .expect_err("delete should fail");

    assert_eq!(err.kind(), ErrorKind::Storage);
    let stored = tasks
        .find_by_id(task.id())
        .await
        .expect("read task")
        .expect("task kept");
    assert_eq!(stored.state().as_str(), "backlog");
    assert_eq!(stored.assignee(), None);
}
