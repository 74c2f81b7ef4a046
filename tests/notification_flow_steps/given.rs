//! Given steps for notification flow BDD scenarios.

use super::world::{NotificationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskflow::access::{Principal, Role};

#[given(r#"an administrator and a member named "{name}""#)]
fn admin_and_member(world: &mut NotificationWorld, name: String) -> Result<(), eyre::Report> {
    let admin = run_async(world.directory.register("admin", "admin@example.com"))
        .wrap_err("register the first user")?;
    eyre::ensure!(admin.role() == Role::Admin, "first user should be an admin");
    let member = run_async(
        world
            .directory
            .register(name.as_str(), format!("{name}@example.com")),
    )
    .wrap_err("register the member")?;

    world.admin = Some(Principal::new(admin.id(), admin.role()));
    world.member = Some(member);
    Ok(())
}

#[given(r#"the administrator created a task "{title}" assigned to the member"#)]
fn task_already_assigned(world: &mut NotificationWorld, title: String) -> Result<(), eyre::Report> {
    world.create_assigned_task(title)
}
