//! When steps for overdue sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::services::{CreateTaskRequest, UpdateTaskRequest};

fn record_created_task(world: &mut SweepWorld, request: CreateTaskRequest) {
    let result = run_async(world.tasks.create(request));
    if let Ok(ref task) = result {
        world.created_task_ids.push(task.id());
        world.last_task = Some(task.clone());
    }
    world.last_create_result = Some(result);
}

#[when(r#"a task "{title}" is added with deadline "{deadline}""#)]
fn add_task_with_deadline(
    world: &mut SweepWorld,
    title: String,
    deadline: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    record_created_task(
        world,
        CreateTaskRequest::new(project_id, title, "").with_deadline(deadline),
    );
    Ok(())
}

#[when(r#"a task "{title}" is added without a deadline"#)]
fn add_task_without_deadline(world: &mut SweepWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    record_created_task(world, CreateTaskRequest::new(project_id, title, ""));
    Ok(())
}

#[when(r#"the task status is changed to "{status}""#)]
fn change_task_status(world: &mut SweepWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.last_task()?.id();
    let updated = run_async(world.tasks.update_status(task_id, &status))
        .wrap_err("change task status in scenario")?;
    world.last_task = Some(updated);
    Ok(())
}

#[when(r#"the task deadline is changed to "{deadline}""#)]
fn change_task_deadline(world: &mut SweepWorld, deadline: String) -> Result<(), eyre::Report> {
    let task = world.last_task()?;
    let request = UpdateTaskRequest::new(
        task.title().as_str(),
        task.description().as_str(),
        task.status().as_str(),
    )
    .with_deadline(deadline);
    let task_id = task.id();
    let updated =
        run_async(world.tasks.update(task_id, request)).wrap_err("change task deadline")?;
    world.last_task = Some(updated);
    Ok(())
}

#[when("the clock advances by {days:u64} days")]
fn advance_clock(world: &mut SweepWorld, days: u64) -> Result<(), eyre::Report> {
    let whole_days = i64::try_from(days).wrap_err("day count out of range")?;
    world.clock.advance(chrono::Duration::days(whole_days));
    Ok(())
}

#[when("the overdue sweep runs")]
fn sweep_runs(world: &mut SweepWorld) -> Result<(), eyre::Report> {
    let closed = run_async(world.tasks.sweep_overdue()).wrap_err("run overdue sweep")?;
    world.last_sweep_count = Some(closed);
    Ok(())
}

#[when("the project is deleted")]
fn project_deleted(world: &mut SweepWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let removed =
        run_async(world.projects.delete(project_id)).wrap_err("delete scenario project")?;
    eyre::ensure!(
        removed == world.created_task_ids.len(),
        "expected {} removed tasks, got {removed}",
        world.created_task_ids.len()
    );
    Ok(())
}
