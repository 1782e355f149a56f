//! Then steps for overdue sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::{
    error::ErrorKind,
    task::{domain::TaskStatus, services::TaskManagerError},
};

#[then("task creation fails with a past deadline error")]
fn creation_fails_with_past_deadline(world: &SweepWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task creation result"))?;

    match result {
        Err(err) if err.kind() == ErrorKind::PastDeadline => Ok(()),
        other => Err(eyre::eyre!("expected PastDeadline error, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &SweepWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.last_task()?.id();
    let stored = run_async(world.tasks.get(task_id))?;

    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the sweep closes {count:u64} tasks")]
fn sweep_closes(world: &SweepWorld, count: u64) -> Result<(), eyre::Report> {
    let closed = world
        .last_sweep_count
        .ok_or_else(|| eyre::eyre!("the sweep has not run"))?;
    let expected = usize::try_from(count)?;

    eyre::ensure!(closed == expected, "expected {expected} closed tasks, got {closed}");
    Ok(())
}

#[then("the task has a closing time")]
fn task_has_closing_time(world: &SweepWorld) -> Result<(), eyre::Report> {
    let task_id = world.last_task()?.id();
    let stored = run_async(world.tasks.get(task_id))?;
    let closed_at = stored
        .closed_at()
        .ok_or_else(|| eyre::eyre!("closed task has no closed_at"))?;

    eyre::ensure!(
        closed_at >= stored.created_at(),
        "closed_at {closed_at} precedes created_at {}",
        stored.created_at()
    );
    Ok(())
}

#[then("the project has no tasks")]
fn project_has_no_tasks(world: &SweepWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let remaining = run_async(world.tasks.list_by_project(project_id))?;
    eyre::ensure!(remaining.is_empty(), "{} tasks remain", remaining.len());
    Ok(())
}

#[then("the deleted tasks cannot be found")]
fn deleted_tasks_cannot_be_found(world: &SweepWorld) -> Result<(), eyre::Report> {
    for id in &world.created_task_ids {
        let result = run_async(world.tasks.get(*id));
        eyre::ensure!(
            matches!(result, Err(TaskManagerError::NotFound(missing)) if missing == *id),
            "task {id} should be gone, got {result:?}"
        );
    }
    Ok(())
}
