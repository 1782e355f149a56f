//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::{
    error::ErrorKind,
    task::{
        domain::TaskStatus,
        services::{CreateTaskRequest, UpdateTaskRequest},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_freely_between_statuses(board: Board) -> Result<(), eyre::Report> {
    let project = board.project("Home").await?;
    let task = board
        .tasks
        .create(CreateTaskRequest::new(project.id(), "dishes", ""))
        .await?;

    let done = board.tasks.update_status(task.id(), "done").await?;
    eyre::ensure!(done.closed_at().is_some(), "done task must have closed_at");

    let todo = board.tasks.update_status(task.id(), "todo").await?;
    eyre::ensure!(todo.status() == TaskStatus::Todo, "reopen to todo");
    eyre::ensure!(todo.closed_at().is_none(), "reopened task must clear closed_at");

    let doing = board.tasks.update_status(task.id(), "doing").await?;
    eyre::ensure!(doing.status() == TaskStatus::Doing, "move to doing");
    eyre::ensure!(doing.revision() == 3, "each change bumps the revision");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_edit_round_trips_through_storage(board: Board) -> Result<(), eyre::Report> {
    let project = board.project("Home").await?;
    let task = board
        .tasks
        .create(CreateTaskRequest::new(project.id(), "dishes", "").with_deadline("2026-03-10"))
        .await?;

    let edited = board
        .tasks
        .update(
            task.id(),
            UpdateTaskRequest::new("laundry", "darks", "doing").with_deadline("2026-04-01"),
        )
        .await?;
    let stored = board.tasks.get(task.id()).await?;

    eyre::ensure!(stored == edited, "stored task differs from returned task");
    eyre::ensure!(
        stored.deadline().map(|deadline| deadline.to_string())
            == Some("2026-04-01 00:00:00 UTC".to_owned()),
        "deadline resolved to midnight UTC"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_validation_leaves_task_untouched(board: Board) -> Result<(), eyre::Report> {
    let project = board.project("Home").await?;
    let task = board
        .tasks
        .create(CreateTaskRequest::new(project.id(), "dishes", ""))
        .await?;

    let cases = [
        (UpdateTaskRequest::new("t".repeat(31), "", "todo"), ErrorKind::Validation),
        (UpdateTaskRequest::new("dishes", "", "blocked"), ErrorKind::InvalidStatus),
        (
            UpdateTaskRequest::new("dishes", "", "todo").with_deadline("2026-3-10"),
            ErrorKind::InvalidDateFormat,
        ),
        (
            UpdateTaskRequest::new("dishes", "", "todo").with_deadline("2000-01-01"),
            ErrorKind::PastDeadline,
        ),
    ];
    for (request, expected) in cases {
        let err = board
            .tasks
            .update(task.id(), request)
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("update should fail with {expected}"))?;
        eyre::ensure!(err.kind() == expected, "expected {expected}, got {}", err.kind());
    }

    eyre::ensure!(board.tasks.get(task.id()).await? == task, "task must be unchanged");
    Ok(())
}
