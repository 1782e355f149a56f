//! In-memory integration tests for the overdue sweep.

use super::helpers::{Board, board};
use chrono::Duration;
use rstest::rstest;
use taskboard::task::{domain::TaskStatus, services::CreateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_spans_every_project(board: Board) -> Result<(), eyre::Report> {
    let home = board.project("Home").await?;
    let work = board.project("Work").await?;
    for project in [&home, &work] {
        board
            .tasks
            .create(CreateTaskRequest::new(project.id(), "due", "").with_deadline("2026-03-02"))
            .await?;
    }
    board.clock.advance(Duration::days(1) + Duration::seconds(1));

    let closed = board.tasks.sweep_overdue().await?;

    eyre::ensure!(closed == 2, "expected 2 closed tasks, got {closed}");
    for project in [&home, &work] {
        let tasks = board.tasks.list_by_project(project.id()).await?;
        eyre::ensure!(
            tasks.iter().all(|task| task.status() == TaskStatus::Done),
            "all due tasks in {} should be done",
            project.name()
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopened_overdue_task_is_closed_again(board: Board) -> Result<(), eyre::Report> {
    let project = board.project("Home").await?;
    let task = board
        .tasks
        .create(CreateTaskRequest::new(project.id(), "due", "").with_deadline("2026-03-02"))
        .await?;
    board.clock.advance(Duration::days(2));
    eyre::ensure!(board.tasks.sweep_overdue().await? == 1, "first sweep closes");

    let reopened = board.tasks.update_status(task.id(), "doing").await?;
    eyre::ensure!(reopened.closed_at().is_none(), "reopen clears closed_at");

    eyre::ensure!(board.tasks.sweep_overdue().await? == 1, "second sweep closes again");
    Ok(())
}
