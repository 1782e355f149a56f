//! In-memory integration tests for cascading project deletion.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::{
    error::ErrorKind,
    task::{ports::TaskRepository, services::CreateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_all_of_its_tasks(board: Board) -> Result<(), eyre::Report> {
    let project = board.project("Home").await?;
    let mut task_ids = Vec::new();
    for index in 0..5 {
        let task = board
            .tasks
            .create(CreateTaskRequest::new(project.id(), format!("task {index}"), ""))
            .await?;
        task_ids.push(task.id());
    }

    let removed = board.projects.delete(project.id()).await?;

    eyre::ensure!(removed == 5, "expected 5 removed tasks, got {removed}");
    for id in task_ids {
        eyre::ensure!(
            board.task_repository.find_by_id(id).await?.is_none(),
            "task {id} survived its project"
        );
    }
    let lookup = board.projects.get(project.id()).await;
    eyre::ensure!(
        lookup.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::NotFound),
        "project should be gone"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_cannot_be_added_to_a_deleted_project(board: Board) -> Result<(), eyre::Report> {
    let project = board.project("Home").await?;
    board.projects.delete(project.id()).await?;

    let err = board
        .tasks
        .create(CreateTaskRequest::new(project.id(), "orphan", ""))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("task creation should fail"))?;

    eyre::ensure!(err.kind() == ErrorKind::NotFound, "unexpected {err}");
    Ok(())
}
