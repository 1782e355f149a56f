//! In-memory integration tests for project lifecycle operations.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::{
    config::LimitsConfig,
    error::ErrorKind,
    project::services::{CreateProjectRequest, UpdateProjectRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_lifecycle_create_rename_list(board: Board) -> Result<(), eyre::Report> {
    let home = board
        .projects
        .create(CreateProjectRequest::new("Home", "chores"))
        .await?;
    board.clock.advance(chrono::Duration::minutes(1));
    let work = board.project("Work").await?;

    let renamed = board
        .projects
        .update(home.id(), UpdateProjectRequest::new("House", "chores and repairs"))
        .await?;
    eyre::ensure!(renamed.name().as_str() == "House", "rename not applied");
    eyre::ensure!(renamed.created_at() == home.created_at(), "created_at changed");

    let listed = board.projects.list().await?;
    let names: Vec<&str> = listed.iter().map(|project| project.name().as_str()).collect();
    eyre::ensure!(names == ["Work", "House"], "unexpected order {names:?}");
    eyre::ensure!(listed.first().map(|project| project.id()) == Some(work.id()), "newest first");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renamed_project_releases_its_old_name(board: Board) -> Result<(), eyre::Report> {
    let home = board.project("Home").await?;
    board
        .projects
        .update(home.id(), UpdateProjectRequest::new("House", ""))
        .await?;

    board.project("Home").await?;

    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lowering_the_cap_keeps_existing_projects() -> Result<(), eyre::Report> {
    let board = Board::with_limits(LimitsConfig::new(1, 50));
    let only = board.project("Only").await?;

    let err = board
        .projects
        .create(CreateProjectRequest::new("Second", ""))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("second project should exceed the cap"))?;

    eyre::ensure!(err.kind() == ErrorKind::LimitExceeded, "unexpected {err}");
    eyre::ensure!(err.kind().http_status() == 409, "limit maps to 409");
    eyre::ensure!(board.projects.get(only.id()).await?.id() == only.id(), "project kept");
    Ok(())
}
