//! Runs the overdue-task sweep against `PostgreSQL` until interrupted.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/taskboard taskboard-sweeper
//! ```
//!
//! The sweep interval comes from `OVERDUE_SWEEP_INTERVAL_SECS` (default 900)
//! and the creation caps from `MAX_NUMBER_OF_PROJECTS` and
//! `MAX_NUMBER_OF_TASKS_PER_PROJECT`. Log output is controlled through
//! `RUST_LOG`. Ctrl-C stops the sweeper after the current pass.

use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use taskboard::{
    config::{LimitsConfig, SweepConfig},
    project::adapters::postgres::PostgresProjectRepository,
    task::{
        adapters::postgres::PostgresTaskRepository,
        services::{OverdueSweeper, TaskManager},
    },
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = std::env::var(DATABASE_URL_VAR)
        .map_err(|err| format!("{DATABASE_URL_VAR} must be set: {err}"))?;
    let limits = LimitsConfig::from_env()?;
    let sweep = SweepConfig::from_env()?;

    let pool = Pool::builder().build(ConnectionManager::<PgConnection>::new(database_url))?;
    let manager = TaskManager::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresProjectRepository::new(pool)),
        Arc::new(DefaultClock),
        limits,
    );

    let cancel = CancellationToken::new();
    let sweeper = OverdueSweeper::new(manager, sweep, cancel.child_token());
    let handle = tokio::spawn(sweeper.run());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    cancel.cancel();
    handle.await?;

    tracing::info!("taskboard-sweeper shut down cleanly");
    Ok(())
}
