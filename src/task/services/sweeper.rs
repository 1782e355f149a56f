//! Periodic driver for [`TaskManager::sweep_overdue`].
//!
//! [`OverdueSweeper`] runs one sweep as soon as it starts and then one per
//! configured interval until its cancellation token fires. A failed sweep is
//! logged and the next tick tries again.

use super::TaskManager;
use crate::{config::SweepConfig, project::ports::ProjectRepository, task::ports::TaskRepository};
use mockable::Clock;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Background task that auto-closes overdue tasks on a fixed schedule.
pub struct OverdueSweeper<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    manager: TaskManager<T, P, C>,
    interval: Duration,
    cancel: CancellationToken,
}

impl<T, P, C> OverdueSweeper<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper that stops once `cancel` is cancelled.
    ///
    /// Call [`run`](Self::run) to start sweeping.
    #[must_use]
    pub const fn new(
        manager: TaskManager<T, P, C>,
        config: SweepConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            manager,
            interval: config.interval,
            cancel,
        }
    }

    /// Runs a single sweep and logs its outcome.
    ///
    /// Returns the number of closed tasks, or `None` when the sweep failed.
    pub async fn run_once(&self) -> Option<usize> {
        match self.manager.sweep_overdue().await {
            Ok(closed) => {
                info!(closed, "closed overdue tasks");
                Some(closed)
            }
            Err(err) => {
                error!(error = %err, kind = %err.kind(), "overdue sweep failed");
                None
            }
        }
    }

    /// Runs the sweep loop until the cancellation token is cancelled.
    ///
    /// Intended to be spawned as a background task:
    ///
    /// ```rust,ignore
    /// let sweeper = OverdueSweeper::new(manager, config, cancel.child_token());
    /// tokio::spawn(sweeper.run());
    /// ```
    pub async fn run(self) {
        let period = self.interval.max(MIN_INTERVAL);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = period.as_secs(), "overdue sweeper started");

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    info!("overdue sweeper cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_once().await;
                }
            }
        }
    }
}
