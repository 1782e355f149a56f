//! Runtime configuration for the project and task managers.
//!
//! Limits and the sweep interval are read once at start-up and injected into
//! the managers and the sweeper; nothing in the crate consults the process
//! environment after construction.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the maximum number of projects.
pub const MAX_PROJECTS_VAR: &str = "MAX_NUMBER_OF_PROJECTS";

/// Environment variable holding the maximum number of tasks per project.
pub const MAX_TASKS_PER_PROJECT_VAR: &str = "MAX_NUMBER_OF_TASKS_PER_PROJECT";

/// Environment variable holding the overdue sweep interval in seconds.
pub const SWEEP_INTERVAL_VAR: &str = "OVERDUE_SWEEP_INTERVAL_SECS";

const DEFAULT_MAX_PROJECTS: usize = 10;
const DEFAULT_MAX_TASKS_PER_PROJECT: usize = 50;
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Errors returned while loading configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but could not be parsed.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Raw value as found.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Creation caps enforced by the managers.
///
/// Caps are checked when a project or task is created. Lowering a cap never
/// removes existing records.
///
/// # Examples
///
/// ```
/// use taskboard::config::LimitsConfig;
///
/// let limits = LimitsConfig::default();
/// assert_eq!(limits.max_projects, 10);
/// assert_eq!(limits.max_tasks_per_project, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Maximum number of projects.
    pub max_projects: usize,
    /// Maximum number of tasks in a single project.
    pub max_tasks_per_project: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            max_tasks_per_project: DEFAULT_MAX_TASKS_PER_PROJECT,
        }
    }
}

impl LimitsConfig {
    /// Creates limits with explicit values.
    #[must_use]
    pub const fn new(max_projects: usize, max_tasks_per_project: usize) -> Self {
        Self {
            max_projects,
            max_tasks_per_project,
        }
    }

    /// Reads limits from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that is not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads limits through `lookup`, falling back to defaults for missing
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that is not a non-negative integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            max_projects: parse_count(MAX_PROJECTS_VAR, lookup(MAX_PROJECTS_VAR))?
                .unwrap_or(defaults.max_projects),
            max_tasks_per_project: parse_count(
                MAX_TASKS_PER_PROJECT_VAR,
                lookup(MAX_TASKS_PER_PROJECT_VAR),
            )?
            .unwrap_or(defaults.max_tasks_per_project),
        })
    }
}

/// Scheduling settings for the overdue sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Time between two sweep runs.
    pub interval: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl SweepConfig {
    /// Reads sweep settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the interval is not a
    /// positive number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads sweep settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the interval is not a
    /// positive number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(raw) = lookup(SWEEP_INTERVAL_VAR) else {
            return Ok(Self::default());
        };
        let seconds = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(SWEEP_INTERVAL_VAR, &raw, "expected a whole number of seconds"))?;
        if seconds == 0 {
            return Err(invalid(SWEEP_INTERVAL_VAR, &raw, "interval must be positive"));
        }
        Ok(Self {
            interval: Duration::from_secs(seconds),
        })
    }
}

fn parse_count(variable: &'static str, raw: Option<String>) -> Result<Option<usize>, ConfigError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid(variable, &value, "expected a non-negative integer"))
    })
    .transpose()
}

fn invalid(variable: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        variable,
        value: value.to_owned(),
        reason,
    }
}
