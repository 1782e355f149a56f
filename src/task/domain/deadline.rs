//! Task deadlines and their accepted input forms.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `chrono` format accepted for date-only deadlines.
pub const DEADLINE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Byte length of a `YYYY-MM-DD` date.
const DATE_LENGTH: usize = 10;

/// Fractional-second digits kept for instants, matching `timestamptz`.
const INSTANT_SUBSEC_DIGITS: u16 = 6;

/// Deadline as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineInput {
    /// A `YYYY-MM-DD` date, resolved to midnight UTC.
    Date(String),
    /// An exact instant.
    At(DateTime<Utc>),
}

impl DeadlineInput {
    /// Creates a date-only deadline input.
    #[must_use]
    pub fn date(value: impl Into<String>) -> Self {
        Self::Date(value.into())
    }

    /// Creates an exact-instant deadline input.
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self::At(instant)
    }

    /// Resolves the input to an instant without checking it against the
    /// clock.
    ///
    /// Instants are truncated to whole microseconds, the precision a stored
    /// deadline keeps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateFormat`] when a date string is
    /// not exactly `YYYY-MM-DD` or does not name a calendar date.
    pub fn resolve(&self) -> Result<DateTime<Utc>, TaskDomainError> {
        match self {
            Self::Date(raw) => {
                let date = parse_date(raw)?;
                Ok(date.and_time(NaiveTime::default()).and_utc())
            }
            Self::At(instant) => Ok(instant.trunc_subsecs(INSTANT_SUBSEC_DIGITS)),
        }
    }
}

impl From<&str> for DeadlineInput {
    fn from(value: &str) -> Self {
        Self::Date(value.to_owned())
    }
}

impl From<String> for DeadlineInput {
    fn from(value: String) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for DeadlineInput {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::At(instant)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, TaskDomainError> {
    let invalid = || TaskDomainError::InvalidDateFormat(raw.to_owned());
    let well_formed = raw.len() == DATE_LENGTH
        && raw.bytes().enumerate().all(|(position, byte)| match position {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DEADLINE_DATE_FORMAT).map_err(|_| invalid())
}

/// Validated task deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    /// Creates a deadline that lies strictly after the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PastDeadline`] when `at` is at or before the
    /// current time.
    pub fn new(at: DateTime<Utc>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let now = clock.utc();
        if at <= now {
            return Err(TaskDomainError::PastDeadline { deadline: at, now });
        }
        Ok(Self(at))
    }

    /// Parses and validates caller input in one step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateFormat`] for malformed dates and
    /// [`TaskDomainError::PastDeadline`] for deadlines that are not in the
    /// future.
    pub fn from_input(input: &DeadlineInput, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        Self::new(input.resolve()?, clock)
    }

    /// Reconstructs a stored deadline, which may already have passed.
    #[must_use]
    pub const fn from_persisted(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Returns the deadline instant.
    #[must_use]
    pub const fn at(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns `true` once `now` is strictly after the deadline.
    #[must_use]
    pub fn has_passed(self, now: DateTime<Utc>) -> bool {
        self.0 < now
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
