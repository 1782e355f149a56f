//! Clocks shared by the unit test suites.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Returns 2026-03-01T09:00:00Z, the instant every test clock starts at.
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("reference instant is unambiguous")
}

/// Clock whose time only moves when a test says so.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at [`reference_instant`].
    pub fn new() -> Self {
        Self::at(reference_instant())
    }

    /// Creates a clock frozen at `now`.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }

    /// Jumps the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().expect("clock lock") = instant;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}
