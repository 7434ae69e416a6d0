//! Test clock: deterministic `Clock` implementation for tests.

use chrono::{DateTime, Utc};
use scoreboard_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// The instant used throughout the workspace's tests.
    #[must_use]
    pub fn reference() -> Self {
        Self(
            chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 1, 15, 10, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
