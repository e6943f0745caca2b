//! Time source for the session.
//!
//! Everything time-dependent (autosave deadlines, `lastModified` stamps, the
//! timestamp slot) reads the time through [`Clock`], so tests can drive the
//! debounce with a [`ManualClock`] instead of sleeping.
//!
//! Times are truncated to millisecond resolution, which is what the timestamp
//! slot can represent.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        truncate_to_millis(Utc::now())
    }
}

/// A clock that only moves when told to.
///
/// Uses `Cell` since the session is single-threaded; `advance` takes `&self` so a
/// test can move time while the session holds the clock.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(truncate_to_millis(start)),
        }
    }

    /// A clock starting at the Unix epoch, so test times read as offsets.
    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + Duration::milliseconds(ms));
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(truncate_to_millis(at));
    }

    /// Milliseconds since the Unix epoch.
    pub fn elapsed_ms(&self) -> i64 {
        self.now.get().timestamp_millis()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

pub(crate) fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_epoch();
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance_ms(40);
        assert_eq!(clock.elapsed_ms(), 40);
        assert_eq!(clock.now().timestamp_millis(), 40);
    }

    #[test]
    fn test_system_clock_has_millisecond_resolution() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
