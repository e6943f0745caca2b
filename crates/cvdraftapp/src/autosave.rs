//! # Autosave Scheduling
//!
//! A trailing-edge debounce expressed as a two-state machine:
//!
//! ```text
//!            mutate (arm at now + interval)
//!   ┌──────┐ ───────────────────────────▶ ┌────────────────┐
//!   │ Idle │                              │ Armed(deadline)│ ◀─┐ mutate
//!   └──────┘ ◀─────────────────────────── └────────────────┘ ──┘ (re-arm)
//!            deadline reached (take_due) / cancel
//! ```
//!
//! Every mutation cancels the pending deadline and arms a fresh one, so a burst of
//! edits faster than the interval produces a single write once the user pauses.
//! It is not a heartbeat: nothing fires while edits keep arriving.
//!
//! The scheduler only decides *when*. The session performs the draft write when
//! [`AutosaveScheduler::take_due`] reports the deadline has passed; it never
//! touches the committed slot or the dirty baseline.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    Armed { deadline: DateTime<Utc> },
}

#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    interval: Duration,
    state: AutosaveState,
}

impl AutosaveScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::zero()),
            state: AutosaveState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> AutosaveState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, AutosaveState::Armed { .. })
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self.state {
            AutosaveState::Armed { deadline } => Some(deadline),
            AutosaveState::Idle => None,
        }
    }

    /// Record a mutation at `now`: cancel any pending deadline and re-arm.
    pub fn on_mutate(&mut self, now: DateTime<Utc>) {
        let deadline = now
            .checked_add_signed(self.interval)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.state = AutosaveState::Armed { deadline };
    }

    /// If the deadline has passed, return to Idle and report that the write is due.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            AutosaveState::Armed { deadline } if now >= deadline => {
                self.state = AutosaveState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending deadline. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.state = AutosaveState::Idle;
        was_armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let mut scheduler = AutosaveScheduler::new(Duration::milliseconds(30));
        assert_eq!(scheduler.state(), AutosaveState::Idle);
        assert!(!scheduler.take_due(at(1_000)));
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let mut scheduler = AutosaveScheduler::new(Duration::milliseconds(30));
        scheduler.on_mutate(at(0));
        assert_eq!(scheduler.deadline(), Some(at(30)));

        assert!(!scheduler.take_due(at(29)));
        assert!(scheduler.take_due(at(30)));
        assert!(!scheduler.is_armed());
        assert!(!scheduler.take_due(at(31)));
    }

    #[test]
    fn test_mutations_push_deadline_back() {
        let mut scheduler = AutosaveScheduler::new(Duration::milliseconds(30));
        scheduler.on_mutate(at(0));
        scheduler.on_mutate(at(5));
        scheduler.on_mutate(at(10));

        assert!(!scheduler.take_due(at(30)));
        assert!(!scheduler.take_due(at(39)));
        assert!(scheduler.take_due(at(40)));
    }

    #[test]
    fn test_late_poll_still_fires() {
        let mut scheduler = AutosaveScheduler::new(Duration::milliseconds(30));
        scheduler.on_mutate(at(0));
        assert!(scheduler.take_due(at(10_000)));
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = AutosaveScheduler::new(Duration::milliseconds(30));
        assert!(!scheduler.cancel());
        scheduler.on_mutate(at(0));
        assert!(scheduler.cancel());
        assert!(!scheduler.take_due(at(100)));
    }

    #[test]
    fn test_zero_interval_is_due_immediately() {
        let mut scheduler = AutosaveScheduler::new(Duration::zero());
        scheduler.on_mutate(at(7));
        assert!(scheduler.take_due(at(7)));
    }

    #[test]
    fn test_negative_interval_is_clamped() {
        let scheduler = AutosaveScheduler::new(Duration::milliseconds(-5));
        assert_eq!(scheduler.interval(), Duration::zero());
    }
}
