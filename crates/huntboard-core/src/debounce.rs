//! Injectable time source and a tick-driven debouncer.
//!
//! Nothing here spawns threads or timers. Owners call [`Debouncer::schedule`]
//! on every change and check [`Debouncer::take_due`] from their own poll or
//! tick loop; the deferred action fires once the quiet period has passed
//! with no further changes.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Real time, truncated to millisecond precision so stored timestamps match
/// what JSON round-trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Hand-driven clock for tests. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now.get() + to_delta(by);
        self.now.set(next);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

/// Deadline tracker: each `schedule` cancels the previous deadline and sets
/// a new one `quiet` after `now`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: TimeDelta,
    deadline: Option<DateTime<Utc>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet: to_delta(quiet),
            deadline: None,
        }
    }

    #[must_use]
    pub fn quiet(&self) -> Duration {
        self.quiet.to_std().unwrap_or_default()
    }

    pub fn schedule(&mut self, now: DateTime<Utc>) {
        let deadline = now
            .checked_add_signed(self.quiet)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.deadline = Some(deadline);
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    #[must_use]
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Clear and return `true` if the deadline has passed.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> bool {
        if self.due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        "2026-02-19T16:00:00.000Z".parse().unwrap()
    }

    #[test]
    fn fires_after_quiet_period() {
        let clock = ManualClock::new(start());
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.schedule(clock.now());

        clock.advance(Duration::from_millis(499));
        assert!(!debouncer.take_due(clock.now()));
        assert!(debouncer.is_pending());

        clock.advance(Duration::from_millis(1));
        assert!(debouncer.take_due(clock.now()));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.take_due(clock.now()));
    }

    #[test]
    fn reschedule_pushes_deadline_out() {
        let clock = ManualClock::new(start());
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(clock.now());
        clock.advance(Duration::from_millis(200));
        debouncer.schedule(clock.now());
        clock.advance(Duration::from_millis(200));
        assert!(!debouncer.due(clock.now()));
        clock.advance(Duration::from_millis(100));
        assert!(debouncer.due(clock.now()));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.schedule(start());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(start());
        let other = clock.clone();
        clock.advance(Duration::from_secs(5));
        assert_eq!(other.now(), start() + TimeDelta::seconds(5));
    }

    #[test]
    fn system_clock_has_millisecond_precision() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
