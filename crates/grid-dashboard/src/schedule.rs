//! Clock abstraction and cooperative periodic ticks.
//!
//! Widgets that refresh on a timer never read the wall clock themselves.
//! They receive the current time from an injected [`Clock`] and decide
//! whether to refresh with a [`Periodic`], so tests can advance time
//! deterministically with a [`ManualClock`].

use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use grid_dashboard::schedule::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(5));
/// assert_eq!((clock.now() - start).num_seconds(), 5);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += to_chrono(by);
    }

    /// Jumps the clock to `to`.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Default for ManualClock {
    /// A clock frozen at 2024-01-01T09:00:00Z.
    fn default() -> Self {
        let start = DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z")
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        Self::new(start)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or_else(|_| chrono::Duration::days(365))
}

/// A fixed-interval tick driven by whoever polls it.
///
/// The first poll always fires. After that, a poll fires once the due time
/// has been reached; if several intervals were missed they coalesce into a
/// single fire and the schedule restarts from the poll time.
#[derive(Debug, Clone)]
pub struct Periodic {
    every: chrono::Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Periodic {
    /// Creates a tick firing every `every`. Zero is raised to one millisecond.
    pub fn new(every: Duration) -> Self {
        Self {
            every: to_chrono(every.max(Duration::from_millis(1))),
            next_due: None,
        }
    }

    /// Interval between fires.
    pub fn interval(&self) -> Duration {
        self.every.to_std().unwrap_or(Duration::from_millis(1))
    }

    /// Returns `true` if the tick fires at `now`, and reschedules it.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            Some(due) => {
                let next = due + self.every;
                self.next_due = Some(if next <= now { now + self.every } else { next });
                true
            }
            None => {
                self.next_due = Some(now + self.every);
                true
            }
        }
    }

    /// Forgets the schedule so the next poll fires immediately.
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}
