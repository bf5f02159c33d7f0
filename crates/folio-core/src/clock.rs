//! Clock abstraction for deterministic timers.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Source of "now" for arming and firing timer deadlines.
///
/// Tests substitute a manually advanced clock so that every character tick and
/// pause can be stepped through exactly.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Time left until `deadline`, saturating at zero.
    fn until(&self, deadline: DateTime<Utc>) -> Duration {
        (deadline - self.now()).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
