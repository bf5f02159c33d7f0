//! Single-slot timer deadlines.
//!
//! A component that owns a [`TimerSlot`] can have at most one pending timer.
//! Arming replaces whatever was pending, and cancelling clears it, so a stale
//! callback can never fire after the owner has moved on.

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending<K> {
    due: DateTime<Utc>,
    kind: K,
}

/// Holds at most one pending deadline tagged with what should happen when it
/// fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSlot<K> {
    pending: Option<Pending<K>>,
}

impl<K: Copy> Default for TimerSlot<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> TimerSlot<K> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Arms the slot to fire `delay_ms` after `from`, replacing any pending
    /// timer.
    pub fn arm(&mut self, from: DateTime<Utc>, delay_ms: u64, kind: K) {
        self.pending = Some(Pending {
            due: deadline_after(from, delay_ms),
            kind,
        });
    }

    /// Clears the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a timer is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.map(|p| p.due)
    }

    /// What the pending timer will do, if any.
    #[must_use]
    pub fn kind(&self) -> Option<K> {
        self.pending.map(|p| p.kind)
    }

    /// Removes and returns the pending timer if its deadline is at or before
    /// `now`, together with that deadline.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, K)> {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                Some((p.due, p.kind))
            }
            _ => None,
        }
    }
}

/// Adds `delay_ms` to `from`, saturating instead of overflowing.
#[must_use]
pub fn deadline_after(from: DateTime<Utc>, delay_ms: u64) -> DateTime<Utc> {
    let delta = i64::try_from(delay_ms)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .unwrap_or(TimeDelta::MAX);
    from.checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
