// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot millisecond deadlines.
//!
//! Trellis behaviors never read a clock. Hosts pass `now` (milliseconds, any
//! monotonic origin) into time-dependent operations, and behaviors store the
//! moments at which something should happen as [`Deadline`] values the host
//! polls. A deadline holds at most one pending moment: re-scheduling always
//! replaces the previous one, which is what makes debounce windows collapse
//! bursts of keystrokes into a single firing.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::timing::Deadline;
//!
//! let mut debounce = Deadline::idle();
//! debounce.schedule(1_000, 100);
//! // A second keystroke re-schedules; the earlier moment is gone.
//! debounce.schedule(1_050, 100);
//!
//! assert!(!debounce.fire(1_100));
//! assert!(debounce.fire(1_150));
//! // One-shot: a fired deadline is idle again.
//! assert!(!debounce.fire(1_200));
//! ```

/// A single pending moment in host-supplied millisecond time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<u64>,
}

impl Deadline {
    /// A deadline with nothing pending.
    pub fn idle() -> Self {
        Self { at: None }
    }

    /// Schedule the deadline `delay_ms` after `now`, replacing any pending
    /// moment.
    pub fn schedule(&mut self, now: u64, delay_ms: u64) {
        self.at = Some(now.saturating_add(delay_ms));
    }

    /// Drop any pending moment.
    pub fn clear(&mut self) {
        self.at = None;
    }

    /// Whether a moment is pending (due or not).
    pub fn is_pending(&self) -> bool {
        self.at.is_some()
    }

    /// Whether the pending moment has been reached at `now`.
    pub fn is_due(&self, now: u64) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    /// Consume the deadline if due: returns `true` and clears it when the
    /// pending moment has been reached, `false` otherwise.
    pub fn fire(&mut self, now: u64) -> bool {
        if self.is_due(now) {
            self.at = None;
            true
        } else {
            false
        }
    }

    /// Milliseconds until the pending moment, if any. Hosts can use this to
    /// schedule their next wake-up; zero means already due.
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.at.map(|at| at.saturating_sub(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_deadline_never_fires() {
        let mut d = Deadline::idle();
        assert!(!d.is_pending());
        assert!(!d.fire(u64::MAX));
    }

    #[test]
    fn fires_exactly_once_at_or_after_the_moment() {
        let mut d = Deadline::idle();
        d.schedule(100, 50);
        assert!(!d.fire(149));
        assert!(d.fire(150));
        assert!(!d.fire(151));
    }

    #[test]
    fn rescheduling_replaces_the_pending_moment() {
        let mut d = Deadline::idle();
        d.schedule(0, 100);
        d.schedule(60, 100);
        // The original moment (100) no longer fires.
        assert!(!d.fire(100));
        assert!(d.fire(160));
    }

    #[test]
    fn clear_cancels() {
        let mut d = Deadline::idle();
        d.schedule(0, 10);
        d.clear();
        assert!(!d.is_pending());
        assert!(!d.fire(1_000));
    }

    #[test]
    fn remaining_reports_time_left() {
        let mut d = Deadline::idle();
        assert_eq!(d.remaining(0), None);
        d.schedule(100, 50);
        assert_eq!(d.remaining(120), Some(30));
        assert_eq!(d.remaining(200), Some(0));
    }

    #[test]
    fn schedule_saturates_instead_of_overflowing() {
        let mut d = Deadline::idle();
        d.schedule(u64::MAX - 1, 100);
        assert!(!d.fire(u64::MAX - 2));
        assert!(d.fire(u64::MAX));
    }
}
