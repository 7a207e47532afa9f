// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presence: deferred unmounting behind an exit transition.
//!
//! Hiding a subtree that plays an exit animation must keep the subtree
//! mounted until the transition finishes. [`Presence`] tracks that window:
//! [`Presence::hide`] starts an exit and hands back a generation token; the
//! host reports the transition end with that token, and the machine
//! completes, exactly once, only for the *latest* generation. A second
//! `hide` (or a `show`) before completion supersedes the first, so a stale
//! transition end is silently discarded, the same last-one-wins rule the
//! combobox applies to stale load results.
//!
//! Under a reduced-motion preference exits complete immediately. An
//! optional safety deadline completes the exit from [`Presence::poll`] if
//! the host never observes a transition end.

use trellis_core::timing::Deadline;

/// Mount state of the coordinated subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PresenceState {
    /// The subtree is mounted and visible.
    Visible,
    /// An exit transition is playing; the subtree must stay mounted.
    Exiting,
    /// The subtree may be unmounted.
    Hidden,
}

/// Result of a [`Presence::hide`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HideOutcome {
    /// An exit transition started; report its end with this token.
    Exiting(u64),
    /// The exit completed immediately (reduced motion).
    Complete,
    /// Already hidden; nothing to do.
    Noop,
}

/// Fired when the latest exit finishes. Emitted exactly once per exit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExitComplete;

/// The presence state machine.
#[derive(Clone, Debug)]
pub struct Presence {
    state: PresenceState,
    generation: u64,
    reduced_motion: bool,
    max_wait_ms: Option<u64>,
    safety: Deadline,
}

impl Presence {
    /// Create a hidden coordinator. `reduced_motion` mirrors the user's
    /// preference: when set, exits complete immediately.
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            state: PresenceState::Hidden,
            generation: 0,
            reduced_motion,
            max_wait_ms: None,
            safety: Deadline::idle(),
        }
    }

    /// Complete exits after `ms` even if no transition end is reported.
    pub fn with_max_wait(mut self, ms: u64) -> Self {
        self.max_wait_ms = Some(ms);
        self
    }

    /// Current mount state.
    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Whether the subtree should currently be mounted.
    pub fn is_mounted(&self) -> bool {
        !matches!(self.state, PresenceState::Hidden)
    }

    /// Show the subtree. Cancels a pending exit; its completion will never
    /// fire.
    pub fn show(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.safety.clear();
        self.state = PresenceState::Visible;
    }

    /// Begin hiding at time `now`.
    ///
    /// Calling again while an exit is pending supersedes it: the previous
    /// generation's transition end becomes a no-op and only the new exit
    /// completes.
    pub fn hide(&mut self, now: u64) -> HideOutcome {
        match self.state {
            PresenceState::Hidden => HideOutcome::Noop,
            PresenceState::Visible | PresenceState::Exiting => {
                self.generation = self.generation.wrapping_add(1);
                if self.reduced_motion {
                    self.state = PresenceState::Hidden;
                    self.safety.clear();
                    HideOutcome::Complete
                } else {
                    self.state = PresenceState::Exiting;
                    if let Some(ms) = self.max_wait_ms {
                        self.safety.schedule(now, ms);
                    }
                    HideOutcome::Exiting(self.generation)
                }
            }
        }
    }

    /// Report that the exit transition for `token` finished.
    ///
    /// Completes the exit when `token` is the latest generation and an exit
    /// is actually pending; superseded and repeated reports are discarded.
    pub fn transition_finished(&mut self, token: u64) -> Option<ExitComplete> {
        if self.state == PresenceState::Exiting && token == self.generation {
            self.state = PresenceState::Hidden;
            self.safety.clear();
            Some(ExitComplete)
        } else {
            None
        }
    }

    /// Drive the safety deadline. Completes a pending exit whose transition
    /// end never arrived.
    pub fn poll(&mut self, now: u64) -> Option<ExitComplete> {
        if self.state == PresenceState::Exiting && self.safety.fire(now) {
            self.state = PresenceState::Hidden;
            Some(ExitComplete)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hide_waits_for_the_transition_end() {
        let mut p = Presence::new(false);
        p.show();
        let HideOutcome::Exiting(token) = p.hide(0) else {
            panic!("expected an exit transition");
        };
        assert_eq!(p.state(), PresenceState::Exiting);
        assert!(p.is_mounted());

        assert_eq!(p.transition_finished(token), Some(ExitComplete));
        assert_eq!(p.state(), PresenceState::Hidden);
        assert!(!p.is_mounted());
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut p = Presence::new(false);
        p.show();
        let HideOutcome::Exiting(token) = p.hide(0) else {
            panic!("expected an exit transition");
        };
        assert!(p.transition_finished(token).is_some());
        assert!(p.transition_finished(token).is_none());
    }

    #[test]
    fn a_second_hide_supersedes_the_first() {
        let mut p = Presence::new(false);
        p.show();
        let HideOutcome::Exiting(first) = p.hide(0) else {
            panic!("expected an exit transition");
        };
        let HideOutcome::Exiting(second) = p.hide(10) else {
            panic!("expected an exit transition");
        };
        assert_ne!(first, second);

        // The stale completion is discarded; only the latest fires.
        assert!(p.transition_finished(first).is_none());
        assert_eq!(p.state(), PresenceState::Exiting);
        assert!(p.transition_finished(second).is_some());
    }

    #[test]
    fn reduced_motion_completes_immediately() {
        let mut p = Presence::new(true);
        p.show();
        assert_eq!(p.hide(0), HideOutcome::Complete);
        assert_eq!(p.state(), PresenceState::Hidden);
    }

    #[test]
    fn hiding_while_hidden_is_a_noop() {
        let mut p = Presence::new(false);
        assert_eq!(p.hide(0), HideOutcome::Noop);
    }

    #[test]
    fn show_cancels_a_pending_exit() {
        let mut p = Presence::new(false);
        p.show();
        let HideOutcome::Exiting(token) = p.hide(0) else {
            panic!("expected an exit transition");
        };
        p.show();
        assert_eq!(p.state(), PresenceState::Visible);
        // The canceled exit never completes.
        assert!(p.transition_finished(token).is_none());
        assert_eq!(p.state(), PresenceState::Visible);
    }

    #[test]
    fn safety_deadline_completes_a_lost_transition() {
        let mut p = Presence::new(false).with_max_wait(500);
        p.show();
        p.hide(1_000);
        assert!(p.poll(1_400).is_none());
        assert_eq!(p.poll(1_500), Some(ExitComplete));
        assert_eq!(p.state(), PresenceState::Hidden);
        // Nothing further fires.
        assert!(p.poll(2_000).is_none());
    }

    #[test]
    fn without_max_wait_poll_never_completes() {
        let mut p = Presence::new(false);
        p.show();
        p.hide(0);
        assert!(p.poll(u64::MAX).is_none());
        assert_eq!(p.state(), PresenceState::Exiting);
    }
}
