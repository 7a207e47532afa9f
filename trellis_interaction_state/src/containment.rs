// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus containment.
//!
//! While active, keyboard focus is constrained to an ordered set of tabbable
//! nodes supplied by the host: Tab on the last node cycles to the first,
//! Shift+Tab on the first cycles to the last. On activation, focus is moved
//! into the set if it is not already there; on deactivation, a pre-recorded
//! restore target is handed back exactly once.
//!
//! The machine never touches real focus: it answers "where should focus go"
//! and the host applies it.

use alloc::vec::Vec;

/// The focus containment state machine.
#[derive(Clone, Debug)]
pub struct FocusContainment<K> {
    active: bool,
    tabbables: Vec<K>,
    return_to: Option<K>,
}

impl<K: Copy + Eq> FocusContainment<K> {
    /// Create an inactive guard.
    pub fn new() -> Self {
        Self {
            active: false,
            tabbables: Vec::new(),
            return_to: None,
        }
    }

    /// Whether containment is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate containment over `tabbables` (in traversal order).
    ///
    /// `current` is where focus currently sits; `return_to` is restored on
    /// deactivation. Returns the node focus must move to when `current` is
    /// outside the guarded set, `None` when it is already inside. Activating
    /// an already-active guard is a no-op.
    pub fn activate(
        &mut self,
        tabbables: Vec<K>,
        current: Option<K>,
        return_to: Option<K>,
    ) -> Option<K> {
        if self.active {
            return None;
        }
        self.active = true;
        self.tabbables = tabbables;
        self.return_to = return_to;
        match current {
            Some(c) if self.tabbables.contains(&c) => None,
            _ => self.tabbables.first().copied(),
        }
    }

    /// Replace the guarded set while active (e.g. after the content subtree
    /// re-renders).
    pub fn set_tabbables(&mut self, tabbables: Vec<K>) {
        self.tabbables = tabbables;
    }

    /// Handle Tab (`shift = false`) or Shift+Tab (`shift = true`).
    ///
    /// Returns the node to focus next, cycling at the boundary of the
    /// guarded set. Inactive guards and empty sets return `None` (the host
    /// falls back to platform traversal).
    pub fn on_tab(&self, shift: bool, current: Option<K>) -> Option<K> {
        if !self.active || self.tabbables.is_empty() {
            return None;
        }
        let pos = current.and_then(|c| self.tabbables.iter().position(|&t| t == c));
        let next = match (shift, pos) {
            (false, Some(p)) if p + 1 < self.tabbables.len() => self.tabbables[p + 1],
            (false, _) => self.tabbables[0],
            (true, Some(p)) if p > 0 => self.tabbables[p - 1],
            (true, _) => self.tabbables[self.tabbables.len() - 1],
        };
        Some(next)
    }

    /// Deactivate containment.
    ///
    /// Returns the recorded restore target the first time, `None` on
    /// repeated calls.
    pub fn deactivate(&mut self) -> Option<K> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.tabbables.clear();
        self.return_to.take()
    }
}

impl<K: Copy + Eq> Default for FocusContainment<K> {
    fn default() -> Self {
        Self::new()
    }
}
