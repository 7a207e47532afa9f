// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Dialog: a single-region modal dialog state machine.
//!
//! ## Overview
//!
//! A [`Dialog`] owns a focus containment guard and a dismissal layer as
//! private fields and coordinates them through the open/close lifecycle:
//!
//! - `closed → open`: [`Dialog::open`] records the triggering node (the
//!   restore target), flips state, and, once the host reports the content
//!   subtree exists via [`Dialog::content_ready`], activates containment
//!   and dismissal.
//! - `open → closed`: [`Dialog::close`] deactivates containment and
//!   dismissal *first*, then flips state. When an exit animation is
//!   configured ([`Dialog::with_exit_animation`]), the flip is deferred
//!   behind a presence coordinator until the host reports the transition
//!   end; focus returns to the recorded trigger after the flip either way.
//!
//! The dismissal flavor follows the dialog role: a default
//! [`DialogRole::Dialog`] dismisses on escape and outside press, while
//! [`DialogRole::AlertDialog`] disables both. Re-entrant `open` while open
//! and `close` while closed are no-ops, and containment/dismissal are never
//! active for more than the one region an instance tracks.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::ids::SequentialIds;
//! use trellis_dialog::{Dialog, DialogEvent, DialogRole};
//!
//! let mut dialog: Dialog<u32> = Dialog::new(DialogRole::Dialog, &mut SequentialIds);
//!
//! dialog.open(Some(1)); // node 1 is the trigger
//! let events = dialog.content_ready(vec![10, 11, 12], Some(1));
//! assert_eq!(events, [DialogEvent::FocusInto(10)]);
//!
//! // Tab on the last tabbable wraps inside the dialog.
//! assert_eq!(dialog.on_tab(false, Some(12)), Some(10));
//!
//! let events = dialog.close(0);
//! assert_eq!(events, [DialogEvent::Closed, DialogEvent::RestoreFocus(1)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use trellis_core::attrs::{Attr, PropBundle};
use trellis_core::ids::{IdGenerator, WidgetIds};
use trellis_core::key::Key;
use trellis_interaction_state::containment::FocusContainment;
use trellis_interaction_state::dismissal::{DismissLayer, DismissTriggers};
use trellis_interaction_state::presence::{HideOutcome, Presence, PresenceState};

/// Dialog flavor; selects the ARIA role and the dismissal behavior.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogRole {
    /// A regular dialog: dismissable via escape and outside press.
    Dialog,
    /// An alert dialog: must be resolved explicitly, never dismissed.
    AlertDialog,
}

impl DialogRole {
    fn as_aria(self) -> &'static str {
        match self {
            Self::Dialog => "dialog",
            Self::AlertDialog => "alertdialog",
        }
    }

    fn triggers(self) -> DismissTriggers {
        match self {
            Self::Dialog => DismissTriggers::all(),
            Self::AlertDialog => DismissTriggers::empty(),
        }
    }
}

/// What the host must do after an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogEvent<K> {
    /// The dialog opened.
    Opened,
    /// Move real focus to this node inside the content.
    FocusInto(K),
    /// An exit transition started; report its end via
    /// [`Dialog::transition_finished`] with this token.
    ExitStarted(u64),
    /// The dialog closed (the state flip happened).
    Closed,
    /// Return real focus to this recorded trigger node.
    RestoreFocus(K),
}

/// Attribute bundle for the content element.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogContentProps {
    /// `"dialog"` or `"alertdialog"`.
    pub role: &'static str,
    /// Stable derived element id.
    pub id: String,
    /// `true`; the dialog is modal.
    pub aria_modal: bool,
    /// The title element's id.
    pub aria_labelledby: String,
    /// The description element's id.
    pub aria_describedby: String,
}

impl PropBundle for DialogContentProps {
    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("aria-modal", self.aria_modal),
            Attr::new("aria-labelledby", self.aria_labelledby.clone()),
            Attr::new("aria-describedby", self.aria_describedby.clone()),
        ]
    }
}

/// Attribute bundle for the trigger element.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogTriggerProps {
    /// Stable derived element id.
    pub id: String,
    /// `"dialog"`.
    pub aria_haspopup: &'static str,
    /// Whether the dialog is open.
    pub aria_expanded: bool,
    /// The content element's id.
    pub aria_controls: String,
}

impl PropBundle for DialogTriggerProps {
    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::new("id", self.id.clone()),
            Attr::new("aria-haspopup", self.aria_haspopup),
            Attr::new("aria-expanded", self.aria_expanded),
            Attr::new("aria-controls", self.aria_controls.clone()),
        ]
    }
}

/// The dialog state machine.
#[derive(Clone, Debug)]
pub struct Dialog<K> {
    ids: WidgetIds,
    role: DialogRole,
    open: bool,
    trigger: Option<K>,
    containment: FocusContainment<K>,
    dismissal: DismissLayer<K>,
    presence: Option<Presence>,
    /// Restore target taken out of the guard when a deferred close starts.
    pending_restore: Option<K>,
    destroyed: bool,
}

impl<K: Copy + Eq> Dialog<K> {
    /// Create a closed dialog of the given flavor.
    pub fn new(role: DialogRole, ids: &mut impl IdGenerator) -> Self {
        Self {
            ids: WidgetIds::new(ids),
            role,
            open: false,
            trigger: None,
            containment: FocusContainment::new(),
            dismissal: DismissLayer::new(role.triggers()),
            presence: None,
            pending_restore: None,
            destroyed: false,
        }
    }

    /// Defer the close-side state flip behind an exit transition.
    /// `reduced_motion` completes exits immediately; `max_wait_ms` bounds
    /// the wait in case the host never reports a transition end.
    pub fn with_exit_animation(mut self, reduced_motion: bool, max_wait_ms: u64) -> Self {
        self.presence = Some(Presence::new(reduced_motion).with_max_wait(max_wait_ms));
        self
    }

    /// Whether the dialog is open (including the exit-transition window).
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The dialog's ARIA role string.
    pub fn role(&self) -> DialogRole {
        self.role
    }

    /// Open the dialog, recording `trigger` (typically the currently
    /// focused node) as the focus restore target. Re-entrant opens are
    /// no-ops. Containment starts only once [`Dialog::content_ready`]
    /// reports the content subtree.
    pub fn open(&mut self, trigger: Option<K>) -> Vec<DialogEvent<K>> {
        if self.destroyed || self.open {
            return Vec::new();
        }
        self.open = true;
        self.trigger = trigger;
        self.pending_restore = None;
        if let Some(presence) = &mut self.presence {
            presence.show();
        }
        vec![DialogEvent::Opened]
    }

    /// The content subtree exists; activate containment over `tabbables`
    /// (in traversal order) and start watching for dismissal. `current` is
    /// where real focus sits right now.
    pub fn content_ready(&mut self, tabbables: Vec<K>, current: Option<K>) -> Vec<DialogEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        self.dismissal.activate();
        let target = self.containment.activate(tabbables, current, self.trigger);
        target.map(DialogEvent::FocusInto).into_iter().collect()
    }

    /// Close the dialog at time `now`.
    ///
    /// Guards deactivate first. Without an exit animation the state flips
    /// immediately and focus returns to the recorded trigger; with one, the
    /// flip waits for [`Dialog::transition_finished`] (or the safety
    /// deadline via [`Dialog::poll`]). Re-entrant closes are no-ops.
    pub fn close(&mut self, now: u64) -> Vec<DialogEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        if self.closing() {
            return Vec::new();
        }
        self.dismissal.deactivate();
        let restore = self.containment.deactivate().or(self.trigger.take());
        self.pending_restore = restore;

        if let Some(presence) = &mut self.presence {
            match presence.hide(now) {
                HideOutcome::Exiting(token) => return vec![DialogEvent::ExitStarted(token)],
                HideOutcome::Complete | HideOutcome::Noop => {}
            }
        }
        self.finish_close()
    }

    /// The host observed the end of the exit transition started with
    /// `token`. Completes a deferred close exactly once; stale tokens are
    /// discarded.
    pub fn transition_finished(&mut self, token: u64) -> Vec<DialogEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        let finished = match &mut self.presence {
            Some(presence) => presence.transition_finished(token).is_some(),
            _ => false,
        };
        if finished {
            self.finish_close()
        } else {
            Vec::new()
        }
    }

    /// Drive the exit safety deadline at time `now`.
    pub fn poll(&mut self, now: u64) -> Vec<DialogEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        let finished = match &mut self.presence {
            Some(presence) => presence.poll(now).is_some(),
            _ => false,
        };
        if finished {
            self.finish_close()
        } else {
            Vec::new()
        }
    }

    /// Keydown while the dialog is open. Escape closes dismissable flavors.
    pub fn on_key_down(&mut self, key: Key, now: u64) -> Vec<DialogEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        match key {
            Key::Escape if self.dismissal.on_escape().is_some() => self.close(now),
            _ => Vec::new(),
        }
    }

    /// Tab/Shift+Tab inside the dialog: where focus should go, cycling at
    /// the content boundary.
    pub fn on_tab(&self, shift: bool, current: Option<K>) -> Option<K> {
        self.containment.on_tab(shift, current)
    }

    /// A pointer press landed on `target`; `inside` is the host's hit-test
    /// verdict for the content region.
    pub fn on_pointer_down(&mut self, target: K, inside: bool, now: u64) -> Vec<DialogEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        if self.dismissal.on_pointer_down(target, inside).is_some() {
            self.close(now)
        } else {
            Vec::new()
        }
    }

    /// Attribute bundle for the content element.
    pub fn content_props(&self) -> DialogContentProps {
        DialogContentProps {
            role: self.role.as_aria(),
            id: self.ids.content(),
            aria_modal: true,
            aria_labelledby: self.ids.title(),
            aria_describedby: self.ids.description(),
        }
    }

    /// Id for the title element, referenced by `aria-labelledby`.
    pub fn title_id(&self) -> String {
        self.ids.title()
    }

    /// Id for the description element, referenced by `aria-describedby`.
    pub fn description_id(&self) -> String {
        self.ids.description()
    }

    /// Attribute bundle for the trigger element.
    pub fn trigger_props(&self) -> DialogTriggerProps {
        DialogTriggerProps {
            id: self.ids.trigger(),
            aria_haspopup: "dialog",
            aria_expanded: self.open,
            aria_controls: self.ids.content(),
        }
    }

    /// Tear the dialog down. Idempotent; all later operations are no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.open = false;
        self.dismissal.deactivate();
        self.containment.deactivate();
        self.pending_restore = None;
        self.trigger = None;
    }

    /// Whether a deferred close is already waiting on its exit transition.
    fn closing(&self) -> bool {
        self.presence
            .as_ref()
            .is_some_and(|p| p.state() == PresenceState::Exiting)
    }

    fn finish_close(&mut self) -> Vec<DialogEvent<K>> {
        self.open = false;
        let mut events = vec![DialogEvent::Closed];
        events.extend(self.pending_restore.take().map(DialogEvent::RestoreFocus));
        events
    }
}
