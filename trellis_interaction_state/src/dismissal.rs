// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-interaction and escape dismissal.
//!
//! An active [`DismissLayer`] watches two independently-toggleable triggers:
//! a pointer press outside the guarded region and an escape keypress. Each
//! physical interaction enters through exactly one entry point and yields at
//! most one [`DismissReason`], so a single interaction can never dismiss
//! twice. Nodes on the exclusion list (typically the trigger element that
//! opened the region) never count as "outside".
//!
//! The host performs hit testing; it reports the press target and whether
//! the press landed inside the guarded region.

use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// The dismissal triggers a layer listens for.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DismissTriggers: u8 {
        /// Dismiss on an escape keypress.
        const ESCAPE = 1 << 0;
        /// Dismiss on a pointer press outside the guarded region.
        const OUTSIDE_PRESS = 1 << 1;
    }
}

/// Why a dismissal fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DismissReason {
    /// The escape key was pressed.
    Escape,
    /// A pointer press landed outside the guarded region.
    OutsidePress,
}

/// The dismissal state machine for one guarded region.
#[derive(Clone, Debug)]
pub struct DismissLayer<K> {
    active: bool,
    triggers: DismissTriggers,
    excluded: SmallVec<[K; 2]>,
}

impl<K: Copy + Eq> DismissLayer<K> {
    /// Create an inactive layer listening for `triggers`.
    pub fn new(triggers: DismissTriggers) -> Self {
        Self {
            active: false,
            triggers,
            excluded: SmallVec::new(),
        }
    }

    /// Whether the layer is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The triggers the layer listens for.
    pub fn triggers(&self) -> DismissTriggers {
        self.triggers
    }

    /// Replace the trigger set. Each trigger is independently toggleable; an
    /// empty set makes the region non-dismissable while leaving it active.
    pub fn set_triggers(&mut self, triggers: DismissTriggers) {
        self.triggers = triggers;
    }

    /// Exclude `id` from outside detection (e.g. the trigger element, so
    /// that pressing it toggles rather than dismiss-then-reopen).
    pub fn exclude(&mut self, id: K) {
        if !self.excluded.contains(&id) {
            self.excluded.push(id);
        }
    }

    /// Start watching. Idempotent.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop watching. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Report a pointer press on `target`; `inside` is the host's hit-test
    /// verdict for the guarded region. Returns a dismissal at most once per
    /// press.
    pub fn on_pointer_down(&self, target: K, inside: bool) -> Option<DismissReason> {
        if !self.active || !self.triggers.contains(DismissTriggers::OUTSIDE_PRESS) {
            return None;
        }
        if inside || self.excluded.contains(&target) {
            return None;
        }
        Some(DismissReason::OutsidePress)
    }

    /// Report an escape keypress.
    pub fn on_escape(&self) -> Option<DismissReason> {
        if self.active && self.triggers.contains(DismissTriggers::ESCAPE) {
            Some(DismissReason::Escape)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_layer(triggers: DismissTriggers) -> DismissLayer<u32> {
        let mut layer = DismissLayer::new(triggers);
        layer.activate();
        layer
    }

    #[test]
    fn outside_press_dismisses() {
        let layer = active_layer(DismissTriggers::all());
        assert_eq!(
            layer.on_pointer_down(7, false),
            Some(DismissReason::OutsidePress)
        );
    }

    #[test]
    fn inside_press_does_not_dismiss() {
        let layer = active_layer(DismissTriggers::all());
        assert_eq!(layer.on_pointer_down(7, true), None);
    }

    #[test]
    fn excluded_target_does_not_dismiss() {
        let mut layer = active_layer(DismissTriggers::all());
        layer.exclude(7);
        assert_eq!(layer.on_pointer_down(7, false), None);
        assert_eq!(
            layer.on_pointer_down(8, false),
            Some(DismissReason::OutsidePress)
        );
    }

    #[test]
    fn escape_dismisses_when_enabled() {
        let layer = active_layer(DismissTriggers::all());
        assert_eq!(layer.on_escape(), Some(DismissReason::Escape));
    }

    #[test]
    fn triggers_toggle_independently() {
        let mut layer = active_layer(DismissTriggers::ESCAPE);
        assert_eq!(layer.on_pointer_down(7, false), None);
        assert_eq!(layer.on_escape(), Some(DismissReason::Escape));

        layer.set_triggers(DismissTriggers::OUTSIDE_PRESS);
        assert_eq!(layer.on_escape(), None);
        assert_eq!(
            layer.on_pointer_down(7, false),
            Some(DismissReason::OutsidePress)
        );
    }

    #[test]
    fn empty_trigger_set_never_dismisses() {
        let layer = active_layer(DismissTriggers::empty());
        assert_eq!(layer.on_pointer_down(7, false), None);
        assert_eq!(layer.on_escape(), None);
    }

    #[test]
    fn inactive_layer_never_dismisses() {
        let layer: DismissLayer<u32> = DismissLayer::new(DismissTriggers::all());
        assert_eq!(layer.on_pointer_down(7, false), None);
        assert_eq!(layer.on_escape(), None);
    }

    #[test]
    fn one_interaction_yields_one_event() {
        // A press enters through on_pointer_down only; an escape through
        // on_escape only. Each returns at most one reason, so a physical
        // interaction can never dismiss twice.
        let layer = active_layer(DismissTriggers::all());
        let press = layer.on_pointer_down(9, false);
        assert_eq!(press, Some(DismissReason::OutsidePress));
        // The same interaction is not also an escape; nothing else fires.
    }
}
