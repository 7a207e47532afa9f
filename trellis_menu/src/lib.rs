// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Menu: a disclosure menu state machine with nested submenus.
//!
//! ## Overview
//!
//! A [`Menu`] owns the interaction primitives a menu is built from as
//! private fields (a roving tab stop scoped to its enabled items, a
//! type-ahead matcher fed every printable keydown while open, and a
//! dismissal layer scoped to the open content with the trigger excluded
//! from outside detection) and coordinates them into one widget:
//!
//! - `closed → open` on trigger activation: click, Enter/Space, or
//!   ArrowDown/ArrowUp (which pre-seed the roving position to the first or
//!   last enabled item respectively).
//! - `open → closed` on explicit [`Menu::close`], escape, outside pointer
//!   press, or item selection. Selecting always closes the whole tree and
//!   returns focus to the trigger.
//! - While open, exactly one item carries the roving tab stop at all times;
//!   disabled items are skipped by both roving focus and type-ahead.
//!
//! Submenus are registered up front ([`Menu::with_submenu`]); ArrowRight on
//! a registered parent descends, ArrowLeft ascends, and navigation always
//! operates on the deepest open level.
//!
//! Operations return [`MenuEvent`] lists describing what the host must do
//! (focus an item, return focus to the trigger, act on a selection). The
//! machine renders nothing and owns no nodes.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::ids::SequentialIds;
//! use trellis_core::key::Key;
//! use trellis_menu::{Menu, MenuEvent, MenuItem};
//!
//! let mut menu = Menu::new(
//!     0_u32, // the trigger's node id, excluded from outside detection
//!     vec![
//!         MenuItem::new(1_u32, "Save"),
//!         MenuItem::new(2_u32, "Settings").disabled(),
//!         MenuItem::new(3_u32, "Share"),
//!     ],
//!     &mut SequentialIds,
//! );
//!
//! // ArrowDown on the trigger opens and seeds the first enabled item.
//! let events = menu.on_trigger_key(Key::ArrowDown);
//! assert_eq!(events, [MenuEvent::Opened, MenuEvent::FocusItem(1)]);
//!
//! // The disabled item is skipped.
//! let events = menu.on_key_down(Key::ArrowDown, 0);
//! assert_eq!(events, [MenuEvent::FocusItem(3)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Display;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Rect, Size};

use trellis_anchor::{AnchorConfig, Placement, compute_in};
use trellis_core::attrs::{Attr, PropBundle};
use trellis_core::ids::{IdGenerator, WidgetIds};
use trellis_core::key::Key;
use trellis_interaction_state::dismissal::{DismissLayer, DismissTriggers};
use trellis_interaction_state::roving::{RovingEntry, RovingFocus, WrapMode};
use trellis_interaction_state::typeahead::Typeahead;

/// One menu item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<K> {
    /// Host-side node id of the item.
    pub id: K,
    /// Text shown for the item; also the type-ahead matching key.
    pub label: String,
    /// Disabled items are skipped by roving focus and type-ahead and cannot
    /// be selected.
    pub disabled: bool,
}

impl<K> MenuItem<K> {
    /// Create an enabled item.
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark this item as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// What the host must do after an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent<K> {
    /// The menu opened.
    Opened,
    /// The menu closed.
    Closed,
    /// Move real focus to this item.
    FocusItem(K),
    /// Return real focus to the trigger.
    FocusTrigger,
    /// The user chose this item.
    Select(K),
    /// A submenu under this parent item opened.
    SubmenuOpened(K),
    /// The submenu under this parent item closed.
    SubmenuClosed(K),
}

/// Attribute bundle for the trigger element.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuTriggerProps {
    /// Stable derived element id.
    pub id: String,
    /// `"menu"`.
    pub aria_haspopup: &'static str,
    /// Whether the menu is open.
    pub aria_expanded: bool,
    /// The content element's id.
    pub aria_controls: String,
}

impl PropBundle for MenuTriggerProps {
    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::new("id", self.id.clone()),
            Attr::new("aria-haspopup", self.aria_haspopup),
            Attr::new("aria-expanded", self.aria_expanded),
            Attr::new("aria-controls", self.aria_controls.clone()),
        ]
    }
}

/// Attribute bundle for the content element.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuContentProps {
    /// `"menu"`.
    pub role: &'static str,
    /// Stable derived element id.
    pub id: String,
    /// The trigger element's id.
    pub aria_labelledby: String,
}

impl PropBundle for MenuContentProps {
    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("aria-labelledby", self.aria_labelledby.clone()),
        ]
    }
}

/// Attribute bundle for one item element.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItemProps {
    /// `"menuitem"`.
    pub role: &'static str,
    /// Stable id derived from the item's id.
    pub id: String,
    /// Roving tab stop: `0` on exactly one item while open, `-1` elsewhere.
    pub tab_index: i32,
    /// Present when the item is disabled.
    pub aria_disabled: bool,
    /// Present (as `"menu"`) on submenu parents.
    pub aria_haspopup: Option<&'static str>,
    /// Present on submenu parents: whether their submenu is open.
    pub aria_expanded: Option<bool>,
}

impl PropBundle for MenuItemProps {
    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("tabindex", i64::from(self.tab_index)),
        ];
        if self.aria_disabled {
            attrs.push(Attr::new("aria-disabled", true));
        }
        if let Some(haspopup) = self.aria_haspopup {
            attrs.push(Attr::new("aria-haspopup", haspopup));
        }
        if let Some(expanded) = self.aria_expanded {
            attrs.push(Attr::new("aria-expanded", expanded));
        }
        attrs
    }
}

enum Seed {
    None,
    First,
    Last,
}

/// The menu state machine.
#[derive(Clone, Debug)]
pub struct Menu<K> {
    ids: WidgetIds,
    anchor: AnchorConfig,
    items: Vec<MenuItem<K>>,
    submenus: HashMap<K, Vec<MenuItem<K>>>,
    /// Parent-item chain of the open submenu levels, outermost first.
    submenu_path: Vec<K>,
    open: bool,
    roving: RovingFocus<K>,
    typeahead: Typeahead,
    dismissal: DismissLayer<K>,
    disabled: bool,
    destroyed: bool,
}

impl<K: Copy + Eq + Hash + Display> Menu<K> {
    /// Create a closed menu. `trigger` is the host node id of the trigger
    /// element; it is excluded from outside-press detection so pressing it
    /// toggles instead of dismiss-then-reopen.
    pub fn new(trigger: K, items: Vec<MenuItem<K>>, ids: &mut impl IdGenerator) -> Self {
        let mut dismissal = DismissLayer::new(DismissTriggers::all());
        dismissal.exclude(trigger);
        Self {
            ids: WidgetIds::new(ids),
            anchor: AnchorConfig::default(),
            items,
            submenus: HashMap::new(),
            submenu_path: Vec::new(),
            open: false,
            roving: RovingFocus::new(WrapMode::Wrap),
            typeahead: Typeahead::new(),
            dismissal,
            disabled: false,
            destroyed: false,
        }
    }

    /// Register a submenu under the item `parent`.
    pub fn with_submenu(mut self, parent: K, items: Vec<MenuItem<K>>) -> Self {
        self.submenus.insert(parent, items);
        self
    }

    /// Replace the anchor configuration.
    pub fn with_anchor(mut self, anchor: AnchorConfig) -> Self {
        self.anchor = anchor;
        self
    }

    /// Disable the whole menu; every mutating operation becomes a no-op.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The item currently holding the roving tab stop.
    pub fn current_item(&self) -> Option<K> {
        self.roving.current()
    }

    /// The parent chain of open submenus, outermost first.
    pub fn open_submenus(&self) -> &[K] {
        &self.submenu_path
    }

    /// Open, seeding the tab stop on the first enabled item.
    pub fn open(&mut self) -> Vec<MenuEvent<K>> {
        self.open_with(Seed::First)
    }

    /// Close, returning focus to the trigger.
    pub fn close(&mut self) -> Vec<MenuEvent<K>> {
        self.close_with(true)
    }

    /// Trigger click: toggles between open and closed.
    pub fn on_trigger_click(&mut self) -> Vec<MenuEvent<K>> {
        if !self.ready() {
            return Vec::new();
        }
        if self.open {
            // Focus is already on the trigger the user just clicked.
            self.close_with(false)
        } else {
            self.open_with(Seed::None)
        }
    }

    /// Keydown on the trigger while closed. Enter/Space/ArrowDown open and
    /// seed the first enabled item; ArrowUp opens and seeds the last.
    pub fn on_trigger_key(&mut self, key: Key) -> Vec<MenuEvent<K>> {
        if !self.ready() || self.open {
            return Vec::new();
        }
        match key {
            Key::Enter | Key::Space | Key::ArrowDown => self.open_with(Seed::First),
            Key::ArrowUp => self.open_with(Seed::Last),
            _ => Vec::new(),
        }
    }

    /// Keydown while open.
    pub fn on_key_down(&mut self, key: Key, now: u64) -> Vec<MenuEvent<K>> {
        if !self.ready() || !self.open {
            return Vec::new();
        }
        match key {
            Key::ArrowDown => {
                let entries = self.active_entries();
                let target = self.roving.move_next(&entries);
                self.focus_events(target)
            }
            Key::ArrowUp => {
                let entries = self.active_entries();
                let target = self.roving.move_prev(&entries);
                self.focus_events(target)
            }
            Key::Home => {
                let entries = self.active_entries();
                let target = self.roving.move_first(&entries);
                self.focus_events(target)
            }
            Key::End => {
                let entries = self.active_entries();
                let target = self.roving.move_last(&entries);
                self.focus_events(target)
            }
            Key::ArrowRight => self.enter_submenu(),
            Key::ArrowLeft => self.exit_submenu(),
            Key::Enter => self.activate_current(),
            Key::Space => {
                // Space continues a pending type-ahead search; otherwise it
                // activates like Enter.
                if self.typeahead.is_pending(now) {
                    self.on_typed(' ', now)
                } else {
                    self.activate_current()
                }
            }
            Key::Escape => {
                if self.dismissal.on_escape().is_some() {
                    self.close_with(true)
                } else {
                    Vec::new()
                }
            }
            Key::Char(c) => self.on_typed(c, now),
            _ => Vec::new(),
        }
    }

    /// Click on item `id`. Opens its submenu when it has one, selects it
    /// otherwise.
    pub fn on_item_click(&mut self, id: K) -> Vec<MenuEvent<K>> {
        if !self.ready() || !self.open {
            return Vec::new();
        }
        self.activate(id)
    }

    /// Real focus landed on item `id` (pointer hover, programmatic focus).
    /// Re-synchronizes the roving position without a directional key.
    pub fn on_item_focus(&mut self, id: K) {
        if self.ready()
            && self.open
            && self
                .active_items()
                .iter()
                .any(|i| i.id == id && !i.disabled)
        {
            self.roving.sync(id);
        }
    }

    /// A pointer press landed on `target`; `inside` is the host's hit-test
    /// verdict for the open content region. An outside press closes without
    /// moving focus.
    pub fn on_pointer_down(&mut self, target: K, inside: bool) -> Vec<MenuEvent<K>> {
        if self.destroyed {
            return Vec::new();
        }
        if self.dismissal.on_pointer_down(target, inside).is_some() {
            self.close_with(false)
        } else {
            Vec::new()
        }
    }

    /// Position the open content relative to `trigger` within `bounds`.
    pub fn position(&self, trigger: Rect, content: Size, bounds: Rect) -> Placement {
        compute_in(trigger, content, &self.anchor, bounds)
    }

    /// Attribute bundle for the trigger element.
    pub fn trigger_props(&self) -> MenuTriggerProps {
        MenuTriggerProps {
            id: self.ids.trigger(),
            aria_haspopup: "menu",
            aria_expanded: self.open,
            aria_controls: self.ids.content(),
        }
    }

    /// Attribute bundle for the content element.
    pub fn content_props(&self) -> MenuContentProps {
        MenuContentProps {
            role: "menu",
            id: self.ids.content(),
            aria_labelledby: self.ids.trigger(),
        }
    }

    /// Attribute bundle for item `id`, or `None` for an unknown id.
    pub fn item_props(&self, id: K) -> Option<MenuItemProps> {
        let item = self.find_item(id)?;
        let in_active_level = self.active_items().iter().any(|i| i.id == id);
        let tab_index = if self.open && in_active_level {
            let entries = self.active_entries();
            self.roving.tab_index(id, &entries)
        } else {
            -1
        };
        let has_submenu = self.submenus.contains_key(&id);
        Some(MenuItemProps {
            role: "menuitem",
            id: self.ids.item(&id.to_string()),
            tab_index,
            aria_disabled: item.disabled,
            aria_haspopup: has_submenu.then_some("menu"),
            aria_expanded: has_submenu.then(|| self.submenu_path.contains(&id)),
        })
    }

    /// Tear the menu down. Idempotent; all later operations are no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.open = false;
        self.submenu_path.clear();
        self.roving.clear();
        self.typeahead.reset();
        self.dismissal.deactivate();
    }

    fn ready(&self) -> bool {
        !self.destroyed && !self.disabled
    }

    /// The items of the deepest open level.
    fn active_items(&self) -> &[MenuItem<K>] {
        match self.submenu_path.last() {
            Some(parent) => self
                .submenus
                .get(parent)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => &self.items,
        }
    }

    fn active_entries(&self) -> Vec<RovingEntry<K>> {
        self.active_items()
            .iter()
            .map(|i| RovingEntry {
                id: i.id,
                disabled: i.disabled,
            })
            .collect()
    }

    fn find_item(&self, id: K) -> Option<&MenuItem<K>> {
        self.items
            .iter()
            .chain(self.submenus.values().flatten())
            .find(|i| i.id == id)
    }

    fn open_with(&mut self, seed: Seed) -> Vec<MenuEvent<K>> {
        if !self.ready() || self.open {
            return Vec::new();
        }
        self.open = true;
        self.dismissal.activate();
        let entries = self.active_entries();
        let target = match seed {
            Seed::First => self.roving.move_first(&entries),
            Seed::Last => self.roving.move_last(&entries),
            Seed::None => None,
        };
        let mut events = vec![MenuEvent::Opened];
        events.extend(target.map(MenuEvent::FocusItem));
        events
    }

    fn close_with(&mut self, restore_focus: bool) -> Vec<MenuEvent<K>> {
        if self.destroyed || !self.open {
            return Vec::new();
        }
        self.open = false;
        self.submenu_path.clear();
        self.roving.clear();
        self.typeahead.reset();
        self.dismissal.deactivate();
        let mut events = vec![MenuEvent::Closed];
        if restore_focus {
            events.push(MenuEvent::FocusTrigger);
        }
        events
    }

    fn focus_events(&self, target: Option<K>) -> Vec<MenuEvent<K>> {
        target.map(MenuEvent::FocusItem).into_iter().collect()
    }

    fn activate_current(&mut self) -> Vec<MenuEvent<K>> {
        match self.roving.current() {
            Some(current) => self.activate(current),
            None => Vec::new(),
        }
    }

    /// Select `id`, or descend into its submenu when it has one.
    fn activate(&mut self, id: K) -> Vec<MenuEvent<K>> {
        let enabled = self
            .active_items()
            .iter()
            .any(|i| i.id == id && !i.disabled);
        if !enabled {
            return Vec::new();
        }
        if self.submenus.contains_key(&id) {
            self.roving.sync(id);
            return self.enter_submenu();
        }
        let mut events = vec![MenuEvent::Select(id)];
        events.extend(self.close_with(true));
        events
    }

    /// Descend into the current item's submenu, seeding its first enabled
    /// item.
    fn enter_submenu(&mut self) -> Vec<MenuEvent<K>> {
        let Some(current) = self.roving.current() else {
            return Vec::new();
        };
        let openable = self
            .active_items()
            .iter()
            .any(|i| i.id == current && !i.disabled)
            && self.submenus.contains_key(&current);
        if !openable {
            return Vec::new();
        }
        self.submenu_path.push(current);
        self.roving.clear();
        let entries = self.active_entries();
        let target = self.roving.move_first(&entries);
        let mut events = vec![MenuEvent::SubmenuOpened(current)];
        events.extend(target.map(MenuEvent::FocusItem));
        events
    }

    /// Ascend one submenu level, returning the stop to the parent item.
    fn exit_submenu(&mut self) -> Vec<MenuEvent<K>> {
        let Some(parent) = self.submenu_path.pop() else {
            return Vec::new();
        };
        self.roving.sync(parent);
        vec![MenuEvent::SubmenuClosed(parent), MenuEvent::FocusItem(parent)]
    }

    fn on_typed(&mut self, c: char, now: u64) -> Vec<MenuEvent<K>> {
        self.typeahead.on_char(c, now);
        let target = {
            let enabled: Vec<(K, &str)> = self
                .active_items()
                .iter()
                .filter(|i| !i.disabled)
                .map(|i| (i.id, i.label.as_str()))
                .collect();
            let labels: Vec<&str> = enabled.iter().map(|(_, label)| *label).collect();
            let current = self
                .roving
                .current()
                .and_then(|c| enabled.iter().position(|(id, _)| *id == c));
            self.typeahead
                .find_match(&labels, current)
                .map(|i| enabled[i].0)
        };
        match target {
            Some(id) => {
                self.roving.sync(id);
                vec![MenuEvent::FocusItem(id)]
            }
            None => Vec::new(),
        }
    }
}
