// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget identity: one stable base id per behavior instance, with child ids
//! derived deterministically from it.
//!
//! ARIA relationship attributes (`aria-controls`, `aria-activedescendant`,
//! `aria-labelledby`, …) only work when the referenced ids survive re-renders.
//! [`WidgetIds`] therefore generates its base id exactly once, at behavior
//! construction, and derives every child id as a pure function of the base
//! plus a sanitized key, with no lookup table and no per-render state.
//!
//! Generation is injectable: the default [`SequentialIds`] source draws from
//! a process-wide counter, and tests can substitute any [`IdGenerator`] for
//! deterministic output.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::ids::{IdGenerator, SequentialIds, WidgetIds};
//!
//! let ids = WidgetIds::new(&mut SequentialIds);
//! let listbox = ids.listbox();
//! assert!(listbox.starts_with(ids.base()));
//!
//! // Item ids are stable across calls: derived, never stored.
//! assert_eq!(ids.item("apple"), ids.item("apple"));
//! ```

use alloc::format;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, Ordering};

/// Source of unique base ids.
///
/// Implementations may be monotonic, random, or fixed; the only requirement
/// is that two live behavior instances never share a base id. Swap in a
/// deterministic implementation for snapshot tests.
pub trait IdGenerator {
    /// Produce the next unique id.
    fn next_id(&mut self) -> String;
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Default id source: a process-wide monotonic counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialIds;

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        format!("trellis-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An id source that always returns the same base, for deterministic tests.
#[derive(Clone, Debug)]
pub struct FixedId(pub String);

impl IdGenerator for FixedId {
    fn next_id(&mut self) -> String {
        self.0.clone()
    }
}

/// The identity pair of one behavior instance.
///
/// Owns the base id for the instance's entire lifetime and derives child ids
/// from it. Derivation is deterministic, so two calls with the same key
/// always produce the same id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetIds {
    base: String,
}

impl WidgetIds {
    /// Generate a fresh identity from `generator`.
    pub fn new(generator: &mut impl IdGenerator) -> Self {
        Self {
            base: generator.next_id(),
        }
    }

    /// Wrap an explicit base id (e.g. one supplied by the host).
    pub fn from_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// The base id.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Id of the trigger element.
    pub fn trigger(&self) -> String {
        format!("{}-trigger", self.base)
    }

    /// Id of the floating/content element.
    pub fn content(&self) -> String {
        format!("{}-content", self.base)
    }

    /// Id of the text input element.
    pub fn input(&self) -> String {
        format!("{}-input", self.base)
    }

    /// Id of the listbox element.
    pub fn listbox(&self) -> String {
        format!("{}-listbox", self.base)
    }

    /// Id of the title element (dialog).
    pub fn title(&self) -> String {
        format!("{}-title", self.base)
    }

    /// Id of the description element (dialog).
    pub fn description(&self) -> String {
        format!("{}-description", self.base)
    }

    /// Id of the item identified by `key` (an option value's rendered form).
    ///
    /// The key is sanitized so the result is a single well-formed token
    /// regardless of what the value's `Display` output contains.
    pub fn item(&self, key: &str) -> String {
        format!("{}-item-{}", self.base, sanitize(key))
    }

    /// Id of the removable tag for `key` (multi-select combobox).
    pub fn tag(&self, key: &str) -> String {
        format!("{}-tag-{}", self.base, sanitize(key))
    }

    /// Id of the thumb named `key` (slider).
    pub fn thumb(&self, key: &str) -> String {
        format!("{}-thumb-{}", self.base, sanitize(key))
    }
}

/// Replace anything outside `[A-Za-z0-9_-]` with `-` so derived ids are
/// usable as element ids and attribute references.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn sequential_ids_are_unique() {
        let a = SequentialIds.next_id();
        let b = SequentialIds.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn derived_ids_share_the_base() {
        let ids = WidgetIds::from_base("w1");
        assert_eq!(ids.base(), "w1");
        assert_eq!(ids.trigger(), "w1-trigger");
        assert_eq!(ids.listbox(), "w1-listbox");
        assert_eq!(ids.item("apple"), "w1-item-apple");
    }

    #[test]
    fn item_ids_are_deterministic() {
        let ids = WidgetIds::from_base("w2");
        assert_eq!(ids.item("apple"), ids.item("apple"));
        assert_ne!(ids.item("apple"), ids.item("banana"));
    }

    #[test]
    fn keys_are_sanitized() {
        let ids = WidgetIds::from_base("w3");
        assert_eq!(ids.item("a b/c"), "w3-item-a-b-c");
    }

    #[test]
    fn fixed_generator_is_deterministic() {
        let mut fixed = FixedId("base".to_string());
        let ids = WidgetIds::new(&mut fixed);
        assert_eq!(ids.base(), "base");
    }
}
