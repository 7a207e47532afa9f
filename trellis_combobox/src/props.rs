// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARIA attribute bundles for the combobox's rendered parts.
//!
//! These bundles are the entire contract the rendering shell may rely on;
//! the shell re-applies them after every mutation and must not invent
//! additional ARIA state.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use trellis_core::attrs::{Attr, PropBundle};

/// Attributes for the text input element.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboboxInputProps {
    /// `"combobox"`.
    pub role: &'static str,
    /// Stable derived element id.
    pub id: String,
    /// Whether the listbox is open.
    pub aria_expanded: bool,
    /// `"listbox"`.
    pub aria_haspopup: &'static str,
    /// The listbox element's id.
    pub aria_controls: String,
    /// The highlighted option's id, when something is highlighted.
    pub aria_activedescendant: Option<String>,
    /// `"list"`.
    pub aria_autocomplete: &'static str,
    /// Present while a load is in flight.
    pub aria_busy: bool,
    /// Present when the combobox is disabled.
    pub aria_disabled: bool,
}

impl PropBundle for ComboboxInputProps {
    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("aria-expanded", self.aria_expanded),
            Attr::new("aria-haspopup", self.aria_haspopup),
            Attr::new("aria-controls", self.aria_controls.clone()),
            Attr::new("aria-autocomplete", self.aria_autocomplete),
        ];
        if let Some(descendant) = &self.aria_activedescendant {
            attrs.push(Attr::new("aria-activedescendant", descendant.clone()));
        }
        if self.aria_busy {
            attrs.push(Attr::new("aria-busy", true));
        }
        if self.aria_disabled {
            attrs.push(Attr::new("aria-disabled", true));
        }
        attrs
    }
}

/// Attributes for the listbox element.
#[derive(Clone, Debug, PartialEq)]
pub struct ListboxProps {
    /// `"listbox"`.
    pub role: &'static str,
    /// Stable derived element id, referenced by `aria-controls`.
    pub id: String,
}

impl PropBundle for ListboxProps {
    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
        ]
    }
}

/// Attributes for one option element.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboboxOptionProps {
    /// `"option"`.
    pub role: &'static str,
    /// Stable id derived from the option's value, referenced by
    /// `aria-activedescendant`.
    pub id: String,
    /// Whether the option is currently selected.
    pub aria_selected: bool,
    /// Present when the option is disabled.
    pub aria_disabled: bool,
}

impl PropBundle for ComboboxOptionProps {
    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("aria-selected", self.aria_selected),
        ];
        if self.aria_disabled {
            attrs.push(Attr::new("aria-disabled", true));
        }
        attrs
    }
}

/// Attributes for one removable tag (multi-select mode).
#[derive(Clone, Debug, PartialEq)]
pub struct TagProps {
    /// `"listitem"`.
    pub role: &'static str,
    /// Stable id derived from the tagged value.
    pub id: String,
    /// The tag's accessible name (its option label).
    pub aria_label: String,
}

impl PropBundle for TagProps {
    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("aria-label", self.aria_label.clone()),
        ]
    }
}
