// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Combobox: an input-driven, filterable, optionally async-loaded
//! selection state machine.
//!
//! ## Overview
//!
//! A combobox couples a text input with a listbox of options. This crate
//! implements its full interaction semantics (filtering, debounced async
//! loading with last-keystroke-wins cancellation, single/multi selection,
//! highlight navigation, creatable entries, and the ARIA contract) as a
//! plain state machine. It renders nothing and performs no I/O.
//!
//! ## The load boundary
//!
//! An async-sourced combobox never fetches. Input changes arm a debounce
//! deadline; once the quiet period elapses, [`Combobox::poll`] hands the
//! host a [`LoadRequest`] carrying the query and a fresh epoch. The host
//! performs the fetch however it likes and reports back through
//! [`Combobox::resolve_load`]. Only the newest epoch may mutate state:
//! results and failures from superseded requests are discarded without a
//! trace, which is the machine's entire defense against out-of-order
//! completions, and a sufficient one.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::ids::SequentialIds;
//! use trellis_core::option::OptionItem;
//! use trellis_combobox::{Combobox, ComboboxConfig};
//!
//! let mut combobox = Combobox::new(
//!     ComboboxConfig::with_static(vec![
//!         OptionItem::new("apple", "Apple"),
//!         OptionItem::new("banana", "Banana"),
//!         OptionItem::new("cherry", "Cherry"),
//!     ]),
//!     &mut SequentialIds,
//! );
//!
//! combobox.open();
//! combobox.set_input_value("APP", 0);
//! assert_eq!(combobox.state().filtered_options.len(), 1);
//! assert_eq!(combobox.state().highlighted_value, Some("apple"));
//!
//! combobox.select("apple");
//! assert!(!combobox.state().open); // single mode auto-closes
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod combobox;
mod props;
mod types;

pub use combobox::Combobox;
pub use props::{ComboboxInputProps, ComboboxOptionProps, ListboxProps, TagProps};
pub use types::{
    ComboboxConfig, ComboboxState, ItemSource, LoadError, LoadRequest, SelectedValue,
    SelectionMode, DEFAULT_DEBOUNCE_MS, DEFAULT_VIRTUALIZE_THRESHOLD,
};
