// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Core: shared vocabulary for render-agnostic widget behaviors.
//!
//! Trellis models widget interaction semantics (combobox, menu, dialog,
//! slider, and the primitives they compose) as plain state machines. The
//! behavior crates own no platform resources: hosts forward raw input events
//! and millisecond timestamps in, and read state snapshots and typed
//! attribute bundles back out after every mutation. This crate holds the
//! small pieces all of them share:
//!
//! - [`option`]: immutable option collections ([`option::OptionItem`]) and
//!   enabled-aware navigation and filtering helpers over them.
//! - [`ids`]: the identity pair, a stable base id generated once per widget
//!   instance ([`ids::WidgetIds`]) plus deterministically derived child ids,
//!   so ARIA relationship attributes stay stable across re-renders without a
//!   lookup table. Id generation is injectable ([`ids::IdGenerator`]) for
//!   deterministic tests.
//! - [`key`]: the keyboard vocabulary behaviors interpret. Hosts forward
//!   keydowns verbatim; the behavior decides what a key means.
//! - [`attrs`]: dynamically-typed attribute values and the [`attrs::PropBundle`]
//!   trait, so shells can apply any typed `*Props` struct uniformly.
//! - [`timing`]: one-shot millisecond deadlines ([`timing::Deadline`]).
//!   Behaviors never read a clock; every time-dependent operation takes an
//!   explicit `now` timestamp supplied by the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::option::{self, OptionItem};
//!
//! let options = vec![
//!     OptionItem::new("apple", "Apple"),
//!     OptionItem::new("banana", "Banana"),
//!     OptionItem::new("cherry", "Cherry"),
//! ];
//!
//! // Case-insensitive substring filtering.
//! let filtered = option::filter_substring(&options, "APP");
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].label, "Apple");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod attrs;
pub mod ids;
pub mod key;
pub mod option;
pub mod timing;
