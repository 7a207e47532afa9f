// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Interaction State: reusable state machines for widget behaviors.
//!
//! This crate provides small, focused state machines for the interaction
//! patterns composite widgets are built from. Each module handles one
//! pattern:
//!
//! - [`roving`]: keep exactly one tab stop among the enabled members of an
//!   ordered collection and move it on directional/Home/End input.
//! - [`typeahead`]: accumulate recently-typed characters within an idle
//!   window and resolve them to the best-matching label.
//! - [`containment`]: constrain keyboard focus to a subtree while active and
//!   restore it on deactivation.
//! - [`dismissal`]: translate outside pointer presses and escape presses
//!   into at most one dismissal per physical interaction.
//! - [`presence`]: defer unmounting until an exit transition finishes,
//!   completing exactly once per latest hide.
//!
//! ## Design
//!
//! Each state machine is:
//!
//! - **Minimal and focused**: one interaction pattern per type.
//! - **Host-clocked**: no timers and no clock reads; time-dependent
//!   operations take an explicit `now` in milliseconds, and pending moments
//!   are [`trellis_core::timing::Deadline`] values the host polls.
//! - **Generic**: node identity is an application-chosen `K: Copy + Eq`.
//! - **Events out**: operations return typed results; nothing is thrown and
//!   no callbacks are stored.
//!
//! Higher-level behaviors (menu, dialog) own instances of these machines as
//! private fields and coordinate them; nothing here knows about any
//! particular widget.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_interaction_state::roving::{RovingEntry, RovingFocus, WrapMode};
//!
//! let entries = [
//!     RovingEntry::new(1_u32),
//!     RovingEntry::new(2_u32).disabled(),
//!     RovingEntry::new(3_u32),
//! ];
//!
//! let mut roving = RovingFocus::new(WrapMode::Wrap);
//! assert_eq!(roving.move_first(&entries), Some(1));
//! // The disabled entry is skipped.
//! assert_eq!(roving.move_next(&entries), Some(3));
//! // And the stop wraps back around.
//! assert_eq!(roving.move_next(&entries), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod containment;
pub mod dismissal;
pub mod presence;
pub mod roving;
pub mod typeahead;
