// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-ahead matching.
//!
//! Printable keystrokes within an idle window accumulate into a search
//! buffer; the buffer resolves case-insensitively, by prefix, against the
//! labels the caller passes in. Matching always re-evaluates from the start
//! of the buffer, not from the current position in the collection, with
//! one deliberate twist: a buffer consisting of one repeated character
//! ("s", "ss", "sss") is treated as that single character and the match
//! starts *after* the current item, so repeated presses of the same letter
//! cycle through the items sharing that initial.
//!
//! The caller decides which labels participate (it passes only enabled
//! candidates) and what to do with the returned index.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_interaction_state::typeahead::Typeahead;
//!
//! let labels = ["Save", "Settings", "Share"];
//! let mut typeahead = Typeahead::new();
//!
//! typeahead.on_char('s', 0);
//! typeahead.on_char('h', 200);
//! assert_eq!(typeahead.find_match(&labels, None), Some(2)); // "Share"
//! ```

use alloc::string::String;
use smallvec::SmallVec;
use trellis_core::timing::Deadline;

/// Default idle window after which the buffer resets, in milliseconds.
pub const DEFAULT_IDLE_MS: u64 = 1_000;

/// The type-ahead buffer state machine.
#[derive(Clone, Debug)]
pub struct Typeahead {
    buffer: SmallVec<[char; 8]>,
    idle: Deadline,
    idle_ms: u64,
}

impl Typeahead {
    /// Create a matcher with the default idle window.
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_MS)
    }

    /// Create a matcher with a custom idle window.
    pub fn with_idle_timeout(idle_ms: u64) -> Self {
        Self {
            buffer: SmallVec::new(),
            idle: Deadline::idle(),
            idle_ms,
        }
    }

    /// Append a typed character at time `now`.
    ///
    /// If the idle window elapsed since the previous keystroke the buffer is
    /// restarted first. Characters are stored lowercased.
    pub fn on_char(&mut self, c: char, now: u64) {
        if self.idle.is_due(now) {
            self.buffer.clear();
        }
        self.idle.schedule(now, self.idle_ms);
        self.buffer.extend(c.to_lowercase());
    }

    /// The pending search buffer.
    pub fn buffer(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Whether a search is pending (non-empty buffer within the idle window).
    pub fn is_pending(&self, now: u64) -> bool {
        !self.buffer.is_empty() && !self.idle.is_due(now)
    }

    /// Clear the buffer if the idle window has elapsed. Returns `true` when
    /// a stale buffer was dropped.
    pub fn poll(&mut self, now: u64) -> bool {
        if !self.buffer.is_empty() && self.idle.fire(now) {
            self.buffer.clear();
            return true;
        }
        false
    }

    /// Drop the buffer and any pending idle moment.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.idle.clear();
    }

    /// Resolve the buffer against `labels`, given the currently-highlighted
    /// index.
    ///
    /// Returns the index of the best match, or `None` when nothing matches
    /// or the buffer is empty. Search begins at `current` and wraps; when
    /// the effective needle is a single character the current item itself is
    /// excluded so repeats cycle.
    pub fn find_match(&self, labels: &[&str], current: Option<usize>) -> Option<usize> {
        if self.buffer.is_empty() || labels.is_empty() {
            return None;
        }

        let needle: String = match self.repeated_char() {
            Some(c) => {
                let mut s = String::new();
                s.push(c);
                s
            }
            None => self.buffer.iter().collect(),
        };
        let single = needle.chars().count() == 1;
        let start = current.unwrap_or(0);
        let len = labels.len();

        for offset in 0..len {
            let i = (start + offset) % len;
            if single && Some(i) == current {
                continue;
            }
            if labels[i].to_lowercase().starts_with(needle.as_str()) {
                return Some(i);
            }
        }
        None
    }

    /// The single character this buffer repeats, if it does.
    fn repeated_char(&self) -> Option<char> {
        match self.buffer.split_first() {
            Some((first, rest)) if !rest.is_empty() && rest.iter().all(|c| c == first) => {
                Some(*first)
            }
            _ => None,
        }
    }
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new()
    }
}
