// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving tab stop over an ordered collection.
//!
//! In a composite widget (menu, toolbar, listbox) only one member is
//! keyboard-focusable at a time; arrow keys move that single tab stop.
//! [`RovingFocus`] tracks which member currently holds the stop and computes
//! the next holder for directional and Home/End input, skipping disabled
//! entries and wrapping or clamping at the edges per [`WrapMode`].
//!
//! The collection itself is a snapshot slice owned by the caller: entries
//! can change between calls (filtering, async loads) and the machine
//! re-resolves its position against whatever it is handed.
//!
//! A pointer click or programmatic focus change can land focus on an item
//! without any directional key; [`RovingFocus::sync`] re-synchronizes the
//! stop from such an external focus event.

/// One focusable candidate in the collection snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RovingEntry<K> {
    /// Identifier for this entry.
    pub id: K,
    /// Disabled entries are skipped by traversal and never hold the stop.
    pub disabled: bool,
}

impl<K> RovingEntry<K> {
    /// Create an enabled entry.
    pub fn new(id: K) -> Self {
        Self {
            id,
            disabled: false,
        }
    }

    /// Mark this entry as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Edge behavior for directional traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Moving past the last enabled entry wraps to the first (and vice versa).
    Wrap,
    /// Moving past the edge leaves the stop where it is.
    Clamp,
}

/// The roving tab stop state machine.
///
/// Movement operations return `Some(id)` when the stop moved to a new entry
/// (the host should focus that node) and `None` when nothing changed.
#[derive(Clone, Debug)]
pub struct RovingFocus<K> {
    current: Option<K>,
    wrap: WrapMode,
}

impl<K: Copy + Eq> RovingFocus<K> {
    /// Create a navigator with the given edge behavior and no position yet.
    pub fn new(wrap: WrapMode) -> Self {
        Self {
            current: None,
            wrap,
        }
    }

    /// The entry currently holding the stop, if any has been established.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Re-synchronize from an external focus event (pointer click, programmatic
    /// focus). No directional key is required.
    pub fn sync(&mut self, id: K) {
        self.current = Some(id);
    }

    /// Forget the current position (e.g. when the widget closes).
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The `tabindex` value entry `id` should render with.
    ///
    /// Exactly one enabled entry reports `0`: the current holder, or the
    /// first enabled entry while no position has been established yet.
    pub fn tab_index(&self, id: K, entries: &[RovingEntry<K>]) -> i32 {
        if self.effective_current(entries) == Some(id) {
            0
        } else {
            -1
        }
    }

    /// Move the stop to the first enabled entry.
    pub fn move_first(&mut self, entries: &[RovingEntry<K>]) -> Option<K> {
        self.adopt(entries.iter().find(|e| !e.disabled).map(|e| e.id))
    }

    /// Move the stop to the last enabled entry.
    pub fn move_last(&mut self, entries: &[RovingEntry<K>]) -> Option<K> {
        self.adopt(entries.iter().rev().find(|e| !e.disabled).map(|e| e.id))
    }

    /// Move the stop forward to the next enabled entry.
    ///
    /// Without an established position this is the same as
    /// [`RovingFocus::move_first`]. At the trailing edge the stop wraps or
    /// stays put per the configured [`WrapMode`].
    pub fn move_next(&mut self, entries: &[RovingEntry<K>]) -> Option<K> {
        self.step(entries, Direction::Forward)
    }

    /// Move the stop backward to the previous enabled entry. Mirror image of
    /// [`RovingFocus::move_next`].
    pub fn move_prev(&mut self, entries: &[RovingEntry<K>]) -> Option<K> {
        self.step(entries, Direction::Backward)
    }

    /// The entry that effectively holds the stop against this snapshot: the
    /// tracked entry when it is still an enabled member, otherwise the first
    /// enabled entry.
    fn effective_current(&self, entries: &[RovingEntry<K>]) -> Option<K> {
        self.current
            .filter(|c| entries.iter().any(|e| e.id == *c && !e.disabled))
            .or_else(|| entries.iter().find(|e| !e.disabled).map(|e| e.id))
    }

    fn step(&mut self, entries: &[RovingEntry<K>], direction: Direction) -> Option<K> {
        let current = match self.current {
            Some(c) => c,
            None => return self.move_first(entries),
        };
        let pos = match entries.iter().position(|e| e.id == current) {
            Some(p) => p,
            // The tracked entry vanished from the snapshot; start over.
            None => return self.move_first(entries),
        };

        let len = entries.len();
        for offset in 1..=len {
            let i = match (direction, self.wrap) {
                (Direction::Forward, WrapMode::Wrap) => (pos + offset) % len,
                (Direction::Forward, WrapMode::Clamp) => {
                    let i = pos + offset;
                    if i >= len {
                        return None;
                    }
                    i
                }
                (Direction::Backward, WrapMode::Wrap) => (pos + len - (offset % len)) % len,
                (Direction::Backward, WrapMode::Clamp) => {
                    if offset > pos {
                        return None;
                    }
                    pos - offset
                }
            };
            if i == pos {
                return None;
            }
            if !entries[i].disabled {
                return self.adopt(Some(entries[i].id));
            }
        }
        None
    }

    fn adopt(&mut self, id: Option<K>) -> Option<K> {
        if let Some(id) = id {
            if self.current == Some(id) {
                return None;
            }
            self.current = Some(id);
            Some(id)
        } else {
            None
        }
    }
}

#[derive(Copy, Clone)]
enum Direction {
    Forward,
    Backward,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four() -> [RovingEntry<u32>; 4] {
        [
            RovingEntry::new(1),
            RovingEntry::new(2),
            RovingEntry::new(3),
            RovingEntry::new(4),
        ]
    }

    #[test]
    fn wraps_from_last_to_first() {
        let entries = four();
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        roving.sync(4);
        assert_eq!(roving.move_next(&entries), Some(1));
        assert_eq!(roving.current(), Some(1));
    }

    #[test]
    fn clamp_stays_on_last() {
        let entries = four();
        let mut roving = RovingFocus::new(WrapMode::Clamp);
        roving.sync(4);
        assert_eq!(roving.move_next(&entries), None);
        assert_eq!(roving.current(), Some(4));
    }

    #[test]
    fn first_move_without_position_lands_on_first_enabled() {
        let entries = [
            RovingEntry::new(1_u32).disabled(),
            RovingEntry::new(2),
            RovingEntry::new(3),
        ];
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        assert_eq!(roving.move_next(&entries), Some(2));
    }

    #[test]
    fn disabled_entries_are_skipped_in_both_directions() {
        let entries = [
            RovingEntry::new(1_u32),
            RovingEntry::new(2).disabled(),
            RovingEntry::new(3),
        ];
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        roving.sync(1);
        assert_eq!(roving.move_next(&entries), Some(3));
        assert_eq!(roving.move_prev(&entries), Some(1));
    }

    #[test]
    fn backward_wrap_reaches_last() {
        let entries = four();
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        roving.sync(1);
        assert_eq!(roving.move_prev(&entries), Some(4));
    }

    #[test]
    fn backward_clamp_stays_on_first() {
        let entries = four();
        let mut roving = RovingFocus::new(WrapMode::Clamp);
        roving.sync(1);
        assert_eq!(roving.move_prev(&entries), None);
        assert_eq!(roving.current(), Some(1));
    }

    #[test]
    fn home_and_end_moves() {
        let entries = four();
        let mut roving = RovingFocus::new(WrapMode::Clamp);
        roving.sync(2);
        assert_eq!(roving.move_last(&entries), Some(4));
        assert_eq!(roving.move_first(&entries), Some(1));
    }

    #[test]
    fn exactly_one_entry_carries_tab_stop() {
        let entries = four();
        let roving: RovingFocus<u32> = RovingFocus::new(WrapMode::Wrap);
        // Before any movement the first enabled entry is the stop.
        let stops: alloc::vec::Vec<u32> = entries
            .iter()
            .filter(|e| roving.tab_index(e.id, &entries) == 0)
            .map(|e| e.id)
            .collect();
        assert_eq!(stops, [1]);
    }

    #[test]
    fn tab_stop_follows_sync() {
        let entries = four();
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        roving.sync(3);
        assert_eq!(roving.tab_index(3, &entries), 0);
        assert_eq!(roving.tab_index(1, &entries), -1);
    }

    #[test]
    fn vanished_entry_restarts_from_first() {
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        roving.sync(99);
        let entries = four();
        assert_eq!(roving.move_next(&entries), Some(1));
    }

    #[test]
    fn all_disabled_collection_moves_nowhere() {
        let entries = [RovingEntry::new(1_u32).disabled()];
        let mut roving = RovingFocus::new(WrapMode::Wrap);
        assert_eq!(roving.move_next(&entries), None);
        assert_eq!(roving.current(), None);
    }
}
