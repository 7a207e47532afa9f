// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The combobox state machine.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Display;

use trellis_core::ids::{IdGenerator, WidgetIds};
use trellis_core::key::Key;
use trellis_core::option::{self, OptionItem};
use trellis_core::timing::Deadline;

use crate::props::{ComboboxInputProps, ComboboxOptionProps, ListboxProps, TagProps};
use crate::types::{
    ComboboxConfig, ComboboxState, ItemSource, LoadError, LoadRequest, SelectedValue,
    SelectionMode,
};

/// Internal source discriminant; static items live in the state's option
/// list once construction moves them there.
#[derive(Clone, Debug)]
enum SourceKind {
    Static,
    Async { debounce_ms: u64 },
}

/// An input-driven, filterable, optionally async-loaded selection machine.
///
/// The combobox has input-focus semantics: focus stays in the text input
/// while arrow keys move a *highlight* through the filtered options, so it
/// deliberately re-implements its own minimal navigation instead of
/// borrowing the roving tab stop.
///
/// Hosts forward input events ([`Combobox::set_input_value`],
/// [`Combobox::on_key_down`]), drive pending work via [`Combobox::poll`],
/// and read [`Combobox::state`] plus the `*_props` bundles after every call.
#[derive(Clone, Debug)]
pub struct Combobox<T> {
    state: ComboboxState<T>,
    source: SourceKind,
    create_value: Option<fn(&str) -> T>,
    virtualize_threshold: usize,
    disabled: bool,
    ids: WidgetIds,
    debounce: Deadline,
    epoch: u64,
    destroyed: bool,
}

impl<T: Clone + PartialEq + Display> Combobox<T> {
    /// Build a combobox from its configuration.
    pub fn new(config: ComboboxConfig<T>, ids: &mut impl IdGenerator) -> Self {
        let (source, options) = match config.source {
            ItemSource::Static(items) => (SourceKind::Static, items),
            ItemSource::Async { debounce_ms } => (SourceKind::Async { debounce_ms }, Vec::new()),
        };
        let value = match config.mode {
            SelectionMode::Single => SelectedValue::Single(None),
            SelectionMode::Multiple => SelectedValue::Multiple(Vec::new()),
        };
        let virtualized = options.len() > config.virtualize_threshold;
        Self {
            state: ComboboxState {
                open: false,
                value,
                input_value: String::new(),
                highlighted_value: None,
                filtered_options: options.clone(),
                options,
                loading: false,
                error: None,
                virtualized,
            },
            source,
            create_value: config.create_value,
            virtualize_threshold: config.virtualize_threshold,
            disabled: config.disabled,
            ids: WidgetIds::new(ids),
            debounce: Deadline::idle(),
            epoch: 0,
            destroyed: false,
        }
    }

    /// Current state snapshot. Read after every mutating call.
    pub fn state(&self) -> &ComboboxState<T> {
        &self.state
    }

    /// Whether `epoch` still names the newest load request. Loaders can
    /// check this to stop early once superseded; even loaders that ignore
    /// it are harmless, because [`Combobox::resolve_load`] discards stale
    /// epochs.
    pub fn is_current_epoch(&self, epoch: u64) -> bool {
        !self.destroyed && epoch == self.epoch
    }

    /// Open the listbox. Highlights the selected option when it is visible
    /// and enabled, otherwise the first enabled option. No-op while open.
    pub fn open(&mut self) {
        if !self.ready() || self.state.open {
            return;
        }
        self.state.open = true;
        self.state.highlighted_value = match &self.state.value {
            SelectedValue::Single(Some(v)) => Some(v.clone()),
            _ => None,
        };
        self.revalidate_highlight();
    }

    /// Close the listbox and drop the highlight. No-op while closed.
    pub fn close(&mut self) {
        if self.destroyed || !self.state.open {
            return;
        }
        self.state.open = false;
        self.state.highlighted_value = None;
    }

    /// Replace the input text at time `now`.
    ///
    /// Static sources filter synchronously (case-insensitive substring) and
    /// re-highlight the first enabled match. Async sources (re-)schedule the
    /// debounce window; every keystroke replaces the pending moment, so a
    /// burst of keystrokes produces a single load for the final text.
    pub fn set_input_value(&mut self, text: impl Into<String>, now: u64) {
        if !self.ready() {
            return;
        }
        self.state.input_value = text.into();
        match &self.source {
            SourceKind::Static => {
                self.state.filtered_options =
                    option::filter_substring(&self.state.options, &self.state.input_value);
                self.update_virtualized();
                self.state.highlighted_value = None;
                self.revalidate_highlight();
            }
            SourceKind::Async { debounce_ms } => {
                let delay = *debounce_ms;
                self.debounce.schedule(now, delay);
            }
        }
    }

    /// Drive pending work at time `now`.
    ///
    /// When the debounce window has closed this starts a new load
    /// generation and returns the request the host must perform. Starting a
    /// new generation invalidates any in-flight request immediately.
    pub fn poll(&mut self, now: u64) -> Option<LoadRequest> {
        if self.destroyed || !self.debounce.fire(now) {
            return None;
        }
        self.epoch += 1;
        self.state.loading = true;
        self.state.error = None;
        Some(LoadRequest {
            query: self.state.input_value.clone(),
            epoch: self.epoch,
        })
    }

    /// Report a finished load for `epoch`.
    ///
    /// Results from superseded epochs are silently discarded, touching
    /// neither `options` nor `loading` nor `error`, which makes the last
    /// keystroke win regardless of completion order. A failure records the
    /// error; a cancelled request simply never resolves with a current
    /// epoch, so cancellation is not a user-visible failure.
    ///
    /// Returns whether the result was applied.
    pub fn resolve_load(
        &mut self,
        epoch: u64,
        result: Result<Vec<OptionItem<T>>, LoadError>,
    ) -> bool {
        if !self.is_current_epoch(epoch) {
            return false;
        }
        match result {
            Ok(options) => {
                self.state.filtered_options = options.clone();
                self.state.options = options;
                self.state.loading = false;
                self.state.error = None;
                self.update_virtualized();
                self.revalidate_highlight();
            }
            Err(error) => {
                self.state.loading = false;
                self.state.error = Some(error);
            }
        }
        true
    }

    /// Select `value`.
    ///
    /// Single mode replaces the scalar value, mirrors the option label into
    /// the input, and closes. Multi mode appends to the ordered set and
    /// stays open; re-selecting an already-selected value is a no-op, and
    /// [`Combobox::remove`] is the only path to deselect.
    pub fn select(&mut self, value: T) {
        if !self.ready() {
            return;
        }
        let Some(pos) = option::position_of(&self.state.options, &value) else {
            return;
        };
        if self.state.options[pos].disabled {
            return;
        }
        let label = self.state.options[pos].label.clone();
        match &mut self.state.value {
            SelectedValue::Single(slot) => {
                *slot = Some(value);
                self.state.input_value = label;
                self.reset_filter();
                self.close();
            }
            SelectedValue::Multiple(values) => {
                if values.contains(&value) {
                    return;
                }
                values.push(value);
                self.state.input_value.clear();
                self.reset_filter();
                self.revalidate_highlight();
            }
        }
    }

    /// Deselect `value` (multi mode). No-op in single mode and for values
    /// that are not selected.
    pub fn remove(&mut self, value: &T) {
        if !self.ready() {
            return;
        }
        if let SelectedValue::Multiple(values) = &mut self.state.value {
            values.retain(|v| v != value);
        }
    }

    /// Remove the most recently selected tag (multi mode).
    ///
    /// Gated internally on an empty input: while the input has text,
    /// backspace edits text and this is a no-op. Returns whether a tag was
    /// removed.
    pub fn remove_last_tag(&mut self) -> bool {
        if !self.ready() || !self.state.input_value.is_empty() {
            return false;
        }
        if let SelectedValue::Multiple(values) = &mut self.state.value {
            values.pop().is_some()
        } else {
            false
        }
    }

    /// Clear the selection and the input.
    pub fn clear(&mut self) {
        if !self.ready() {
            return;
        }
        match &mut self.state.value {
            SelectedValue::Single(slot) => *slot = None,
            SelectedValue::Multiple(values) => values.clear(),
        }
        self.state.input_value.clear();
        self.reset_filter();
        self.state.highlighted_value = None;
        if self.state.open {
            self.revalidate_highlight();
        }
    }

    /// Turn `text` into a new option and select it (creatable mode).
    ///
    /// When an existing option's label equals `text` case-insensitively,
    /// that option is selected instead of duplicating it. No-op without a
    /// configured value constructor or with empty text.
    pub fn create(&mut self, text: &str) {
        if !self.ready() || text.is_empty() {
            return;
        }
        let Some(create_value) = self.create_value else {
            return;
        };
        let lowered = text.to_lowercase();
        if let Some(existing) = self
            .state
            .options
            .iter()
            .find(|o| o.label.to_lowercase() == lowered)
        {
            let value = existing.value.clone();
            self.select(value);
            return;
        }
        let value = create_value(text);
        self.state.options.push(OptionItem::new(value.clone(), text));
        self.reset_filter();
        self.select(value);
    }

    /// Move the highlight to the next enabled filtered option (wrapping).
    pub fn highlight_next(&mut self) {
        self.move_highlight(|filtered, current| match current {
            Some(i) => option::next_enabled(filtered, i, true),
            None => option::first_enabled(filtered),
        });
    }

    /// Move the highlight to the previous enabled filtered option
    /// (wrapping).
    pub fn highlight_prev(&mut self) {
        self.move_highlight(|filtered, current| match current {
            Some(i) => option::prev_enabled(filtered, i, true),
            None => option::last_enabled(filtered),
        });
    }

    /// Highlight the first enabled filtered option.
    pub fn highlight_first(&mut self) {
        self.move_highlight(|filtered, _| option::first_enabled(filtered));
    }

    /// Highlight the last enabled filtered option.
    pub fn highlight_last(&mut self) {
        self.move_highlight(|filtered, _| option::last_enabled(filtered));
    }

    /// Interpret a keydown. Returns `true` when the key was consumed (the
    /// host should prevent its default action).
    pub fn on_key_down(&mut self, key: Key) -> bool {
        if !self.ready() {
            return false;
        }
        match key {
            Key::ArrowDown => {
                if self.state.open {
                    self.highlight_next();
                } else {
                    self.open();
                }
                true
            }
            Key::ArrowUp => {
                if self.state.open {
                    self.highlight_prev();
                } else {
                    self.open();
                    self.highlight_last();
                }
                true
            }
            Key::Home if self.state.open => {
                self.highlight_first();
                true
            }
            Key::End if self.state.open => {
                self.highlight_last();
                true
            }
            Key::Enter => {
                if self.state.open {
                    if let Some(highlighted) = self.state.highlighted_value.clone() {
                        self.select(highlighted);
                        return true;
                    }
                }
                if self.create_value.is_some() && !self.state.input_value.is_empty() {
                    let text = self.state.input_value.clone();
                    self.create(&text);
                    return true;
                }
                false
            }
            Key::Escape => {
                if self.state.open {
                    self.close();
                    true
                } else {
                    false
                }
            }
            Key::Backspace => self.remove_last_tag(),
            _ => false,
        }
    }

    /// Attribute bundle for the text input.
    pub fn input_props(&self) -> ComboboxInputProps {
        ComboboxInputProps {
            role: "combobox",
            id: self.ids.input(),
            aria_expanded: self.state.open,
            aria_haspopup: "listbox",
            aria_controls: self.ids.listbox(),
            aria_activedescendant: self
                .state
                .highlighted_value
                .as_ref()
                .map(|v| self.option_id(v)),
            aria_autocomplete: "list",
            aria_busy: self.state.loading,
            aria_disabled: self.disabled,
        }
    }

    /// Attribute bundle for the listbox.
    pub fn listbox_props(&self) -> ListboxProps {
        ListboxProps {
            role: "listbox",
            id: self.ids.listbox(),
        }
    }

    /// Attribute bundle for the option carrying `value`.
    pub fn option_props(&self, value: &T) -> ComboboxOptionProps {
        let disabled = option::position_of(&self.state.options, value)
            .is_some_and(|i| self.state.options[i].disabled);
        ComboboxOptionProps {
            role: "option",
            id: self.option_id(value),
            aria_selected: self.state.value.is_selected(value),
            aria_disabled: disabled,
        }
    }

    /// Attribute bundle for the removable tag of `value` (multi mode).
    pub fn tag_props(&self, value: &T, label: &str) -> TagProps {
        TagProps {
            role: "listitem",
            id: self.ids.tag(&value.to_string()),
            aria_label: label.into(),
        }
    }

    /// Tear the combobox down: clears the debounce timer and invalidates
    /// any in-flight load. Idempotent; all later operations are no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.debounce.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.state.loading = false;
    }

    fn ready(&self) -> bool {
        !self.destroyed && !self.disabled
    }

    fn option_id(&self, value: &T) -> String {
        self.ids.item(&value.to_string())
    }

    fn reset_filter(&mut self) {
        self.state.filtered_options = self.state.options.clone();
        self.update_virtualized();
    }

    fn update_virtualized(&mut self) {
        self.state.virtualized = self.state.filtered_options.len() > self.virtualize_threshold;
    }

    /// Re-establish the highlight invariant: when the highlighted value is
    /// no longer an enabled member of the filtered list, fall back to the
    /// first enabled match (or nothing).
    fn revalidate_highlight(&mut self) {
        let valid = self.state.highlighted_value.as_ref().is_some_and(|hv| {
            option::position_of(&self.state.filtered_options, hv)
                .is_some_and(|i| !self.state.filtered_options[i].disabled)
        });
        if !valid {
            self.state.highlighted_value = option::first_enabled(&self.state.filtered_options)
                .map(|i| self.state.filtered_options[i].value.clone());
        }
    }

    fn move_highlight(
        &mut self,
        pick: impl Fn(&[OptionItem<T>], Option<usize>) -> Option<usize>,
    ) {
        if !self.ready() {
            return;
        }
        let current = self
            .state
            .highlighted_value
            .as_ref()
            .and_then(|hv| option::position_of(&self.state.filtered_options, hv));
        if let Some(i) = pick(&self.state.filtered_options, current) {
            self.state.highlighted_value = Some(self.state.filtered_options[i].value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use trellis_core::ids::FixedId;

    fn generator() -> FixedId {
        FixedId("cb".to_string())
    }

    fn fruit() -> Vec<OptionItem<&'static str>> {
        vec![
            OptionItem::new("apple", "Apple"),
            OptionItem::new("banana", "Banana"),
            OptionItem::new("cherry", "Cherry"),
        ]
    }

    fn static_combobox() -> Combobox<&'static str> {
        Combobox::new(ComboboxConfig::with_static(fruit()), &mut generator())
    }

    #[test]
    fn filtering_is_case_insensitive() {
        let mut cb = static_combobox();
        cb.set_input_value("APP", 0);
        let filtered: Vec<&str> = cb.state().filtered_options.iter().map(|o| o.value).collect();
        assert_eq!(filtered, ["apple"]);
    }

    #[test]
    fn filtering_re_highlights_first_enabled_match() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(vec![
                OptionItem::new("apple", "Apple").disabled(),
                OptionItem::new("apricot", "Apricot"),
            ]),
            &mut generator(),
        );
        cb.set_input_value("ap", 0);
        assert_eq!(cb.state().highlighted_value, Some("apricot"));
    }

    #[test]
    fn open_highlights_selection_and_close_drops_it() {
        let mut cb = static_combobox();
        cb.select("banana");
        cb.open();
        assert_eq!(cb.state().highlighted_value, Some("banana"));
        cb.close();
        assert!(!cb.state().open);
        assert_eq!(cb.state().highlighted_value, None);
    }

    #[test]
    fn reentrant_open_and_close_are_no_ops() {
        let mut cb = static_combobox();
        cb.open();
        cb.highlight_next();
        let highlighted = cb.state().highlighted_value;
        cb.open();
        assert_eq!(cb.state().highlighted_value, highlighted);
        cb.close();
        cb.close();
        assert!(!cb.state().open);
    }

    #[test]
    fn single_select_replaces_and_auto_closes() {
        let mut cb = static_combobox();
        cb.open();
        cb.select("apple");
        assert_eq!(cb.state().value, SelectedValue::Single(Some("apple")));
        assert_eq!(cb.state().input_value, "Apple");
        assert!(!cb.state().open);

        cb.open();
        cb.select("cherry");
        assert_eq!(cb.state().value, SelectedValue::Single(Some("cherry")));
    }

    #[test]
    fn multi_select_appends_in_order_and_stays_open() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(fruit()).multiple(),
            &mut generator(),
        );
        cb.open();
        cb.select("banana");
        cb.select("apple");
        assert_eq!(
            cb.state().value,
            SelectedValue::Multiple(vec!["banana", "apple"])
        );
        assert!(cb.state().open);
    }

    #[test]
    fn reselecting_is_a_no_op_and_remove_is_the_only_deselect() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(fruit()).multiple(),
            &mut generator(),
        );
        cb.select("banana");
        cb.select("banana");
        assert_eq!(cb.state().value, SelectedValue::Multiple(vec!["banana"]));

        cb.remove(&"banana");
        assert_eq!(cb.state().value, SelectedValue::Multiple(vec![]));
    }

    #[test]
    fn disabled_options_cannot_be_selected() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(vec![
                OptionItem::new("apple", "Apple").disabled(),
            ]),
            &mut generator(),
        );
        cb.select("apple");
        assert_eq!(cb.state().value, SelectedValue::Single(None));
    }

    #[test]
    fn remove_last_tag_requires_empty_input() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(fruit()).multiple(),
            &mut generator(),
        );
        cb.select("apple");
        cb.select("banana");

        cb.set_input_value("ch", 0);
        assert!(!cb.remove_last_tag());
        assert_eq!(
            cb.state().value,
            SelectedValue::Multiple(vec!["apple", "banana"])
        );

        cb.set_input_value("", 0);
        assert!(cb.remove_last_tag());
        assert_eq!(cb.state().value, SelectedValue::Multiple(vec!["apple"]));
    }

    #[test]
    fn clear_empties_value_and_input() {
        let mut cb = static_combobox();
        cb.select("apple");
        cb.clear();
        assert_eq!(cb.state().value, SelectedValue::Single(None));
        assert_eq!(cb.state().input_value, "");
    }

    #[test]
    fn create_adds_selects_and_deduplicates_by_label() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(fruit()).creatable(|s| {
                // Leak is confined to tests; production value types own
                // their text.
                alloc::boxed::Box::leak(s.to_string().into_boxed_str())
            }),
            &mut generator(),
        );
        cb.create("Durian");
        assert_eq!(cb.state().options.len(), 4);
        assert_eq!(cb.state().value, SelectedValue::Single(Some("Durian")));

        // Creating an existing label selects rather than duplicates.
        cb.create("apple");
        assert_eq!(cb.state().options.len(), 4);
        assert_eq!(cb.state().value, SelectedValue::Single(Some("apple")));
    }

    #[test]
    fn highlight_navigation_wraps_and_skips_disabled() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(vec![
                OptionItem::new("a", "A"),
                OptionItem::new("b", "B").disabled(),
                OptionItem::new("c", "C"),
            ]),
            &mut generator(),
        );
        cb.open();
        assert_eq!(cb.state().highlighted_value, Some("a"));
        cb.highlight_next();
        assert_eq!(cb.state().highlighted_value, Some("c"));
        cb.highlight_next();
        assert_eq!(cb.state().highlighted_value, Some("a"));
        cb.highlight_prev();
        assert_eq!(cb.state().highlighted_value, Some("c"));
        cb.highlight_first();
        assert_eq!(cb.state().highlighted_value, Some("a"));
        cb.highlight_last();
        assert_eq!(cb.state().highlighted_value, Some("c"));
    }

    #[test]
    fn arrow_down_opens_then_navigates() {
        let mut cb = static_combobox();
        assert!(cb.on_key_down(Key::ArrowDown));
        assert!(cb.state().open);
        assert_eq!(cb.state().highlighted_value, Some("apple"));
        assert!(cb.on_key_down(Key::ArrowDown));
        assert_eq!(cb.state().highlighted_value, Some("banana"));
    }

    #[test]
    fn arrow_up_opens_highlighting_last() {
        let mut cb = static_combobox();
        assert!(cb.on_key_down(Key::ArrowUp));
        assert!(cb.state().open);
        assert_eq!(cb.state().highlighted_value, Some("cherry"));
    }

    #[test]
    fn enter_selects_the_highlight_and_escape_closes() {
        let mut cb = static_combobox();
        cb.on_key_down(Key::ArrowDown);
        assert!(cb.on_key_down(Key::Enter));
        assert_eq!(cb.state().value, SelectedValue::Single(Some("apple")));

        cb.on_key_down(Key::ArrowDown);
        assert!(cb.on_key_down(Key::Escape));
        assert!(!cb.state().open);
        assert!(!cb.on_key_down(Key::Escape));
    }

    #[test]
    fn virtualized_flag_tracks_the_threshold() {
        let many: Vec<OptionItem<i64>> = (0..12)
            .map(|i| OptionItem::new(i, format!("Item {i}")))
            .collect();
        let mut config = ComboboxConfig::with_static(many);
        config.virtualize_threshold = 10;
        let mut cb = Combobox::new(config, &mut generator());
        assert!(cb.state().virtualized);

        cb.set_input_value("Item 1", 0);
        // "Item 1", "Item 10", "Item 11" remain.
        assert_eq!(cb.state().filtered_options.len(), 3);
        assert!(!cb.state().virtualized);
    }

    #[test]
    fn input_props_follow_state() {
        let mut cb = static_combobox();
        let props = cb.input_props();
        assert_eq!(props.role, "combobox");
        assert_eq!(props.id, "cb-input");
        assert_eq!(props.aria_controls, "cb-listbox");
        assert!(!props.aria_expanded);
        assert_eq!(props.aria_activedescendant, None);

        cb.open();
        let props = cb.input_props();
        assert!(props.aria_expanded);
        assert_eq!(props.aria_activedescendant, Some("cb-item-apple".into()));
    }

    #[test]
    fn option_props_report_selection_and_disabled() {
        let mut cb = Combobox::new(
            ComboboxConfig::with_static(vec![
                OptionItem::new("a", "A"),
                OptionItem::new("b", "B").disabled(),
            ]),
            &mut generator(),
        );
        cb.select("a");
        let props = cb.option_props(&"a");
        assert_eq!(props.role, "option");
        assert!(props.aria_selected);
        assert!(!props.aria_disabled);
        assert!(cb.option_props(&"b").aria_disabled);
    }

    #[test]
    fn option_ids_are_stable_across_renders() {
        let cb = static_combobox();
        assert_eq!(cb.option_props(&"apple").id, cb.option_props(&"apple").id);
    }

    #[test]
    fn disabled_combobox_ignores_everything() {
        let mut config = ComboboxConfig::with_static(fruit());
        config.disabled = true;
        let mut cb = Combobox::new(config, &mut generator());
        cb.open();
        cb.set_input_value("app", 0);
        cb.select("apple");
        assert!(!cb.state().open);
        assert_eq!(cb.state().input_value, "");
        assert_eq!(cb.state().value, SelectedValue::Single(None));
        assert!(cb.input_props().aria_disabled);
    }

    #[test]
    fn destroy_is_idempotent_and_degrades_to_no_ops() {
        let mut cb = static_combobox();
        cb.destroy();
        cb.destroy();
        cb.open();
        cb.set_input_value("app", 0);
        cb.select("apple");
        assert!(!cb.state().open);
        assert_eq!(cb.state().value, SelectedValue::Single(None));
        assert_eq!(cb.poll(10_000), None);
    }
}
