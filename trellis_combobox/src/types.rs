// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration, state, and load-boundary types.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use trellis_core::option::OptionItem;

/// Default debounce window for async sources, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default option count above which [`ComboboxState::virtualized`] flips on.
pub const DEFAULT_VIRTUALIZE_THRESHOLD: usize = 100;

/// Whether the combobox holds one value or an ordered set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// One scalar value; selecting replaces it and closes the list.
    Single,
    /// An ordered, duplicate-free list of values; the list stays open.
    Multiple,
}

/// Where options come from.
#[derive(Clone, Debug)]
pub enum ItemSource<T> {
    /// A fixed list, filtered synchronously and case-insensitively on every
    /// input change.
    Static(Vec<OptionItem<T>>),
    /// A host-performed load per (debounced) query. The machine emits
    /// [`LoadRequest`] values; the host fetches and reports back.
    Async {
        /// Quiet period after the last keystroke before a load is issued.
        debounce_ms: u64,
    },
}

/// Static combobox configuration, fixed at construction.
#[derive(Clone, Debug)]
pub struct ComboboxConfig<T> {
    /// Selection shape.
    pub mode: SelectionMode,
    /// Option source.
    pub source: ItemSource<T>,
    /// When present, unknown input can be turned into a new option via
    /// `create`; the function builds the option value from the typed text.
    pub create_value: Option<fn(&str) -> T>,
    /// Option count above which the `virtualized` flag flips on.
    pub virtualize_threshold: usize,
    /// Disabled comboboxes ignore every mutating operation.
    pub disabled: bool,
}

impl<T> ComboboxConfig<T> {
    /// Configuration over a fixed option list.
    pub fn with_static(items: Vec<OptionItem<T>>) -> Self {
        Self {
            mode: SelectionMode::Single,
            source: ItemSource::Static(items),
            create_value: None,
            virtualize_threshold: DEFAULT_VIRTUALIZE_THRESHOLD,
            disabled: false,
        }
    }

    /// Configuration over a host-performed async source with the default
    /// debounce window.
    pub fn with_async() -> Self {
        Self {
            mode: SelectionMode::Single,
            source: ItemSource::Async {
                debounce_ms: DEFAULT_DEBOUNCE_MS,
            },
            create_value: None,
            virtualize_threshold: DEFAULT_VIRTUALIZE_THRESHOLD,
            disabled: false,
        }
    }

    /// Switch to multi-select mode.
    pub fn multiple(mut self) -> Self {
        self.mode = SelectionMode::Multiple;
        self
    }

    /// Enable creatable mode with the given value constructor.
    pub fn creatable(mut self, create_value: fn(&str) -> T) -> Self {
        self.create_value = Some(create_value);
        self
    }
}

/// The selected value, shaped per [`SelectionMode`].
#[derive(Clone, Debug, PartialEq)]
pub enum SelectedValue<T> {
    /// Single mode: at most one value.
    Single(Option<T>),
    /// Multi mode: ordered and duplicate-free.
    Multiple(Vec<T>),
}

impl<T: PartialEq> SelectedValue<T> {
    /// Whether `value` is currently selected.
    pub fn is_selected(&self, value: &T) -> bool {
        match self {
            Self::Single(slot) => slot.as_ref() == Some(value),
            Self::Multiple(values) => values.contains(value),
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(slot) => slot.is_none(),
            Self::Multiple(values) => values.is_empty(),
        }
    }
}

/// A failed load, surfaced through [`ComboboxState::error`]. Never thrown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError(pub String);

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A load the host must perform.
///
/// Emitted by `Combobox::poll` when a debounce window closes. The `epoch`
/// identifies this request generation; pass it back to `resolve_load`, and
/// check `is_current_epoch` from long-running loaders to stop early once
/// superseded. Stale epochs are discarded either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    /// The input text the load is for.
    pub query: String,
    /// This request's generation.
    pub epoch: u64,
}

/// One combobox's complete state snapshot.
///
/// Hosts read this after every mutating call; fields are never patched from
/// outside. When `highlighted_value` is non-`None` it always references an
/// enabled member of `filtered_options`.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboboxState<T> {
    /// Whether the listbox is open.
    pub open: bool,
    /// The selected value(s).
    pub value: SelectedValue<T>,
    /// Current text in the input.
    pub input_value: String,
    /// The highlighted option's value, if any.
    pub highlighted_value: Option<T>,
    /// The full option list as of the last replacement.
    pub options: Vec<OptionItem<T>>,
    /// The options currently visible (filtered for static sources, the last
    /// load result for async sources).
    pub filtered_options: Vec<OptionItem<T>>,
    /// Whether a load is in flight.
    pub loading: bool,
    /// The last load failure; cleared when a new load starts.
    pub error: Option<LoadError>,
    /// Whether the visible option count exceeds the virtualization
    /// threshold. The machine performs no virtualization itself; hosts
    /// switch rendering strategy on this flag.
    pub virtualized: bool,
}
