// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Slider: single- and dual-thumb value state machine.
//!
//! A [`Slider`] owns either one value or a `{min, max}` pair of values; the
//! shape is fixed at construction. Every mutation clamps into the configured
//! `[min, max]` range and snaps to the nearest step; in range mode the two
//! thumbs additionally clamp against each other, so they may touch but never
//! cross. The machine interprets keyboard input itself (arrows step,
//! PageUp/PageDown take the large step, Home/End jump to the ends) and hands
//! the host ARIA attribute bundles per thumb.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_core::ids::SequentialIds;
//! use trellis_slider::{Slider, SliderConfig, SliderValue, Thumb};
//!
//! let config = SliderConfig {
//!     min: 0.0,
//!     max: 100.0,
//!     step: 10.0,
//!     ..SliderConfig::default()
//! };
//! let mut slider = Slider::single(config, 23.0, &mut SequentialIds);
//!
//! // 23 snapped to the nearest step.
//! assert_eq!(slider.value(), &SliderValue::Single(20.0));
//!
//! slider.increment(Thumb::Min, false);
//! assert_eq!(slider.value(), &SliderValue::Single(30.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use trellis_core::attrs::{Attr, PropBundle};
use trellis_core::ids::{IdGenerator, WidgetIds};
use trellis_core::key::Key;

/// Slider axis, reported through `aria-orientation`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left-to-right track.
    #[default]
    Horizontal,
    /// Bottom-to-top track.
    Vertical,
}

impl Orientation {
    fn as_aria(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Static slider configuration, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderConfig {
    /// Lower bound of the track.
    pub min: f64,
    /// Upper bound of the track.
    pub max: f64,
    /// Step granularity; every value snaps to `min + n * step`.
    pub step: f64,
    /// Large-step size (PageUp/PageDown). Defaults to `step * 10`.
    pub large_step: Option<f64>,
    /// Track axis.
    pub orientation: Orientation,
    /// Disabled sliders ignore every mutating operation.
    pub disabled: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            large_step: None,
            orientation: Orientation::Horizontal,
            disabled: false,
        }
    }
}

/// Which thumb an operation addresses. Single-thumb sliders use
/// [`Thumb::Min`]; range sliders use both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Thumb {
    /// The only thumb (single mode) or the lower thumb (range mode).
    Min,
    /// The upper thumb (range mode only).
    Max,
}

/// The slider's value, shaped per mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SliderValue {
    /// Single-thumb value.
    Single(f64),
    /// Dual-thumb range; `min <= max` always holds.
    Range {
        /// Lower thumb value.
        min: f64,
        /// Upper thumb value.
        max: f64,
    },
}

/// Attribute bundle for one thumb element.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderThumbProps {
    /// `"slider"`.
    pub role: &'static str,
    /// Stable derived element id.
    pub id: String,
    /// Effective lower bound (the other thumb's value in range mode).
    pub aria_valuemin: f64,
    /// Effective upper bound.
    pub aria_valuemax: f64,
    /// Current value.
    pub aria_valuenow: f64,
    /// Track axis.
    pub aria_orientation: &'static str,
    /// Present when the slider is disabled.
    pub aria_disabled: bool,
    /// `0` normally, `-1` when disabled.
    pub tab_index: i32,
}

impl PropBundle for SliderThumbProps {
    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = vec![
            Attr::new("role", self.role),
            Attr::new("id", self.id.clone()),
            Attr::new("aria-valuemin", self.aria_valuemin),
            Attr::new("aria-valuemax", self.aria_valuemax),
            Attr::new("aria-valuenow", self.aria_valuenow),
            Attr::new("aria-orientation", self.aria_orientation),
            Attr::new("tabindex", i64::from(self.tab_index)),
        ];
        if self.aria_disabled {
            attrs.push(Attr::new("aria-disabled", true));
        }
        attrs
    }
}

/// The slider state machine.
#[derive(Clone, Debug)]
pub struct Slider {
    config: SliderConfig,
    value: SliderValue,
    focused: Option<Thumb>,
    ids: WidgetIds,
    destroyed: bool,
}

impl Slider {
    /// Create a single-thumb slider. The initial value is clamped and
    /// snapped like any mutation.
    pub fn single(config: SliderConfig, initial: f64, ids: &mut impl IdGenerator) -> Self {
        let value = SliderValue::Single(normalize(initial, &config, config.min, config.max));
        Self {
            config,
            value,
            focused: None,
            ids: WidgetIds::new(ids),
            destroyed: false,
        }
    }

    /// Create a dual-thumb range slider. Initial values are clamped, snapped,
    /// and ordered.
    pub fn range(
        config: SliderConfig,
        initial_min: f64,
        initial_max: f64,
        ids: &mut impl IdGenerator,
    ) -> Self {
        let max = normalize(initial_max, &config, config.min, config.max);
        let min = normalize(initial_min, &config, config.min, max);
        Self {
            config,
            value: SliderValue::Range { min, max },
            focused: None,
            ids: WidgetIds::new(ids),
            destroyed: false,
        }
    }

    /// Current value snapshot.
    pub fn value(&self) -> &SliderValue {
        &self.value
    }

    /// Static configuration.
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// The thumb currently holding keyboard focus, if any.
    pub fn focused(&self) -> Option<Thumb> {
        self.focused
    }

    /// Record that `thumb` received focus.
    pub fn focus(&mut self, thumb: Thumb) {
        if self.ready() && self.has_thumb(thumb) {
            self.focused = Some(thumb);
        }
    }

    /// Record that focus left the slider.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Set `thumb` to `v`, clamping and snapping.
    pub fn set_value(&mut self, thumb: Thumb, v: f64) {
        if !self.ready() {
            return;
        }
        let (lo, hi) = self.thumb_bounds(thumb);
        let snapped = normalize(v, &self.config, lo, hi);
        self.store(thumb, snapped);
    }

    /// Move `thumb` up by one step (`large` selects the large step).
    pub fn increment(&mut self, thumb: Thumb, large: bool) {
        self.step_by(thumb, self.step_size(large));
    }

    /// Move `thumb` down by one step (`large` selects the large step).
    pub fn decrement(&mut self, thumb: Thumb, large: bool) {
        self.step_by(thumb, -self.step_size(large));
    }

    /// Jump `thumb` to its effective minimum.
    pub fn set_to_min(&mut self, thumb: Thumb) {
        if self.ready() {
            let (lo, _) = self.thumb_bounds(thumb);
            self.store(thumb, lo);
        }
    }

    /// Jump `thumb` to its effective maximum.
    pub fn set_to_max(&mut self, thumb: Thumb) {
        if self.ready() {
            let (_, hi) = self.thumb_bounds(thumb);
            self.store(thumb, hi);
        }
    }

    /// Interpret a keydown addressed at `thumb`. Returns `true` when the key
    /// was consumed.
    pub fn on_key_down(&mut self, thumb: Thumb, key: Key) -> bool {
        if !self.ready() {
            return false;
        }
        match key {
            Key::ArrowUp | Key::ArrowRight => self.increment(thumb, false),
            Key::ArrowDown | Key::ArrowLeft => self.decrement(thumb, false),
            Key::PageUp => self.increment(thumb, true),
            Key::PageDown => self.decrement(thumb, true),
            Key::Home => self.set_to_min(thumb),
            Key::End => self.set_to_max(thumb),
            _ => return false,
        }
        true
    }

    /// Map a value to its position on the track as a percentage in
    /// `[0, 100]`.
    pub fn value_to_percent(&self, v: f64) -> f64 {
        let span = self.config.max - self.config.min;
        if span <= 0.0 {
            return 0.0;
        }
        (clamp(v, self.config.min, self.config.max) - self.config.min) / span * 100.0
    }

    /// Inverse of [`Slider::value_to_percent`]; the result snaps to the step
    /// grid, so step-aligned values survive repeated round-trips.
    pub fn percent_to_value(&self, percent: f64) -> f64 {
        let span = self.config.max - self.config.min;
        let raw = self.config.min + clamp(percent, 0.0, 100.0) / 100.0 * span;
        normalize(raw, &self.config, self.config.min, self.config.max)
    }

    /// Attribute bundle for `thumb`.
    ///
    /// In range mode each thumb reports the other thumb's value as its
    /// effective bound, matching what the machine actually enforces.
    pub fn thumb_props(&self, thumb: Thumb) -> SliderThumbProps {
        let (lo, hi) = self.thumb_bounds(thumb);
        let key = match thumb {
            Thumb::Min => "min",
            Thumb::Max => "max",
        };
        SliderThumbProps {
            role: "slider",
            id: self.ids.thumb(key),
            aria_valuemin: lo,
            aria_valuemax: hi,
            aria_valuenow: self.get(thumb),
            aria_orientation: self.config.orientation.as_aria(),
            aria_disabled: self.config.disabled,
            tab_index: if self.config.disabled { -1 } else { 0 },
        }
    }

    /// Tear the slider down. Idempotent; all later operations are no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.focused = None;
    }

    fn ready(&self) -> bool {
        !self.destroyed && !self.config.disabled
    }

    fn has_thumb(&self, thumb: Thumb) -> bool {
        matches!(self.value, SliderValue::Range { .. }) || thumb == Thumb::Min
    }

    fn step_size(&self, large: bool) -> f64 {
        if large {
            self.config.large_step.unwrap_or(self.config.step * 10.0)
        } else {
            self.config.step
        }
    }

    fn step_by(&mut self, thumb: Thumb, delta: f64) {
        if self.ready() && self.has_thumb(thumb) {
            let (lo, hi) = self.thumb_bounds(thumb);
            let next = clamp(self.get(thumb) + delta, lo, hi);
            self.store(thumb, snap(next, &self.config, lo, hi));
        }
    }

    /// Effective bounds for one thumb: the track bounds, tightened by the
    /// opposing thumb in range mode so thumbs may touch but never cross.
    fn thumb_bounds(&self, thumb: Thumb) -> (f64, f64) {
        match (self.value, thumb) {
            (SliderValue::Range { max, .. }, Thumb::Min) => (self.config.min, max),
            (SliderValue::Range { min, .. }, Thumb::Max) => (min, self.config.max),
            (SliderValue::Single(_), _) => (self.config.min, self.config.max),
        }
    }

    fn get(&self, thumb: Thumb) -> f64 {
        match (self.value, thumb) {
            (SliderValue::Single(v), _) => v,
            (SliderValue::Range { min, .. }, Thumb::Min) => min,
            (SliderValue::Range { max, .. }, Thumb::Max) => max,
        }
    }

    fn store(&mut self, thumb: Thumb, v: f64) {
        match (&mut self.value, thumb) {
            (SliderValue::Single(slot), Thumb::Min) => *slot = v,
            (SliderValue::Single(_), Thumb::Max) => {}
            (SliderValue::Range { min, .. }, Thumb::Min) => *min = v,
            (SliderValue::Range { max, .. }, Thumb::Max) => *max = v,
        }
    }
}

/// Clamp into `[lo, hi]`.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Snap `v` onto the step grid anchored at the track minimum, rounding to
/// the nearest step, then re-clamp into `[lo, hi]`.
fn snap(v: f64, config: &SliderConfig, lo: f64, hi: f64) -> f64 {
    if config.step <= 0.0 {
        return clamp(v, lo, hi);
    }
    let offset = clamp(v, lo, hi) - config.min;
    // Round-half-up on a non-negative step count; `f64::round` is
    // unavailable without std or libm.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "step counts on real tracks are far below i64::MAX"
    )]
    let steps = (offset / config.step + 0.5) as i64;
    #[expect(
        clippy::cast_precision_loss,
        reason = "step counts on real tracks are exactly representable"
    )]
    let snapped = config.min + steps as f64 * config.step;
    clamp(snapped, lo, hi)
}

/// Clamp then snap, the normal form every stored value passes through.
fn normalize(v: f64, config: &SliderConfig, lo: f64, hi: f64) -> f64 {
    snap(clamp(v, lo, hi), config, lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::ids::FixedId;

    fn generator() -> FixedId {
        FixedId("slider".into())
    }

    fn stepped() -> SliderConfig {
        SliderConfig {
            min: 0.0,
            max: 100.0,
            step: 10.0,
            ..SliderConfig::default()
        }
    }

    #[test]
    fn values_clamp_into_the_track() {
        let mut s = Slider::single(stepped(), 50.0, &mut generator());
        s.set_value(Thumb::Min, 150.0);
        assert_eq!(s.value(), &SliderValue::Single(100.0));
        s.set_value(Thumb::Min, -10.0);
        assert_eq!(s.value(), &SliderValue::Single(0.0));
    }

    #[test]
    fn values_snap_to_the_nearest_step() {
        let mut s = Slider::single(stepped(), 0.0, &mut generator());
        s.set_value(Thumb::Min, 23.0);
        assert_eq!(s.value(), &SliderValue::Single(20.0));
        s.set_value(Thumb::Min, 27.0);
        assert_eq!(s.value(), &SliderValue::Single(30.0));
    }

    #[test]
    fn increments_move_by_exactly_one_step() {
        let mut s = Slider::single(stepped(), 20.0, &mut generator());
        s.increment(Thumb::Min, false);
        assert_eq!(s.value(), &SliderValue::Single(30.0));
        s.decrement(Thumb::Min, false);
        assert_eq!(s.value(), &SliderValue::Single(20.0));
    }

    #[test]
    fn large_step_defaults_to_ten_steps() {
        let mut s = Slider::single(
            SliderConfig {
                step: 2.0,
                ..stepped()
            },
            40.0,
            &mut generator(),
        );
        s.increment(Thumb::Min, true);
        assert_eq!(s.value(), &SliderValue::Single(60.0));
    }

    #[test]
    fn large_step_override_wins() {
        let mut s = Slider::single(
            SliderConfig {
                large_step: Some(30.0),
                ..stepped()
            },
            0.0,
            &mut generator(),
        );
        s.increment(Thumb::Min, true);
        assert_eq!(s.value(), &SliderValue::Single(30.0));
    }

    #[test]
    fn range_thumbs_touch_but_never_cross() {
        let mut s = Slider::range(stepped(), 70.0, 80.0, &mut generator());
        // Push the min thumb past the max thumb repeatedly.
        for _ in 0..5 {
            s.increment(Thumb::Min, false);
            let SliderValue::Range { min, max } = *s.value() else {
                panic!("range slider lost its shape");
            };
            assert!(min <= max);
        }
        assert_eq!(s.value(), &SliderValue::Range { min: 80.0, max: 80.0 });

        // And the max thumb downward into the min thumb.
        for _ in 0..5 {
            s.decrement(Thumb::Max, false);
            let SliderValue::Range { min, max } = *s.value() else {
                panic!("range slider lost its shape");
            };
            assert!(min <= max);
        }
    }

    #[test]
    fn home_and_end_jump_to_effective_bounds() {
        let mut s = Slider::range(stepped(), 30.0, 60.0, &mut generator());
        s.set_to_max(Thumb::Min);
        assert_eq!(s.value(), &SliderValue::Range { min: 60.0, max: 60.0 });
        s.set_to_min(Thumb::Min);
        assert_eq!(s.value(), &SliderValue::Range { min: 0.0, max: 60.0 });
        s.set_to_max(Thumb::Max);
        assert_eq!(s.value(), &SliderValue::Range { min: 0.0, max: 100.0 });
    }

    #[test]
    fn percent_round_trips_on_step_aligned_values() {
        let s = Slider::single(stepped(), 0.0, &mut generator());
        for v in [0.0, 10.0, 20.0, 50.0, 90.0, 100.0] {
            let pct = s.value_to_percent(v);
            assert_eq!(s.percent_to_value(pct), v);
        }
        assert_eq!(s.value_to_percent(50.0), 50.0);
        assert_eq!(s.value_to_percent(150.0), 100.0);
    }

    #[test]
    fn keyboard_mapping_drives_the_thumb() {
        let mut s = Slider::single(stepped(), 50.0, &mut generator());
        assert!(s.on_key_down(Thumb::Min, Key::ArrowRight));
        assert_eq!(s.value(), &SliderValue::Single(60.0));
        assert!(s.on_key_down(Thumb::Min, Key::PageDown));
        assert_eq!(s.value(), &SliderValue::Single(0.0));
        assert!(s.on_key_down(Thumb::Min, Key::End));
        assert_eq!(s.value(), &SliderValue::Single(100.0));
        assert!(!s.on_key_down(Thumb::Min, Key::Enter));
    }

    #[test]
    fn disabled_slider_ignores_mutations() {
        let mut s = Slider::single(
            SliderConfig {
                disabled: true,
                ..stepped()
            },
            50.0,
            &mut generator(),
        );
        s.increment(Thumb::Min, false);
        s.set_value(Thumb::Min, 90.0);
        assert_eq!(s.value(), &SliderValue::Single(50.0));
        assert_eq!(s.thumb_props(Thumb::Min).tab_index, -1);
        assert!(s.thumb_props(Thumb::Min).aria_disabled);
    }

    #[test]
    fn thumb_props_reflect_effective_bounds() {
        let s = Slider::range(stepped(), 30.0, 60.0, &mut generator());
        let min_props = s.thumb_props(Thumb::Min);
        assert_eq!(min_props.role, "slider");
        assert_eq!(min_props.aria_valuemin, 0.0);
        assert_eq!(min_props.aria_valuemax, 60.0);
        assert_eq!(min_props.aria_valuenow, 30.0);

        let max_props = s.thumb_props(Thumb::Max);
        assert_eq!(max_props.aria_valuemin, 30.0);
        assert_eq!(max_props.aria_valuemax, 100.0);
    }

    #[test]
    fn single_mode_has_no_max_thumb() {
        let mut s = Slider::single(stepped(), 50.0, &mut generator());
        s.increment(Thumb::Max, false);
        assert_eq!(s.value(), &SliderValue::Single(50.0));
        s.focus(Thumb::Max);
        assert_eq!(s.focused(), None);
    }

    #[test]
    fn focus_tracking() {
        let mut s = Slider::range(stepped(), 10.0, 90.0, &mut generator());
        s.focus(Thumb::Max);
        assert_eq!(s.focused(), Some(Thumb::Max));
        s.blur();
        assert_eq!(s.focused(), None);
    }

    #[test]
    fn destroy_is_idempotent_and_final() {
        let mut s = Slider::single(stepped(), 50.0, &mut generator());
        s.destroy();
        s.destroy();
        s.increment(Thumb::Min, false);
        assert_eq!(s.value(), &SliderValue::Single(50.0));
        assert!(!s.on_key_down(Thumb::Min, Key::ArrowRight));
    }
}
