// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Anchor: side/alignment/offset geometry for floating content.
//!
//! Menus, popovers, and hover cards position their floating content relative
//! to a trigger rectangle. This crate is the pure-geometry half of that
//! problem: given the anchor rectangle, the content size, and an
//! [`AnchorConfig`], it computes where the content rectangle goes. It holds
//! no state and knows nothing about rendering; behaviors carry an
//! `AnchorConfig` and hosts call [`compute`] (or [`compute_in`] for
//! flip-on-overflow) whenever layout runs.
//!
//! All geometry is [`kurbo`] in a single caller-chosen coordinate space.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use trellis_anchor::{compute, Align, AnchorConfig, Side};
//!
//! let trigger = Rect::new(100.0, 100.0, 200.0, 140.0);
//! let config = AnchorConfig {
//!     side: Side::Bottom,
//!     align: Align::Start,
//!     side_offset: 4.0,
//!     align_offset: 0.0,
//! };
//!
//! let content = compute(trigger, Size::new(160.0, 80.0), &config);
//! assert_eq!(content.y0, 144.0); // below the trigger, 4px gap
//! assert_eq!(content.x0, 100.0); // start-aligned
//! ```

#![no_std]

use kurbo::{Rect, Size};

/// Which side of the anchor the content attaches to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Side {
    /// The opposite side, used when flipping on overflow.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Cross-axis alignment of the content against the anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align the leading edges.
    Start,
    /// Center on the anchor.
    Center,
    /// Align the trailing edges.
    End,
}

/// Placement configuration carried by a behavior.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorConfig {
    /// Preferred attachment side.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
    /// Gap between anchor and content along the side axis.
    pub side_offset: f64,
    /// Shift along the alignment axis.
    pub align_offset: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Start,
            side_offset: 0.0,
            align_offset: 0.0,
        }
    }
}

/// A computed placement: the content rectangle and the side actually used
/// (which differs from the preferred side after a flip).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Where the content goes.
    pub rect: Rect,
    /// The side the content ended up on.
    pub side: Side,
}

/// Position `size` relative to `anchor` per `config`, ignoring overflow.
pub fn compute(anchor: Rect, size: Size, config: &AnchorConfig) -> Rect {
    place(anchor, size, config.side, config)
}

/// Position `size` relative to `anchor`, flipping to the opposite side when
/// the preferred side overflows `bounds` and the opposite side fits.
///
/// Only the side axis flips; alignment overflow is left to the host (it
/// typically clamps during layout).
pub fn compute_in(anchor: Rect, size: Size, config: &AnchorConfig, bounds: Rect) -> Placement {
    let preferred = place(anchor, size, config.side, config);
    if fits(preferred, bounds, config.side) {
        return Placement {
            rect: preferred,
            side: config.side,
        };
    }
    let flipped_side = config.side.opposite();
    let flipped = place(anchor, size, flipped_side, config);
    if fits(flipped, bounds, flipped_side) {
        Placement {
            rect: flipped,
            side: flipped_side,
        }
    } else {
        Placement {
            rect: preferred,
            side: config.side,
        }
    }
}

fn place(anchor: Rect, size: Size, side: Side, config: &AnchorConfig) -> Rect {
    let (x, y) = match side {
        Side::Bottom => (
            aligned(anchor.x0, anchor.x1, size.width, config),
            anchor.y1 + config.side_offset,
        ),
        Side::Top => (
            aligned(anchor.x0, anchor.x1, size.width, config),
            anchor.y0 - config.side_offset - size.height,
        ),
        Side::Right => (
            anchor.x1 + config.side_offset,
            aligned(anchor.y0, anchor.y1, size.height, config),
        ),
        Side::Left => (
            anchor.x0 - config.side_offset - size.width,
            aligned(anchor.y0, anchor.y1, size.height, config),
        ),
    };
    Rect::new(x, y, x + size.width, y + size.height)
}

fn aligned(lead: f64, trail: f64, extent: f64, config: &AnchorConfig) -> f64 {
    let base = match config.align {
        Align::Start => lead,
        Align::Center => (lead + trail - extent) / 2.0,
        Align::End => trail - extent,
    };
    base + config.align_offset
}

/// Whether `rect` stays within `bounds` along the axis `side` extends on.
fn fits(rect: Rect, bounds: Rect, side: Side) -> bool {
    match side {
        Side::Top => rect.y0 >= bounds.y0,
        Side::Bottom => rect.y1 <= bounds.y1,
        Side::Left => rect.x0 >= bounds.x0,
        Side::Right => rect.x1 <= bounds.x1,
    }
}
