// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll position storage for the slot strip.
//!
//! The picker does not lay anything out itself. It reads and writes its scroll
//! position through a [`SlotViewport`], which hosts can back with their own
//! scroll container. [`FixedSlotViewport`] is the plain in-memory
//! implementation used when the host has nothing better.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::ScrollSlot;
use crate::slots::SLOT_BASE;

/// Scroll position as a first visible slot plus a pixel offset into it.
///
/// A normalized position keeps `offset` in `[0, item_extent)`. The position is
/// on a slot boundary exactly when `offset == 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SlotPosition {
    /// Slot whose leading edge is at or before the viewport start.
    pub first_slot: ScrollSlot,
    /// Pixels the first slot has scrolled past the viewport start.
    pub offset: f64,
}

impl SlotPosition {
    /// A position resting exactly on `first_slot`.
    #[must_use]
    pub const fn at_slot(first_slot: ScrollSlot) -> Self {
        Self {
            first_slot,
            offset: 0.0,
        }
    }

    /// Returns `true` if the position is on a slot boundary.
    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.offset == 0.0
    }

    /// Offset into the first slot as a fraction of the item extent.
    ///
    /// Unmeasured or degenerate extents report `0.0`.
    #[must_use]
    pub fn fraction(&self, item_extent: Option<f64>) -> f64 {
        match item_extent {
            Some(extent) if extent > 0.0 => (self.offset / extent).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Continuous slot coordinate, `first_slot + fraction`.
    #[must_use]
    pub fn fractional_slot(&self, item_extent: Option<f64>) -> f64 {
        self.first_slot as f64 + self.fraction(item_extent)
    }

    /// Distance in pixels from the leading edge of `anchor` to this position.
    #[must_use]
    pub fn pixels_from(&self, anchor: ScrollSlot, item_extent: f64) -> f64 {
        (self.first_slot - anchor) as f64 * item_extent + self.offset
    }

    /// The normalized position `pixels` past the leading edge of `anchor`.
    ///
    /// Without a usable extent the position snaps to `anchor`.
    #[must_use]
    pub fn from_pixels(anchor: ScrollSlot, pixels: f64, item_extent: Option<f64>) -> Self {
        let Some(extent) = item_extent.filter(|extent| *extent > 0.0) else {
            return Self::at_slot(anchor);
        };
        if !pixels.is_finite() {
            return Self::at_slot(anchor);
        }
        let whole = (pixels / extent).floor();
        // Travel is circular, so one jump never needs to exceed the slot base.
        let bound = SLOT_BASE as f64;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "`whole` is clamped to plus or minus SLOT_BASE"
        )]
        let slots = whole.clamp(-bound, bound) as ScrollSlot;
        let first_slot = anchor.saturating_add(slots);
        if whole.abs() > bound {
            return Self::at_slot(first_slot);
        }
        let offset = (pixels - whole * extent).clamp(0.0, extent);
        // Rounding can leave `offset == extent`; fold it into the next slot.
        if offset >= extent {
            Self::at_slot(first_slot.saturating_add(1))
        } else {
            Self { first_slot, offset }
        }
    }

    /// This position moved by `delta` pixels and renormalized.
    #[must_use]
    pub fn offset_by(self, delta: f64, item_extent: Option<f64>) -> Self {
        match item_extent.filter(|extent| *extent > 0.0) {
            Some(extent) => Self::from_pixels(self.first_slot, self.offset + delta, Some(extent)),
            None => Self::at_slot(self.first_slot),
        }
    }
}

/// The scroll container a picker reads its position from.
///
/// Implementations report the measured item extent along the scroll axis, or
/// `None` before the first layout pass. While unmeasured, the picker treats all
/// pixel motion as zero and only moves in whole slots.
pub trait SlotViewport {
    /// Measured extent of one slot along the scroll axis.
    fn item_extent(&self) -> Option<f64>;

    /// Current scroll position.
    fn position(&self) -> SlotPosition;

    /// Replaces the scroll position.
    fn set_position(&mut self, position: SlotPosition);

    /// Scrolls by `delta` pixels and returns how much was consumed.
    fn scroll_by(&mut self, delta: f64) -> f64 {
        let Some(extent) = self.item_extent() else {
            return 0.0;
        };
        let position = self.position().offset_by(delta, Some(extent));
        self.set_position(position);
        delta
    }
}

/// In-memory [`SlotViewport`] with a uniform item extent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FixedSlotViewport {
    item_extent: Option<f64>,
    position: SlotPosition,
}

impl FixedSlotViewport {
    /// Creates a viewport whose slots are `item_extent` pixels long.
    ///
    /// Non-positive extents leave the viewport unmeasured.
    #[must_use]
    pub fn new(item_extent: f64) -> Self {
        Self {
            item_extent: measured(item_extent),
            position: SlotPosition::default(),
        }
    }

    /// Creates a viewport that has not been laid out yet.
    #[must_use]
    pub const fn unmeasured() -> Self {
        Self {
            item_extent: None,
            position: SlotPosition::at_slot(0),
        }
    }

    /// Updates the measured slot extent, keeping the fractional position.
    pub fn set_item_extent(&mut self, item_extent: f64) {
        debug_assert!(
            item_extent.is_finite(),
            "FixedSlotViewport extents must be finite; got {item_extent:?}"
        );
        let fraction = self.position.fraction(self.item_extent);
        self.item_extent = measured(item_extent);
        self.position.offset = match self.item_extent {
            Some(extent) => fraction * extent,
            None => 0.0,
        };
    }
}

fn measured(item_extent: f64) -> Option<f64> {
    (item_extent.is_finite() && item_extent > 0.0).then_some(item_extent)
}

impl SlotViewport for FixedSlotViewport {
    fn item_extent(&self) -> Option<f64> {
        self.item_extent
    }

    fn position(&self) -> SlotPosition {
        self.position
    }

    fn set_position(&mut self, position: SlotPosition) {
        self.position = position;
    }
}
