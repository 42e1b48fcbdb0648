// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived pixel extents for the picker viewport.
//!
//! A picker shows one focused slot with `unfocused_side_count` partially
//! emphasized slots on either side. Everything here is a pure function of the
//! item size, the scroll axis, and that side count.

use kurbo::{Point, Rect, Size};

/// Scroll axis of a picker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Items stack top to bottom.
    #[default]
    Vertical,
    /// Items stack left to right.
    Horizontal,
}

impl Orientation {
    /// Extent of `size` along the scroll axis.
    #[must_use]
    pub const fn main_axis(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Extent of `size` across the scroll axis.
    #[must_use]
    pub const fn cross_axis(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Builds a size from main and cross axis extents.
    #[must_use]
    pub const fn size(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, main),
            Self::Horizontal => Size::new(main, cross),
        }
    }

    /// Builds a point from main and cross axis coordinates.
    #[must_use]
    pub const fn point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point::new(cross, main),
            Self::Horizontal => Point::new(main, cross),
        }
    }
}

/// Number of slots in the visible window: the focus slot plus both sides.
#[must_use]
pub const fn visible_window_count(unfocused_side_count: usize) -> usize {
    unfocused_side_count * 2 + 1
}

/// Viewport geometry derived from item size, axis, and window size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickerGeometry {
    item_main: f64,
    item_cross: f64,
    unfocused_side_count: usize,
    orientation: Orientation,
}

impl PickerGeometry {
    /// Creates geometry for items of `item_size` scrolling along `orientation`.
    ///
    /// Negative extents are clamped to zero.
    #[must_use]
    pub fn new(item_size: Size, orientation: Orientation, unfocused_side_count: usize) -> Self {
        Self {
            item_main: orientation.main_axis(item_size).max(0.0),
            item_cross: orientation.cross_axis(item_size).max(0.0),
            unfocused_side_count,
            orientation,
        }
    }

    /// Creates geometry from explicit main/cross axis extents.
    #[must_use]
    pub fn from_extents(
        item_main: f64,
        item_cross: f64,
        orientation: Orientation,
        unfocused_side_count: usize,
    ) -> Self {
        Self::new(
            orientation.size(item_main, item_cross),
            orientation,
            unfocused_side_count,
        )
    }

    /// Scroll axis.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Item extent along the scroll axis.
    #[must_use]
    pub const fn item_main_extent(&self) -> f64 {
        self.item_main
    }

    /// Item extent across the scroll axis.
    #[must_use]
    pub const fn item_cross_extent(&self) -> f64 {
        self.item_cross
    }

    /// Size of a single item box.
    #[must_use]
    pub const fn item_size(&self) -> Size {
        self.orientation.size(self.item_main, self.item_cross)
    }

    /// Number of unfocused slots on each side of the focus slot.
    #[must_use]
    pub const fn unfocused_side_count(&self) -> usize {
        self.unfocused_side_count
    }

    /// Number of slots in the visible window.
    #[must_use]
    pub const fn visible_window_count(&self) -> usize {
        visible_window_count(self.unfocused_side_count)
    }

    /// Total extent of the viewport along the scroll axis.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.item_main * self.visible_window_count() as f64
    }

    /// Size of the whole viewport.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.orientation.size(self.viewport_extent(), self.item_cross)
    }

    /// Rect of a slot whose leading edge sits `main_offset` into the viewport.
    #[must_use]
    pub fn slot_rect(&self, main_offset: f64) -> Rect {
        let origin = self.orientation.point(main_offset, 0.0);
        Rect::from_origin_size(origin, self.item_size())
    }

    /// Rect of the focus slot, where hosts draw the focus indicator.
    #[must_use]
    pub fn focus_rect(&self) -> Rect {
        self.slot_rect(self.item_main * self.unfocused_side_count as f64)
    }
}
