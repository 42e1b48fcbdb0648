// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item visual emphasis as a function of distance from the focus slot.
//!
//! For each rendered slot the mapper computes a continuous position relative
//! to the viewport, normalizes it to `[-1, 1]` with `0` at the focus center,
//! and hands that to an [`ItemShaper`] which produces an [`ItemTransform`].
//! Everything here is pure; hosts call it every frame.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Vec2};

use crate::ScrollSlot;
use crate::geometry::Orientation;

/// Position of `scroll_slot` relative to the viewport start, in slots.
///
/// `0` is the first visible slot's leading edge when the strip is at rest;
/// values grow towards the viewport end.
#[must_use]
pub fn relative_position(
    scroll_slot: ScrollSlot,
    first_visible_slot: ScrollSlot,
    first_slot_fraction: f64,
) -> f64 {
    (scroll_slot - first_visible_slot) as f64 - first_slot_fraction
}

/// Distance of `scroll_slot` from the focus center, normalized to `[-1, 1]`.
///
/// Returns `None` for slots outside `[-1, visible_window_count]`, which are
/// off-screen and need no transform. The focus slot at rest maps to `0`.
#[must_use]
pub fn normalized_relative_position(
    scroll_slot: ScrollSlot,
    first_visible_slot: ScrollSlot,
    first_slot_fraction: f64,
    visible_window_count: usize,
) -> Option<f64> {
    let relative = relative_position(scroll_slot, first_visible_slot, first_slot_fraction);
    let window = visible_window_count as f64;
    if !(-1.0..=window).contains(&relative) {
        return None;
    }
    Some((relative + 1.0) / (window + 1.0) * 2.0 - 1.0)
}

/// Visual emphasis applied to one item box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTransform {
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Uniform scale about the item center.
    pub scale: f64,
    /// Rotation around the cross axis, in degrees. Positive tilts the item's
    /// trailing edge away from the viewer.
    pub rotation_degrees: f64,
}

impl ItemTransform {
    /// No emphasis: fully opaque, unscaled, flat.
    pub const IDENTITY: Self = Self {
        alpha: 1.0,
        scale: 1.0,
        rotation_degrees: 0.0,
    };

    /// 2D approximation of this transform about `center`.
    ///
    /// The cross-axis rotation is projected as foreshortening along the main
    /// axis of `orientation`.
    #[must_use]
    pub fn to_affine(&self, center: Point, orientation: Orientation) -> Affine {
        let tilt = self.rotation_degrees.to_radians().cos().abs();
        let (sx, sy) = match orientation {
            Orientation::Vertical => (self.scale, self.scale * tilt),
            Orientation::Horizontal => (self.scale * tilt, self.scale),
        };
        let to_center = Vec2::new(center.x, center.y);
        Affine::translate(to_center)
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(-to_center)
    }
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Maps a normalized relative position to an [`ItemTransform`].
pub trait ItemShaper {
    /// Shapes the item at `normalized` distance from the focus center.
    fn shape(&self, normalized: f64) -> ItemTransform;
}

impl<F> ItemShaper for F
where
    F: Fn(f64) -> ItemTransform,
{
    fn shape(&self, normalized: f64) -> ItemTransform {
        self(normalized)
    }
}

/// How [`DefaultShaper`] turns distance into a coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Falloff {
    /// `max(1 - |n|, floor)`: linear falloff that stops at the floor.
    Clamp,
    /// `floor + (1 - floor) * (1 - |n|)`: the full falloff squeezed into
    /// `[floor, 1]`.
    Remap,
}

/// Built-in shaper applying one coefficient to opacity and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultShaper {
    /// Smallest coefficient, reached at the viewport edges.
    pub floor: f64,
    /// How distance maps onto `[floor, 1]`.
    pub falloff: Falloff,
    /// Rotation at `normalized == 1`, in degrees.
    pub max_rotation_degrees: f64,
}

impl DefaultShaper {
    /// Fade and shrink to 60% at the edges, no rotation.
    pub const CLAMPED: Self = Self {
        floor: 0.6,
        falloff: Falloff::Clamp,
        max_rotation_degrees: 0.0,
    };

    /// Fade and shrink to 50% across the window and tilt up to 60 degrees,
    /// for a drum-like look.
    pub const WHEEL: Self = Self {
        floor: 0.5,
        falloff: Falloff::Remap,
        max_rotation_degrees: 60.0,
    };

    /// Emphasis coefficient for `normalized` distance.
    #[must_use]
    pub fn coefficient(&self, normalized: f64) -> f64 {
        let closeness = 1.0 - normalized.abs().min(1.0);
        match self.falloff {
            Falloff::Clamp => closeness.max(self.floor),
            Falloff::Remap => self.floor + (1.0 - self.floor) * closeness,
        }
    }
}

impl Default for DefaultShaper {
    fn default() -> Self {
        Self::CLAMPED
    }
}

impl ItemShaper for DefaultShaper {
    fn shape(&self, normalized: f64) -> ItemTransform {
        let coefficient = self.coefficient(normalized);
        ItemTransform {
            alpha: coefficient,
            scale: coefficient,
            rotation_degrees: normalized.clamp(-1.0, 1.0) * self.max_rotation_degrees,
        }
    }
}

/// A slot the host should draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleItem {
    /// Slot in the scroll strip.
    pub scroll_slot: ScrollSlot,
    /// Logical item shown in the slot.
    pub index: usize,
    /// Distance from the focus center in `[-1, 1]`.
    pub normalized_position: f64,
    /// Item box in viewport coordinates, `None` until the viewport is measured.
    pub rect: Option<Rect>,
    /// Shaped emphasis; identity while unmeasured.
    pub transform: ItemTransform,
}

/// A [`VisibleItem`] paired with host-rendered content.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<T> {
    /// Placement and emphasis.
    pub item: VisibleItem,
    /// Content produced for `item.index`.
    pub content: T,
}
