// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated picker configuration.

use kurbo::Size;

use crate::error::PickerError;
use crate::fling::SnapFlingSpecs;
use crate::geometry::{Orientation, PickerGeometry};
use crate::slots::MAX_ITEM_COUNT;

/// Largest supported number of unfocused slots on either side of the focus.
pub const MAX_UNFOCUSED_SIDE_COUNT: usize = 1 << 16;

/// Configuration fixed for the lifetime of a picker, apart from the item count.
///
/// ```rust
/// use understory_wheel_picker::{Orientation, PickerConfig};
///
/// let config = PickerConfig::new(24, 3)
///     .unwrap()
///     .with_orientation(Orientation::Horizontal);
/// assert_eq!(config.visible_window_count(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPickerConfig")
)]
pub struct PickerConfig {
    item_count: usize,
    unfocused_side_count: usize,
    orientation: Orientation,
    reverse_layout: bool,
    item_size: Size,
    snap_fling: SnapFlingSpecs,
}

impl PickerConfig {
    /// Unfocused slots per side when not specified.
    pub const DEFAULT_UNFOCUSED_SIDE_COUNT: usize = 2;

    /// Item box size when not specified, in logical pixels.
    pub const DEFAULT_ITEM_SIZE: Size = Size::new(42.0, 42.0);

    /// Creates a vertical configuration with default sizing and motion.
    ///
    /// # Errors
    ///
    /// Fails if either count is too large for the slot space.
    pub fn new(item_count: usize, unfocused_side_count: usize) -> Result<Self, PickerError> {
        check_item_count(item_count)?;
        if unfocused_side_count > MAX_UNFOCUSED_SIDE_COUNT {
            return Err(PickerError::UnfocusedSideCountTooLarge {
                count: unfocused_side_count,
                max: MAX_UNFOCUSED_SIDE_COUNT,
            });
        }
        Ok(Self {
            item_count,
            unfocused_side_count,
            orientation: Orientation::default(),
            reverse_layout: false,
            item_size: Self::DEFAULT_ITEM_SIZE,
            snap_fling: SnapFlingSpecs::default(),
        })
    }

    /// Creates a configuration from signed counts, as handed over by bindings
    /// that cannot express unsigned integers.
    ///
    /// # Errors
    ///
    /// Fails if either count is negative or too large.
    pub fn from_signed(item_count: i64, unfocused_side_count: i64) -> Result<Self, PickerError> {
        let item_count =
            usize::try_from(item_count).map_err(|_| PickerError::NegativeItemCount(item_count))?;
        let unfocused_side_count = usize::try_from(unfocused_side_count)
            .map_err(|_| PickerError::NegativeUnfocusedSideCount(unfocused_side_count))?;
        Self::new(item_count, unfocused_side_count)
    }

    /// Sets the scroll axis.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Lays items out from the viewport end instead of the start.
    #[must_use]
    pub const fn with_reverse_layout(mut self, reverse_layout: bool) -> Self {
        self.reverse_layout = reverse_layout;
        self
    }

    /// Sets the item box size. Negative extents are clamped to zero.
    #[must_use]
    pub fn with_item_size(mut self, item_size: Size) -> Self {
        self.item_size = Size::new(item_size.width.max(0.0), item_size.height.max(0.0));
        self
    }

    /// Sets the snap and fling curves.
    #[must_use]
    pub const fn with_snap_fling(mut self, snap_fling: SnapFlingSpecs) -> Self {
        self.snap_fling = snap_fling;
        self
    }

    /// Number of logical items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of unfocused slots on each side of the focus slot.
    #[must_use]
    pub const fn unfocused_side_count(&self) -> usize {
        self.unfocused_side_count
    }

    /// Number of slots in the visible window.
    #[must_use]
    pub const fn visible_window_count(&self) -> usize {
        crate::geometry::visible_window_count(self.unfocused_side_count)
    }

    /// Scroll axis.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether items are laid out from the viewport end.
    #[must_use]
    pub const fn reverse_layout(&self) -> bool {
        self.reverse_layout
    }

    /// Item box size.
    #[must_use]
    pub const fn item_size(&self) -> Size {
        self.item_size
    }

    /// Item extent along the scroll axis.
    #[must_use]
    pub const fn item_main_extent(&self) -> f64 {
        self.orientation.main_axis(self.item_size)
    }

    /// Snap and fling curves.
    #[must_use]
    pub const fn snap_fling(&self) -> &SnapFlingSpecs {
        &self.snap_fling
    }

    /// Viewport geometry for this configuration.
    #[must_use]
    pub fn geometry(&self) -> PickerGeometry {
        PickerGeometry::new(self.item_size, self.orientation, self.unfocused_side_count)
    }

    pub(crate) fn set_item_count(&mut self, item_count: usize) -> Result<(), PickerError> {
        check_item_count(item_count)?;
        self.item_count = item_count;
        Ok(())
    }
}

/// Unvalidated wire form of [`PickerConfig`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPickerConfig {
    item_count: usize,
    unfocused_side_count: usize,
    orientation: Orientation,
    reverse_layout: bool,
    item_size: Size,
    snap_fling: SnapFlingSpecs,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPickerConfig> for PickerConfig {
    type Error = PickerError;

    fn try_from(raw: RawPickerConfig) -> Result<Self, PickerError> {
        Ok(Self::new(raw.item_count, raw.unfocused_side_count)?
            .with_orientation(raw.orientation)
            .with_reverse_layout(raw.reverse_layout)
            .with_item_size(raw.item_size)
            .with_snap_fling(raw.snap_fling))
    }
}

fn check_item_count(item_count: usize) -> Result<(), PickerError> {
    if item_count > MAX_ITEM_COUNT {
        return Err(PickerError::ItemCountTooLarge {
            count: item_count,
            max: MAX_ITEM_COUNT,
        });
    }
    Ok(())
}
