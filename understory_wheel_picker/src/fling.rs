// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing where a drag or fling comes to rest.
//!
//! At gesture release the controller projects how far the strip would coast
//! under [`ExponentialDecay`], rounds that down to whole slots, and picks the
//! slot the focus must land on. Every motion episode then ends exactly on that
//! slot boundary, using a separately configured [`SnapCurve`] for the final
//! settle.
//!
//! ## Velocity convention
//!
//! Release velocities are pointer velocities along the scroll axis, in pixels
//! per second. Moving the pointer towards the viewport end (down, or right)
//! pulls earlier items into view, so a positive velocity lowers the focused
//! slot. Reverse layouts flip that.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::ScrollSlot;
use crate::animation::{ExponentialDecay, SpringConfig, TweenSpec};

/// Curve used for the final settle onto a slot boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapCurve {
    /// Spring towards the boundary, inheriting the approach velocity.
    Spring(SpringConfig),
    /// Fixed-duration tween towards the boundary.
    Tween(TweenSpec),
}

impl Default for SnapCurve {
    fn default() -> Self {
        Self::Spring(SpringConfig::default())
    }
}

/// Velocity regime of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlingRegime {
    /// Slow release: tween most of the way, then snap.
    LowVelocity,
    /// Fast release: coast under decay, then snap.
    HighVelocity,
}

/// Motion curves for the snap/fling behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapFlingSpecs {
    /// Approach used below [`Self::velocity_threshold`].
    pub low_velocity_approach: TweenSpec,
    /// Decay used to project fling distance and, at or above the threshold,
    /// to drive the approach.
    pub high_velocity_approach: ExponentialDecay,
    /// Final settle onto the slot boundary.
    pub snap: SnapCurve,
    /// Release speed separating the two regimes, in pixels per second.
    pub velocity_threshold: f64,
    /// Release speeds are clamped to this magnitude.
    pub max_velocity: f64,
}

impl Default for SnapFlingSpecs {
    fn default() -> Self {
        Self {
            low_velocity_approach: TweenSpec::default(),
            high_velocity_approach: ExponentialDecay::default(),
            snap: SnapCurve::default(),
            velocity_threshold: 400.0,
            max_velocity: 8_000.0,
        }
    }
}

/// Where a release will land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingPlan {
    /// Velocity regime of the release.
    pub regime: FlingRegime,
    /// Release velocity after clamping, in pointer space.
    pub velocity: f64,
    /// Whole slots the fling carries, in pointer space.
    pub slot_delta: i64,
    /// Slot the focus lands on.
    pub target_focus_slot: ScrollSlot,
}

impl FlingPlan {
    /// Returns `true` if the release snaps back onto the live slot.
    #[must_use]
    pub const fn is_snap_back(&self) -> bool {
        self.slot_delta == 0
    }
}

/// Whole slots covered by `distance` pixels, rounded towards zero.
///
/// Unmeasured or degenerate extents cover nothing.
#[must_use]
pub fn fling_slot_delta(distance: f64, item_extent: Option<f64>) -> i64 {
    let Some(extent) = item_extent.filter(|extent| *extent > 0.0) else {
        return 0;
    };
    if !distance.is_finite() {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Fling distances are bounded by max_velocity / friction"
    )]
    let slots = (distance.abs() / extent).floor() as i64;
    if distance < 0.0 { -slots } else { slots }
}

impl SnapFlingSpecs {
    /// Picks the resting slot for a release at `velocity`.
    ///
    /// `live_focus_slot` is the slot currently closest to the focus position.
    #[must_use]
    pub fn plan(
        &self,
        live_focus_slot: ScrollSlot,
        velocity: f64,
        item_extent: Option<f64>,
        reverse_layout: bool,
    ) -> FlingPlan {
        let velocity = if velocity.is_finite() {
            velocity.clamp(-self.max_velocity, self.max_velocity)
        } else {
            0.0
        };
        let regime = if velocity.abs() < self.velocity_threshold {
            FlingRegime::LowVelocity
        } else {
            FlingRegime::HighVelocity
        };
        let distance = self.high_velocity_approach.target_distance(velocity);
        let slot_delta = fling_slot_delta(distance, item_extent);
        let target_focus_slot = if reverse_layout {
            live_focus_slot + slot_delta
        } else {
            live_focus_slot - slot_delta
        };
        FlingPlan {
            regime,
            velocity,
            slot_delta,
            target_focus_slot,
        }
    }
}
