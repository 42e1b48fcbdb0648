// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Wheel Picker: the position engine behind circular wheel pickers.
//!
//! A wheel picker shows a fixed window of `2k + 1` slots over a finite list of
//! items and lets the user scroll it endlessly in either direction: after the
//! last item comes the first again. The slot in the middle of the window is the
//! *focus slot* and holds the selected item.
//!
//! This crate is the renderer-agnostic core of such a widget:
//!
//! - [`SlotSpace`]: maps the unbounded slot strip ([`ScrollSlot`]) onto logical
//!   item indices by wrapping, and picks where a picker starts so it can scroll
//!   a long way in both directions.
//! - [`PickerGeometry`]: viewport size, slot rects, and the focus rect for a
//!   given item size, [`Orientation`], and unfocused side count.
//! - [`WheelPickerState`]: the controller. It owns a [`SlotViewport`], tracks
//!   the live and settled indices, runs drags and animated scrolls, and always
//!   comes to rest with an item exactly in the focus slot.
//! - [`SnapFlingSpecs`]: how a released drag is turned into motion. Slow
//!   releases tween towards the target, fast ones coast under exponential
//!   friction, and both finish with a snap [`Spring`] or [`Tween`].
//! - [`ItemShaper`] / [`DefaultShaper`]: per-item opacity, scale and tilt as a
//!   function of distance from the focus slot.
//!
//! The crate does not know about widgets or drawing. Host frameworks are
//! responsible for:
//!
//! - Forwarding pointer input through [`WheelPickerState::drag_by`] and
//!   [`WheelPickerState::end_drag`].
//! - Calling [`WheelPickerState::tick`] once per frame while
//!   [`WheelPickerState::is_moving`] is `true`.
//! - Drawing [`WheelPickerState::visible_items`] with the returned rects and
//!   transforms, and a focus indicator at [`PickerGeometry::focus_rect`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_wheel_picker::{DefaultShaper, PickerEvent, WheelPickerState};
//!
//! // 24 hours, two unfocused slots on each side, starting at 9.
//! let mut picker = WheelPickerState::create(24, 9, 2).unwrap();
//! picker.subscribe(|event| {
//!     if let PickerEvent::SettledIndexChanged { index, .. } = event {
//!         // Commit the selection.
//!         let _ = index;
//!     }
//! });
//!
//! // The user drags the wheel up by a bit more than one item and lets go.
//! picker.drag_by(-50.0);
//! picker.end_drag(0.0);
//! while picker.is_moving() {
//!     picker.tick(1.0 / 60.0);
//! }
//! assert_eq!(picker.settled_index(), Some(10));
//!
//! for item in picker.visible_items(&DefaultShaper::WHEEL) {
//!     let _rect = item.rect.unwrap();
//!     let _alpha = item.transform.alpha;
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when
//! building without `std`.

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod error;
mod events;
mod fling;
mod geometry;
mod motion;
mod slots;
mod snapshot;
mod state;
mod transform;
mod viewport;

pub use animation::{Easing, ExponentialDecay, Spring, SpringConfig, Tween, TweenSpec};
pub use config::{MAX_UNFOCUSED_SIDE_COUNT, PickerConfig};
pub use error::PickerError;
pub use events::{AnimationId, ListenerId, PickerChanges, PickerEvent};
pub use fling::{FlingPlan, FlingRegime, SnapCurve, SnapFlingSpecs, fling_slot_delta};
pub use geometry::{Orientation, PickerGeometry, visible_window_count};
pub use slots::{MAX_ITEM_COUNT, SLOT_BASE, ScrollSlot, SlotSpace};
pub use snapshot::PickerSnapshot;
pub use state::WheelPickerState;
pub use transform::{
    DefaultShaper, Falloff, ItemShaper, ItemTransform, RenderedItem, VisibleItem,
    normalized_relative_position, relative_position,
};
pub use viewport::{FixedSlotViewport, SlotPosition, SlotViewport};
