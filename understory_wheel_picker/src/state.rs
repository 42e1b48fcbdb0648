// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picker controller: position tracking, commands, and settling.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::ScrollSlot;
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::events::{AnimationId, ListenerId, Listeners, PickerChanges, PickerEvent};
use crate::fling::{FlingPlan, FlingRegime};
use crate::geometry::PickerGeometry;
use crate::motion::SlotMotion;
use crate::slots::{SlotSpace, to_slot};
use crate::snapshot::PickerSnapshot;
use crate::transform::{
    ItemShaper, ItemTransform, RenderedItem, VisibleItem, normalized_relative_position,
    relative_position,
};
use crate::viewport::{FixedSlotViewport, SlotPosition, SlotViewport};

/// Changes accumulated by one operation, emitted to listeners at the end.
#[derive(Debug, Default)]
struct Batch {
    changes: PickerChanges,
    events: SmallVec<[PickerEvent; 6]>,
}

impl Batch {
    fn push(&mut self, event: PickerEvent, change: PickerChanges) {
        self.events.push(event);
        self.changes |= change;
    }
}

#[derive(Clone, Copy, Debug)]
enum MotionKind {
    Snap,
    Decay,
    Approach,
}

/// Scroll position tracker for a circular wheel picker.
///
/// The state owns a [`SlotViewport`] and drives it: commands start, replace,
/// or cancel motion, [`tick`](Self::tick) advances it, and the two observable
/// indices are recomputed as the position moves.
///
/// - The *live index* is the best estimate of the item nearest the focus slot,
///   updated on every position change.
/// - The *settled index* only changes when the picker comes to rest on a slot
///   boundary. An animation that is cancelled never settles on its target.
///
/// ```rust
/// use understory_wheel_picker::{PickerConfig, WheelPickerState};
///
/// let config = PickerConfig::new(50, 2).unwrap();
/// let mut picker = WheelPickerState::new(config, 25);
/// assert_eq!(picker.settled_index(), Some(25));
///
/// picker.animate_scroll_to_index(49);
/// while picker.is_moving() {
///     picker.tick(1.0 / 60.0);
/// }
/// assert_eq!(picker.settled_index(), Some(49));
/// ```
#[derive(Debug)]
pub struct WheelPickerState<V: SlotViewport = FixedSlotViewport> {
    config: PickerConfig,
    viewport: V,
    settled_index: Option<usize>,
    live_index: Option<usize>,
    moving: bool,
    dragging: bool,
    motion: Option<SlotMotion>,
    next_animation: u64,
    listeners: Listeners,
}

impl WheelPickerState {
    /// Creates a picker with `start_index` in the focus slot.
    ///
    /// The viewport is measured from the configured item size. Indices past
    /// the end wrap onto the item they alias.
    #[must_use]
    pub fn new(config: PickerConfig, start_index: usize) -> Self {
        let viewport = FixedSlotViewport::new(config.item_main_extent());
        Self::with_viewport(config, viewport, start_index)
    }

    /// Creates a vertical picker with default sizing from raw counts.
    ///
    /// # Errors
    ///
    /// Fails if either count is out of range.
    pub fn create(
        item_count: usize,
        start_index: usize,
        unfocused_side_count: usize,
    ) -> Result<Self, PickerError> {
        let config = PickerConfig::new(item_count, unfocused_side_count)?;
        Ok(Self::new(config, start_index))
    }

    /// Rebuilds an idle picker from a [`PickerSnapshot`].
    ///
    /// # Errors
    ///
    /// Fails if the snapshot is inconsistent or its counts are out of range.
    pub fn restore(snapshot: &PickerSnapshot) -> Result<Self, PickerError> {
        snapshot.validate()?;
        let config = PickerConfig::new(snapshot.item_count, snapshot.unfocused_side_count)?;
        Ok(Self::new(config, snapshot.index))
    }
}

impl<V: SlotViewport> WheelPickerState<V> {
    /// Creates a picker over a host-provided viewport.
    ///
    /// The viewport is repositioned so `start_index` sits in the focus slot.
    pub fn with_viewport(config: PickerConfig, mut viewport: V, start_index: usize) -> Self {
        let space = SlotSpace::new(config.item_count());
        let settled_index =
            match space.initial_scroll_slot(start_index, config.unfocused_side_count()) {
                Some(first) => {
                    viewport.set_position(SlotPosition::at_slot(first));
                    space.logical_index(first + to_slot(config.unfocused_side_count()))
                }
                None => None,
            };
        Self {
            config,
            viewport,
            settled_index,
            live_index: settled_index,
            moving: false,
            dragging: false,
            motion: None,
            next_animation: 0,
            listeners: Listeners::default(),
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Geometry of the viewport, using the measured item extent if there is one.
    #[must_use]
    pub fn geometry(&self) -> PickerGeometry {
        let configured = self.config.geometry();
        match self.viewport.item_extent() {
            Some(extent) => PickerGeometry::from_extents(
                extent,
                configured.item_cross_extent(),
                configured.orientation(),
                configured.unfocused_side_count(),
            ),
            None => configured,
        }
    }

    /// The viewport backing this picker.
    #[must_use]
    pub const fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the viewport, for remeasuring.
    ///
    /// Call [`sync_from_viewport`](Self::sync_from_viewport) after changing
    /// the position or extent from outside.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Number of logical items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.config.item_count()
    }

    /// Index the picker last came to rest on, `None` for an empty picker.
    #[must_use]
    pub const fn settled_index(&self) -> Option<usize> {
        self.settled_index
    }

    /// Item currently nearest the focus slot, `None` for an empty picker.
    #[must_use]
    pub const fn live_index(&self) -> Option<usize> {
        self.live_index
    }

    /// Whether a drag or animation is in progress.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current scroll position.
    #[must_use]
    pub fn position(&self) -> SlotPosition {
        self.viewport.position()
    }

    /// Slot whose leading edge is at or before the viewport start.
    #[must_use]
    pub fn first_visible_slot(&self) -> ScrollSlot {
        self.viewport.position().first_slot
    }

    /// Continuous slot coordinate of the viewport start.
    #[must_use]
    pub fn fractional_slot(&self) -> f64 {
        self.viewport
            .position()
            .fractional_slot(self.viewport.item_extent())
    }

    /// The in-flight animation, if any.
    #[must_use]
    pub fn active_animation(&self) -> Option<AnimationId> {
        self.motion.as_ref().map(SlotMotion::id)
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Registers a listener for [`PickerEvent`]s.
    pub fn subscribe(&mut self, listener: impl FnMut(&PickerEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Persistable summary of the index the picker rests on.
    #[must_use]
    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            item_count: self.config.item_count(),
            unfocused_side_count: self.config.unfocused_side_count(),
            index: self.settled_index.or(self.live_index).unwrap_or(0),
        }
    }

    /// Jumps so `index` is in the focus slot, without animating.
    ///
    /// Any motion is cancelled and the picker settles immediately. Indices
    /// past the end wrap. Does nothing for an empty picker.
    pub fn scroll_to_index(&mut self, index: usize) -> PickerChanges {
        let mut batch = Batch::default();
        if let Some(target) = self.slots().nearest_slot_for_index(self.focus_slot(), index) {
            self.cancel_motion(&mut batch);
            self.dragging = false;
            self.jump_to(self.first_for_focus(target), &mut batch);
            self.come_to_rest(&mut batch);
        }
        self.flush(batch)
    }

    /// Animates so `index` ends up in the focus slot.
    ///
    /// Takes the shorter way round the wheel. An in-flight animation is
    /// cancelled and its velocity carried over. Returns `None` for an empty
    /// picker.
    pub fn animate_scroll_to_index(&mut self, index: usize) -> Option<AnimationId> {
        let target = self
            .slots()
            .nearest_slot_for_index(self.live_focus_slot(), index)?;
        let mut batch = Batch::default();
        let velocity = self.cancel_motion(&mut batch);
        self.dragging = false;
        let id = self.launch(self.first_for_focus(target), velocity, MotionKind::Snap, &mut batch);
        self.flush(batch);
        Some(id)
    }

    /// Animates a relative scroll of `pixels`, ending on the nearest slot
    /// boundary. Returns `None` for an empty picker.
    pub fn animate_scroll_by(&mut self, pixels: f64) -> Option<AnimationId> {
        if self.slots().is_empty() {
            return None;
        }
        let mut batch = Batch::default();
        let velocity = self.cancel_motion(&mut batch);
        self.dragging = false;
        let extent = self.viewport.item_extent();
        let landing = self.viewport.position().offset_by(pixels, extent);
        let target = nearest_boundary(landing, extent);
        let id = self.launch(target, velocity, MotionKind::Snap, &mut batch);
        self.flush(batch);
        Some(id)
    }

    /// Starts a drag, cancelling any animation.
    pub fn begin_drag(&mut self) -> PickerChanges {
        let mut batch = Batch::default();
        if !self.slots().is_empty() {
            self.cancel_motion(&mut batch);
            self.dragging = true;
            self.start_moving(&mut batch);
        }
        self.flush(batch)
    }

    /// Moves the strip with the pointer by `pointer_delta` pixels.
    ///
    /// Positive deltas point down (or right); content follows the pointer, so
    /// earlier items come into view. Starts a drag if none is active.
    pub fn drag_by(&mut self, pointer_delta: f64) -> PickerChanges {
        let mut batch = Batch::default();
        if self.slots().is_empty() {
            return self.flush(batch);
        }
        if !self.dragging {
            self.cancel_motion(&mut batch);
            self.dragging = true;
            self.start_moving(&mut batch);
        }
        let delta = self.scroll_delta(pointer_delta);
        let before = self.viewport.position();
        self.viewport.scroll_by(delta);
        if self.viewport.position() != before {
            batch.changes |= PickerChanges::POSITION;
        }
        trace!(delta, position = ?self.viewport.position(), "drag");
        self.update_live(&mut batch);
        self.flush(batch)
    }

    /// Releases the drag with the pointer `velocity` in pixels per second and
    /// starts the snap/fling animation.
    ///
    /// Can be called without a preceding drag to fling from rest. Returns
    /// `None` for an empty picker.
    pub fn end_drag(&mut self, velocity: f64) -> Option<AnimationId> {
        if self.slots().is_empty() {
            return None;
        }
        let mut batch = Batch::default();
        self.cancel_motion(&mut batch);
        self.dragging = false;
        let plan = self.plan_fling(velocity);
        let kind = match plan.regime {
            FlingRegime::LowVelocity => MotionKind::Approach,
            FlingRegime::HighVelocity => MotionKind::Decay,
        };
        let scroll_velocity = self.scroll_delta(plan.velocity);
        let id = self.launch(
            self.first_for_focus(plan.target_focus_slot),
            scroll_velocity,
            kind,
            &mut batch,
        );
        self.flush(batch);
        Some(id)
    }

    /// The fling a release at `velocity` would start from the current position.
    #[must_use]
    pub fn plan_fling(&self, velocity: f64) -> FlingPlan {
        self.config.snap_fling().plan(
            self.live_focus_slot(),
            velocity,
            self.viewport.item_extent(),
            self.config.reverse_layout(),
        )
    }

    /// Advances the active animation by `dt` seconds.
    ///
    /// Negative or non-finite steps advance nothing.
    pub fn tick(&mut self, dt: f64) -> PickerChanges {
        let mut batch = Batch::default();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.follow_remeasure(&mut batch);
        let Some(motion) = self.motion.as_mut() else {
            return self.flush(batch);
        };
        motion.step(dt);
        let position = motion.position();
        let finished = motion.is_done().then_some(motion.id());
        self.set_position(position, &mut batch);
        trace!(dt, ?position, "tick");
        self.update_live(&mut batch);
        if let Some(id) = finished {
            self.motion = None;
            batch.push(PickerEvent::AnimationFinished(id), PickerChanges::empty());
            self.come_to_rest(&mut batch);
        }
        self.flush(batch)
    }

    /// Changes the number of items.
    ///
    /// Motion is cancelled. The settled index is clamped into the new range
    /// and the viewport is re-anchored on it.
    ///
    /// # Errors
    ///
    /// Fails if `item_count` is too large; the picker is left unchanged.
    pub fn set_item_count(&mut self, item_count: usize) -> Result<PickerChanges, PickerError> {
        if item_count == self.config.item_count() {
            return Ok(PickerChanges::empty());
        }
        self.config.set_item_count(item_count)?;
        let mut batch = Batch::default();
        self.cancel_motion(&mut batch);
        self.dragging = false;
        let kept = item_count
            .checked_sub(1)
            .map(|last| self.settled_index.unwrap_or(0).min(last));
        if let Some(first) = kept.and_then(|index| {
            self.slots()
                .initial_scroll_slot(index, self.config.unfocused_side_count())
        }) {
            self.jump_to(first, &mut batch);
        }
        self.update_live(&mut batch);
        self.come_to_rest(&mut batch);
        debug!(item_count, settled = ?self.settled_index, "item count changed");
        Ok(self.flush(batch))
    }

    /// Recomputes the indices after the viewport was changed from outside.
    ///
    /// An in-flight animation follows a new item extent. An idle picker left
    /// between two slots snaps to the nearer one.
    pub fn sync_from_viewport(&mut self) -> PickerChanges {
        let mut batch = Batch::default();
        self.follow_remeasure(&mut batch);
        self.update_live(&mut batch);
        if !self.moving {
            let position = self.viewport.position();
            if position.is_snapped() || self.slots().is_empty() {
                self.settle(&mut batch);
            } else {
                let target = nearest_boundary(position, self.viewport.item_extent());
                self.launch(target, 0.0, MotionKind::Snap, &mut batch);
            }
        }
        self.flush(batch)
    }

    /// Slots that intersect the viewport, with placement and shaped emphasis.
    ///
    /// Includes the partially visible slot on either side while scrolling.
    /// Without a measured extent, rects are `None` and transforms identity.
    pub fn visible_items(&self, shaper: &impl ItemShaper) -> SmallVec<[VisibleItem; 8]> {
        let mut items = SmallVec::new();
        let slots = self.slots();
        if slots.is_empty() {
            return items;
        }
        let extent = self.viewport.item_extent();
        let position = self.viewport.position();
        let fraction = position.fraction(extent);
        let geometry = self.geometry();
        let window = geometry.visible_window_count();
        let first = position.first_slot;
        for scroll_slot in first - 1..=first + to_slot(window) {
            let Some(normalized_position) =
                normalized_relative_position(scroll_slot, first, fraction, window)
            else {
                continue;
            };
            let Some(index) = slots.logical_index(scroll_slot) else {
                continue;
            };
            let rect = extent.map(|extent| {
                let relative = relative_position(scroll_slot, first, fraction);
                self.slot_rect(&geometry, relative, extent)
            });
            let transform = if extent.is_some() {
                shaper.shape(normalized_position)
            } else {
                ItemTransform::IDENTITY
            };
            items.push(VisibleItem {
                scroll_slot,
                index,
                normalized_position,
                rect,
                transform,
            });
        }
        items
    }

    /// Pairs each visible item with host content for its logical index.
    pub fn render_items<T>(
        &self,
        shaper: &impl ItemShaper,
        mut content: impl FnMut(usize) -> T,
    ) -> Vec<RenderedItem<T>> {
        self.visible_items(shaper)
            .into_iter()
            .map(|item| RenderedItem {
                content: content(item.index),
                item,
            })
            .collect()
    }

    fn slot_rect(&self, geometry: &PickerGeometry, relative: f64, extent: f64) -> Rect {
        let main_offset = if self.config.reverse_layout() {
            geometry.viewport_extent() - (relative + 1.0) * extent
        } else {
            relative * extent
        };
        geometry.slot_rect(main_offset)
    }

    fn slots(&self) -> SlotSpace {
        SlotSpace::new(self.config.item_count())
    }

    fn side_count(&self) -> ScrollSlot {
        to_slot(self.config.unfocused_side_count())
    }

    fn focus_slot(&self) -> ScrollSlot {
        self.viewport.position().first_slot + self.side_count()
    }

    fn first_for_focus(&self, focus_slot: ScrollSlot) -> ScrollSlot {
        focus_slot - self.side_count()
    }

    /// Focus slot of the item currently covering most of the focus box.
    fn live_focus_slot(&self) -> ScrollSlot {
        let position = self.viewport.position();
        let past_half = position.fraction(self.viewport.item_extent()) >= 0.5;
        self.focus_slot() + ScrollSlot::from(past_half)
    }

    fn scroll_delta(&self, pointer_delta: f64) -> f64 {
        if self.config.reverse_layout() {
            pointer_delta
        } else {
            -pointer_delta
        }
    }

    fn next_animation_id(&mut self) -> AnimationId {
        self.next_animation += 1;
        AnimationId(self.next_animation)
    }

    fn launch(
        &mut self,
        target_first_slot: ScrollSlot,
        velocity: f64,
        kind: MotionKind,
        batch: &mut Batch,
    ) -> AnimationId {
        let id = self.next_animation_id();
        self.start_moving(batch);
        let Some(extent) = self.viewport.item_extent() else {
            // Nothing to interpolate in; land on the target directly.
            self.jump_to(target_first_slot, batch);
            batch.push(PickerEvent::AnimationFinished(id), PickerChanges::empty());
            self.come_to_rest(batch);
            return id;
        };
        let from = self.viewport.position();
        let specs = *self.config.snap_fling();
        let motion = match kind {
            MotionKind::Snap => {
                SlotMotion::snap(id, from, target_first_slot, extent, velocity, specs.snap)
            }
            MotionKind::Decay => SlotMotion::decay(
                id,
                from,
                target_first_slot,
                extent,
                velocity,
                specs.high_velocity_approach,
                specs.snap,
            ),
            MotionKind::Approach => SlotMotion::approach(
                id,
                from,
                target_first_slot,
                extent,
                velocity,
                specs.low_velocity_approach,
                specs.snap,
            ),
        };
        debug!(id = id.get(), ?kind, target_first_slot, velocity, "animation started");
        if motion.is_done() {
            self.set_position(motion.position(), batch);
            self.update_live(batch);
            batch.push(PickerEvent::AnimationFinished(id), PickerChanges::empty());
            self.come_to_rest(batch);
        } else {
            self.motion = Some(motion);
        }
        id
    }

    /// Keeps the in-flight animation in step with the viewport's item extent.
    fn follow_remeasure(&mut self, batch: &mut Batch) {
        let measured = self.viewport.item_extent();
        let from = self.viewport.position();
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        if measured == Some(motion.item_extent()) {
            return;
        }
        if let Some(extent) = measured {
            trace!(id = motion.id().get(), extent, "animation remeasured");
            motion.remeasure(from, extent);
            return;
        }
        let id = motion.id();
        let target = motion.target_first_slot();
        self.motion = None;
        self.jump_to(target, batch);
        batch.push(PickerEvent::AnimationFinished(id), PickerChanges::empty());
        self.come_to_rest(batch);
    }

    /// Drops the in-flight animation and returns its velocity.
    fn cancel_motion(&mut self, batch: &mut Batch) -> f64 {
        let Some(motion) = self.motion.take() else {
            return 0.0;
        };
        debug!(id = motion.id().get(), "animation cancelled");
        batch.push(
            PickerEvent::AnimationCancelled(motion.id()),
            PickerChanges::empty(),
        );
        motion.velocity()
    }

    fn jump_to(&mut self, first_slot: ScrollSlot, batch: &mut Batch) {
        self.set_position(SlotPosition::at_slot(first_slot), batch);
        self.update_live(batch);
    }

    fn set_position(&mut self, position: SlotPosition, batch: &mut Batch) {
        if self.viewport.position() != position {
            self.viewport.set_position(position);
            batch.changes |= PickerChanges::POSITION;
        }
    }

    fn start_moving(&mut self, batch: &mut Batch) {
        if !self.moving {
            self.moving = true;
            batch.push(PickerEvent::MotionStarted, PickerChanges::MOTION);
        }
    }

    fn come_to_rest(&mut self, batch: &mut Batch) {
        let was_moving = core::mem::replace(&mut self.moving, false);
        self.settle(batch);
        if was_moving {
            batch.push(PickerEvent::MotionStopped, PickerChanges::MOTION);
        }
    }

    fn update_live(&mut self, batch: &mut Batch) {
        let index = self.slots().logical_index(self.live_focus_slot());
        if index != self.live_index {
            self.live_index = index;
            batch.push(
                PickerEvent::LiveIndexChanged { index },
                PickerChanges::LIVE_INDEX,
            );
        }
    }

    fn settle(&mut self, batch: &mut Batch) {
        let index = self.slots().logical_index(self.focus_slot());
        if index != self.settled_index {
            let previous = core::mem::replace(&mut self.settled_index, index);
            debug!(?previous, ?index, "settled index changed");
            batch.push(
                PickerEvent::SettledIndexChanged { previous, index },
                PickerChanges::SETTLED_INDEX,
            );
        }
    }

    fn flush(&mut self, batch: Batch) -> PickerChanges {
        for event in &batch.events {
            self.listeners.emit(event);
        }
        batch.changes
    }
}

/// First slot of the boundary nearest `position`.
fn nearest_boundary(position: SlotPosition, item_extent: Option<f64>) -> ScrollSlot {
    position.first_slot + ScrollSlot::from(position.fraction(item_extent) >= 0.5)
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Size;

    use super::WheelPickerState;
    use crate::config::PickerConfig;
    use crate::events::{PickerChanges, PickerEvent};
    use crate::snapshot::PickerSnapshot;
    use crate::transform::{DefaultShaper, ItemTransform};
    use crate::viewport::{FixedSlotViewport, SlotPosition, SlotViewport};

    const FRAME: f64 = 1.0 / 60.0;

    fn picker(count: usize, start: usize, side: usize) -> WheelPickerState {
        WheelPickerState::create(count, start, side).unwrap()
    }

    fn run_to_rest<V: SlotViewport>(picker: &mut WheelPickerState<V>) {
        let mut frames = 0;
        while picker.active_animation().is_some() {
            picker.tick(FRAME);
            frames += 1;
            assert!(frames < 10_000, "picker never came to rest");
        }
    }

    fn record<V: SlotViewport>(picker: &mut WheelPickerState<V>) -> Rc<RefCell<Vec<PickerEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        picker.subscribe(move |event| sink.borrow_mut().push(*event));
        log
    }

    #[test]
    fn starts_settled_on_the_start_index() {
        let picker = picker(50, 25, 2);
        assert_eq!(picker.settled_index(), Some(25));
        assert_eq!(picker.live_index(), Some(25));
        assert!(!picker.is_moving());
        assert!(picker.position().is_snapped());
    }

    #[test]
    fn start_index_past_the_end_wraps() {
        let picker = picker(10, 23, 2);
        assert_eq!(picker.settled_index(), Some(3));
    }

    #[test]
    fn cancelled_animation_never_settles_on_its_target() {
        let mut picker = picker(50, 25, 2);
        let log = record(&mut picker);
        let first = picker.animate_scroll_to_index(49).unwrap();
        picker.tick(FRAME);
        let second = picker.animate_scroll_to_index(0).unwrap();
        assert_ne!(first, second);
        run_to_rest(&mut picker);

        assert_eq!(picker.settled_index(), Some(0));
        let log = log.borrow();
        assert!(log.contains(&PickerEvent::AnimationCancelled(first)));
        assert!(log.contains(&PickerEvent::AnimationFinished(second)));
        assert!(!log.contains(&PickerEvent::AnimationFinished(first)));
        let settled: Vec<_> = log
            .iter()
            .filter_map(|event| match event {
                PickerEvent::SettledIndexChanged { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(settled, [Some(0)]);
    }

    #[test]
    fn scroll_to_index_is_idempotent() {
        let mut picker = picker(12, 0, 2);
        let changes = picker.scroll_to_index(7);
        assert!(changes.contains(PickerChanges::SETTLED_INDEX));
        let position = picker.position();
        let again = picker.scroll_to_index(7);
        assert_eq!(picker.settled_index(), Some(7));
        assert_eq!(picker.position(), position);
        assert!(again.is_empty());
    }

    #[test]
    fn scroll_to_index_wraps_and_cancels_motion() {
        let mut picker = picker(12, 0, 2);
        let log = record(&mut picker);
        let id = picker.animate_scroll_to_index(6).unwrap();
        picker.scroll_to_index(15);
        assert_eq!(picker.settled_index(), Some(3));
        assert_eq!(picker.active_animation(), None);
        assert!(!picker.is_moving());
        let log = log.borrow();
        assert_eq!(log.first(), Some(&PickerEvent::MotionStarted));
        assert!(log.contains(&PickerEvent::AnimationCancelled(id)));
        assert_eq!(log.last(), Some(&PickerEvent::MotionStopped));
    }

    #[test]
    fn empty_picker_ignores_commands() {
        let mut picker = picker(0, 0, 2);
        assert_eq!(picker.settled_index(), None);
        assert_eq!(picker.live_index(), None);
        assert!(picker.scroll_to_index(5).is_empty());
        assert_eq!(picker.animate_scroll_to_index(5), None);
        assert_eq!(picker.animate_scroll_by(100.0), None);
        assert!(picker.drag_by(30.0).is_empty());
        assert_eq!(picker.end_drag(5_000.0), None);
        assert!(!picker.is_moving());
        assert!(picker.visible_items(&DefaultShaper::CLAMPED).is_empty());
        assert_eq!(picker.settled_index(), None);
    }

    #[test]
    fn slow_release_snaps_to_the_live_item() {
        let mut picker = picker(50, 25, 2);
        // Pointer up by 50px at 42px slots moves the content forward a bit
        // more than one slot.
        picker.begin_drag();
        let changes = picker.drag_by(-50.0);
        assert!(changes.contains(PickerChanges::POSITION | PickerChanges::LIVE_INDEX));
        assert_eq!(picker.live_index(), Some(26));
        assert_eq!(picker.settled_index(), Some(25));

        let plan = picker.plan_fling(100.0);
        assert!(plan.is_snap_back());
        picker.end_drag(100.0);
        run_to_rest(&mut picker);
        assert_eq!(picker.settled_index(), Some(26));
        assert!(picker.position().is_snapped());
    }

    #[test]
    fn drag_past_half_a_slot_changes_the_live_index() {
        let mut picker = picker(50, 25, 2);
        picker.drag_by(-20.0);
        assert_eq!(picker.live_index(), Some(25));
        picker.drag_by(-1.0);
        assert_eq!(picker.live_index(), Some(26));
        picker.drag_by(30.0);
        assert_eq!(picker.live_index(), Some(25));
        assert!(picker.is_dragging());
    }

    #[test]
    fn fast_fling_travels_against_the_pointer() {
        let mut picker = picker(50, 25, 2);
        picker.begin_drag();
        let plan = picker.plan_fling(2_000.0);
        assert!(plan.slot_delta > 0);
        picker.end_drag(2_000.0);
        run_to_rest(&mut picker);
        let expected = (25 - plan.slot_delta).rem_euclid(50);
        assert_eq!(picker.settled_index(), usize::try_from(expected).ok());
        assert!(picker.position().is_snapped());
    }

    #[test]
    fn reverse_layout_flips_pointer_direction() {
        let config = PickerConfig::new(50, 2).unwrap().with_reverse_layout(true);
        let mut picker = WheelPickerState::new(config, 25);
        picker.drag_by(50.0);
        assert_eq!(picker.live_index(), Some(26));
        picker.end_drag(0.0);
        run_to_rest(&mut picker);
        assert_eq!(picker.settled_index(), Some(26));

        let plan = picker.plan_fling(2_000.0);
        picker.end_drag(2_000.0);
        run_to_rest(&mut picker);
        let expected = (26 + plan.slot_delta).rem_euclid(50);
        assert_eq!(picker.settled_index(), usize::try_from(expected).ok());
    }

    #[test]
    fn shrinking_the_count_clamps_the_settled_index() {
        let mut picker = picker(50, 30, 2);
        let changes = picker.set_item_count(10).unwrap();
        assert!(changes.contains(PickerChanges::SETTLED_INDEX));
        assert_eq!(picker.settled_index(), Some(9));
        assert_eq!(picker.live_index(), Some(9));

        picker.set_item_count(0).unwrap();
        assert_eq!(picker.settled_index(), None);
        assert_eq!(picker.live_index(), None);

        picker.set_item_count(4).unwrap();
        assert_eq!(picker.settled_index(), Some(0));
    }

    #[test]
    fn count_change_cancels_motion() {
        let mut picker = picker(50, 30, 2);
        picker.animate_scroll_to_index(40);
        picker.tick(FRAME);
        picker.set_item_count(45).unwrap();
        assert_eq!(picker.active_animation(), None);
        assert!(!picker.is_moving());
        assert_eq!(picker.settled_index(), Some(30));
        assert!(picker.position().is_snapped());
    }

    #[test]
    fn single_slot_window() {
        let mut picker = picker(5, 4, 0);
        assert_eq!(picker.settled_index(), Some(4));
        picker.animate_scroll_to_index(1);
        run_to_rest(&mut picker);
        assert_eq!(picker.settled_index(), Some(1));
        let items = picker.visible_items(&DefaultShaper::CLAMPED);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].index, 1);
        assert_eq!(items[1].normalized_position, 0.0);
    }

    #[test]
    fn animate_scroll_by_lands_on_a_boundary() {
        let mut picker = picker(20, 10, 2);
        picker.animate_scroll_by(42.0 * 2.4);
        run_to_rest(&mut picker);
        assert_eq!(picker.settled_index(), Some(12));
        picker.animate_scroll_by(-42.0 * 2.6);
        run_to_rest(&mut picker);
        assert_eq!(picker.settled_index(), Some(9));
    }

    #[test]
    fn animating_to_the_current_index_finishes_at_once() {
        let mut picker = picker(20, 10, 2);
        let log = record(&mut picker);
        let id = picker.animate_scroll_to_index(10).unwrap();
        assert_eq!(picker.active_animation(), None);
        assert_eq!(
            *log.borrow(),
            [
                PickerEvent::MotionStarted,
                PickerEvent::AnimationFinished(id),
                PickerEvent::MotionStopped,
            ]
        );
    }

    #[test]
    fn unmeasured_viewport_jumps_instead_of_animating() {
        let config = PickerConfig::new(20, 2).unwrap();
        let mut picker =
            WheelPickerState::with_viewport(config, FixedSlotViewport::unmeasured(), 3);
        picker.drag_by(-500.0);
        assert!(picker.position().is_snapped());
        assert_eq!(picker.live_index(), Some(3));
        picker.animate_scroll_to_index(8);
        assert_eq!(picker.settled_index(), Some(8));
        assert_eq!(picker.active_animation(), None);
        let items = picker.visible_items(&DefaultShaper::WHEEL);
        assert!(items.iter().all(|item| item.rect.is_none()));
        assert!(
            items
                .iter()
                .all(|item| item.transform == ItemTransform::IDENTITY)
        );
    }

    #[test]
    fn visible_items_at_rest_cover_the_window() {
        let picker = picker(50, 0, 2);
        let items = picker.visible_items(&DefaultShaper::CLAMPED);
        let indices: Vec<_> = items.iter().map(|item| item.index).collect();
        // The slot before the window touches its leading edge at rest.
        assert_eq!(indices, [47, 48, 49, 0, 1, 2, 3]);
        let focus = items.iter().find(|item| item.index == 0).unwrap();
        assert_eq!(focus.transform, ItemTransform::IDENTITY);
        assert_eq!(focus.rect, Some(picker.geometry().focus_rect()));
    }

    #[test]
    fn reverse_layout_mirrors_rects() {
        let config = PickerConfig::new(50, 2)
            .unwrap()
            .with_reverse_layout(true)
            .with_item_size(Size::new(100.0, 40.0));
        let picker = WheelPickerState::new(config, 0);
        let items = picker.visible_items(&DefaultShaper::CLAMPED);
        let first_in_window = items.iter().find(|item| item.index == 48).unwrap();
        let rect = first_in_window.rect.unwrap();
        assert_eq!(rect.y0, 160.0);
        assert_eq!(rect.y1, 200.0);
    }

    #[test]
    fn render_items_pairs_content_with_indices() {
        let picker = picker(3, 1, 1);
        let rendered = picker.render_items(&DefaultShaper::CLAMPED, |index| index * 10);
        assert!(
            rendered
                .iter()
                .all(|entry| entry.content == entry.item.index * 10)
        );
    }

    #[test]
    fn snapshot_restores_an_equivalent_picker() {
        let mut picker = picker(31, 4, 3);
        picker.scroll_to_index(17);
        let snapshot = picker.snapshot();
        assert_eq!(
            snapshot,
            PickerSnapshot {
                item_count: 31,
                unfocused_side_count: 3,
                index: 17
            }
        );
        let restored = WheelPickerState::restore(&snapshot).unwrap();
        assert_eq!(restored.settled_index(), Some(17));
        assert!(WheelPickerState::restore(&PickerSnapshot { index: 31, ..snapshot }).is_err());
    }

    #[test]
    fn unsubscribed_listeners_miss_later_events() {
        let mut picker = picker(10, 0, 2);
        let log = Rc::new(RefCell::new(0_usize));
        let sink = Rc::clone(&log);
        let id = picker.subscribe(move |_| *sink.borrow_mut() += 1);
        picker.scroll_to_index(3);
        let seen = *log.borrow();
        assert!(seen > 0);
        assert!(picker.unsubscribe(id));
        assert_eq!(picker.listener_count(), 0);
        picker.scroll_to_index(5);
        assert_eq!(*log.borrow(), seen);
    }

    #[test]
    fn huge_scroll_distances_still_land_on_an_item() {
        let mut picker = picker(50, 25, 2);
        picker.drag_by(-1.0e21);
        assert!(picker.position().is_snapped());
        assert!(picker.live_index().is_some());
        picker.end_drag(0.0);
        run_to_rest(&mut picker);
        assert!(picker.settled_index().is_some());

        picker.animate_scroll_by(1.0e21);
        run_to_rest(&mut picker);
        assert!(picker.position().is_snapped());
        assert!(picker.settled_index().is_some());
    }

    #[test]
    fn non_finite_frame_times_are_ignored() {
        let mut picker = picker(50, 25, 2);
        picker.end_drag(3_000.0);
        picker.tick(f64::INFINITY);
        picker.tick(f64::NAN);
        assert!(picker.position().offset.is_finite());
        run_to_rest(&mut picker);
        assert!(picker.position().is_snapped());
        assert!(picker.settled_index().is_some());
    }

    #[test]
    fn host_scrolled_viewport_updates_both_indices() {
        let mut picker = picker(20, 5, 2);
        let first = picker.first_visible_slot();
        picker
            .viewport_mut()
            .set_position(SlotPosition::at_slot(first + 3));
        let changes = picker.sync_from_viewport();
        assert!(changes.contains(PickerChanges::LIVE_INDEX | PickerChanges::SETTLED_INDEX));
        assert_eq!(picker.live_index(), Some(8));
        assert_eq!(picker.settled_index(), Some(8));
        assert!(!picker.is_moving());
    }

    #[test]
    fn sync_while_dragging_does_not_settle() {
        let mut picker = picker(20, 5, 2);
        picker.begin_drag();
        picker.drag_by(-30.0);
        assert_eq!(picker.live_index(), Some(6));
        let first = picker.first_visible_slot();
        picker
            .viewport_mut()
            .set_position(SlotPosition::at_slot(first + 2));
        picker.sync_from_viewport();
        assert_eq!(picker.live_index(), Some(7));
        assert_eq!(picker.settled_index(), Some(5));
        assert!(picker.is_moving());
        assert_eq!(picker.active_animation(), None);
    }

    #[test]
    fn idle_picker_between_slots_snaps_after_sync() {
        let mut picker = picker(20, 5, 2);
        let first = picker.first_visible_slot();
        picker.viewport_mut().set_position(SlotPosition {
            first_slot: first,
            offset: 30.0,
        });
        let changes = picker.sync_from_viewport();
        assert!(changes.contains(PickerChanges::MOTION | PickerChanges::LIVE_INDEX));
        assert!(picker.is_moving());
        assert!(picker.active_animation().is_some());
        assert_eq!(picker.live_index(), Some(6));
        run_to_rest(&mut picker);
        assert!(picker.position().is_snapped());
        assert_eq!(picker.settled_index(), Some(6));
    }

    #[test]
    fn measuring_late_enables_pixel_motion() {
        let config = PickerConfig::new(20, 2).unwrap();
        let mut picker =
            WheelPickerState::with_viewport(config, FixedSlotViewport::unmeasured(), 3);
        picker.viewport_mut().set_item_extent(42.0);
        assert!(picker.sync_from_viewport().is_empty());

        picker.drag_by(-50.0);
        assert!(!picker.position().is_snapped());
        assert_eq!(picker.live_index(), Some(4));
        picker.end_drag(0.0);
        run_to_rest(&mut picker);
        assert_eq!(picker.settled_index(), Some(4));

        let plan = picker.plan_fling(2_000.0);
        assert!(plan.slot_delta > 0);
        picker.end_drag(2_000.0);
        run_to_rest(&mut picker);
        let expected = (4 - plan.slot_delta).rem_euclid(20);
        assert_eq!(picker.settled_index(), usize::try_from(expected).ok());
    }

    #[test]
    fn remeasuring_mid_animation_keeps_offsets_inside_the_slot() {
        let mut picker = picker(20, 5, 2);
        picker.animate_scroll_to_index(9);
        picker.tick(FRAME);
        picker.tick(FRAME);
        picker.viewport_mut().set_item_extent(20.0);
        let mut frames = 0;
        while picker.active_animation().is_some() {
            picker.tick(FRAME);
            let offset = picker.position().offset;
            assert!((0.0..20.0).contains(&offset), "offset {offset} escaped the slot");
            frames += 1;
            assert!(frames < 10_000, "picker never came to rest");
        }
        assert!(picker.position().is_snapped());
        assert_eq!(picker.settled_index(), Some(9));
    }

    #[test]
    fn losing_the_measurement_mid_animation_lands_on_the_target() {
        let mut picker = picker(20, 5, 2);
        let log = record(&mut picker);
        let id = picker.animate_scroll_to_index(9).unwrap();
        picker.tick(FRAME);
        picker.viewport_mut().set_item_extent(0.0);
        picker.tick(FRAME);
        assert_eq!(picker.active_animation(), None);
        assert_eq!(picker.settled_index(), Some(9));
        assert!(log.borrow().contains(&PickerEvent::AnimationFinished(id)));
    }
}
