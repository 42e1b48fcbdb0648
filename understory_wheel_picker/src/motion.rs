// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single animated run towards a slot boundary.
//!
//! Values are pixels measured from the leading edge of an anchor slot, so the
//! arithmetic stays small no matter how far into the slot strip the picker is.

use crate::ScrollSlot;
use crate::animation::{ExponentialDecay, Spring, Tween, TweenSpec};
use crate::events::AnimationId;
use crate::fling::SnapCurve;
use crate::viewport::SlotPosition;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Decay(ExponentialDecay),
    Approach(Tween),
    SnapSpring(Spring),
    SnapTween(Tween),
    Done,
}

/// Animated motion from the current position to a target first slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SlotMotion {
    id: AnimationId,
    anchor: ScrollSlot,
    item_extent: f64,
    target: f64,
    value: f64,
    velocity: f64,
    snap: SnapCurve,
    phase: Phase,
}

impl SlotMotion {
    fn base(
        id: AnimationId,
        from: SlotPosition,
        target_first_slot: ScrollSlot,
        item_extent: f64,
        velocity: f64,
        snap: SnapCurve,
    ) -> Self {
        let anchor = from.first_slot;
        Self {
            id,
            anchor,
            item_extent,
            target: SlotPosition::at_slot(target_first_slot).pixels_from(anchor, item_extent),
            value: from.offset,
            velocity,
            snap,
            phase: Phase::Done,
        }
    }

    /// Settles straight onto the target with the snap curve.
    pub(crate) fn snap(
        id: AnimationId,
        from: SlotPosition,
        target_first_slot: ScrollSlot,
        item_extent: f64,
        velocity: f64,
        snap: SnapCurve,
    ) -> Self {
        let mut motion = Self::base(id, from, target_first_slot, item_extent, velocity, snap);
        motion.begin_snap();
        motion
    }

    /// Coasts under `decay` until near the target, then snaps.
    pub(crate) fn decay(
        id: AnimationId,
        from: SlotPosition,
        target_first_slot: ScrollSlot,
        item_extent: f64,
        velocity: f64,
        decay: ExponentialDecay,
        snap: SnapCurve,
    ) -> Self {
        let mut motion = Self::base(id, from, target_first_slot, item_extent, velocity, snap);
        motion.phase = Phase::Decay(decay);
        if motion.within_snap_zone() {
            motion.begin_snap();
        }
        motion
    }

    /// Tweens to within half a slot of the target, then snaps.
    pub(crate) fn approach(
        id: AnimationId,
        from: SlotPosition,
        target_first_slot: ScrollSlot,
        item_extent: f64,
        velocity: f64,
        approach: TweenSpec,
        snap: SnapCurve,
    ) -> Self {
        let mut motion = Self::base(id, from, target_first_slot, item_extent, velocity, snap);
        let remaining = motion.target - motion.value;
        let half = item_extent * 0.5;
        if remaining.abs() <= half {
            motion.begin_snap();
        } else {
            let stop = if remaining > 0.0 {
                motion.target - half
            } else {
                motion.target + half
            };
            motion.phase = Phase::Approach(Tween::new(approach, motion.value, stop));
        }
        motion
    }

    pub(crate) const fn id(&self) -> AnimationId {
        self.id
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Item extent the motion's pixel values are measured in.
    pub(crate) const fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Continues towards the same target slot after the item extent changed.
    ///
    /// `from` is the current position under the new extent. Velocity is
    /// rescaled, and the remaining travel is handed to the snap curve.
    pub(crate) fn remeasure(&mut self, from: SlotPosition, item_extent: f64) {
        let target_first_slot = self.target_first_slot();
        self.velocity *= item_extent / self.item_extent;
        self.anchor = from.first_slot;
        self.item_extent = item_extent;
        self.target = SlotPosition::at_slot(target_first_slot).pixels_from(self.anchor, item_extent);
        self.value = from.offset;
        if !self.is_done() {
            self.begin_snap();
        }
    }

    /// Current velocity in scroll pixels per second.
    pub(crate) const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current position.
    pub(crate) fn position(&self) -> SlotPosition {
        if self.is_done() {
            let slots = self.target_first_slot();
            return SlotPosition::at_slot(slots);
        }
        SlotPosition::from_pixels(self.anchor, self.value, Some(self.item_extent))
    }

    /// First slot this motion comes to rest on.
    pub(crate) fn target_first_slot(&self) -> ScrollSlot {
        let slot = SlotPosition::from_pixels(self.anchor, self.target, Some(self.item_extent));
        // Targets are whole slots; fold any rounding residue to the nearer boundary.
        if slot.offset * 2.0 >= self.item_extent {
            slot.first_slot + 1
        } else {
            slot.first_slot
        }
    }

    fn within_snap_zone(&self) -> bool {
        let remaining = self.target - self.value;
        let ahead = if self.velocity >= 0.0 {
            remaining
        } else {
            -remaining
        };
        ahead <= self.item_extent * 0.5
    }

    fn begin_snap(&mut self) {
        self.phase = match self.snap {
            SnapCurve::Spring(config) => {
                let mut spring = Spring::new(config, self.value);
                spring.set_target(self.target);
                spring.set_velocity(self.velocity);
                Phase::SnapSpring(spring)
            }
            SnapCurve::Tween(spec) => Phase::SnapTween(Tween::new(spec, self.value, self.target)),
        };
        self.settle_if_done();
    }

    fn settle_if_done(&mut self) {
        let done = match &self.phase {
            Phase::SnapSpring(spring) => spring.is_settled(),
            Phase::SnapTween(tween) => tween.is_done(),
            Phase::Done => true,
            Phase::Decay(_) | Phase::Approach(_) => false,
        };
        if done {
            self.value = self.target;
            self.velocity = 0.0;
            self.phase = Phase::Done;
        }
    }

    /// Advances the motion by `dt` seconds.
    pub(crate) fn step(&mut self, dt: f64) {
        match &mut self.phase {
            Phase::Decay(decay) => {
                let decay = *decay;
                self.value += decay.step(&mut self.velocity, dt);
                if decay.is_at_rest(self.velocity) || self.within_snap_zone() {
                    self.begin_snap();
                }
            }
            Phase::Approach(tween) => {
                tween.step(dt);
                self.value = tween.value();
                self.velocity = tween.velocity();
                if tween.is_done() {
                    self.begin_snap();
                }
            }
            Phase::SnapSpring(spring) => {
                spring.step(dt);
                self.value = spring.value();
                self.velocity = spring.velocity();
                self.settle_if_done();
            }
            Phase::SnapTween(tween) => {
                tween.step(dt);
                self.value = tween.value();
                self.velocity = tween.velocity();
                self.settle_if_done();
            }
            Phase::Done => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SlotMotion;
    use crate::animation::{Easing, ExponentialDecay, SpringConfig, TweenSpec};
    use crate::events::AnimationId;
    use crate::fling::SnapCurve;
    use crate::viewport::SlotPosition;

    fn run(motion: &mut SlotMotion) -> usize {
        let mut frames = 0;
        while !motion.is_done() {
            motion.step(1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000, "motion never settled");
        }
        frames
    }

    #[test]
    fn spring_snap_lands_on_boundary() {
        let from = SlotPosition {
            first_slot: 100,
            offset: 13.0,
        };
        let mut motion = SlotMotion::snap(
            AnimationId(1),
            from,
            100,
            40.0,
            0.0,
            SnapCurve::Spring(SpringConfig::medium_low()),
        );
        assert!(!motion.is_done());
        run(&mut motion);
        assert_eq!(motion.position(), SlotPosition::at_slot(100));
    }

    #[test]
    fn already_on_target_is_done_immediately() {
        let mut motion = SlotMotion::snap(
            AnimationId(1),
            SlotPosition::at_slot(8),
            8,
            40.0,
            0.0,
            SnapCurve::default(),
        );
        assert!(motion.is_done());
        assert_eq!(run(&mut motion), 0);
        assert_eq!(motion.position(), SlotPosition::at_slot(8));
    }

    #[test]
    fn decay_coasts_then_snaps_to_target() {
        let mut motion = SlotMotion::decay(
            AnimationId(2),
            SlotPosition::at_slot(1_000),
            1_012,
            40.0,
            2_000.0,
            ExponentialDecay::new(4.0, 1.0),
            SnapCurve::default(),
        );
        let mut last = 0.0;
        let mut frames = 0;
        while !motion.is_done() {
            motion.step(1.0 / 60.0);
            let pixels = motion.position().pixels_from(1_000, 40.0);
            assert!(pixels + 1.0 >= last, "motion reversed at {pixels}");
            last = pixels;
            frames += 1;
            assert!(frames < 10_000, "motion never settled");
        }
        assert_eq!(motion.position(), SlotPosition::at_slot(1_012));
    }

    #[test]
    fn low_velocity_approach_then_tween_snap() {
        let mut motion = SlotMotion::approach(
            AnimationId(3),
            SlotPosition::at_slot(50),
            47,
            20.0,
            0.0,
            TweenSpec::new(0.2, Easing::Linear),
            SnapCurve::Tween(TweenSpec::new(0.1, Easing::Smoothstep)),
        );
        run(&mut motion);
        assert_eq!(motion.position(), SlotPosition::at_slot(47));
        assert_eq!(motion.velocity(), 0.0);
    }

    #[test]
    fn remeasuring_keeps_the_target_slot() {
        let mut motion = SlotMotion::snap(
            AnimationId(4),
            SlotPosition::at_slot(200),
            206,
            40.0,
            0.0,
            SnapCurve::default(),
        );
        for _ in 0..5 {
            motion.step(1.0 / 60.0);
        }
        let fraction = motion.position().fraction(Some(40.0));
        let from = SlotPosition {
            first_slot: motion.position().first_slot,
            offset: fraction * 10.0,
        };
        motion.remeasure(from, 10.0);
        assert_eq!(motion.item_extent(), 10.0);
        while !motion.is_done() {
            motion.step(1.0 / 60.0);
            let offset = motion.position().offset;
            assert!((0.0..10.0).contains(&offset), "offset {offset} escaped the slot");
        }
        assert_eq!(motion.position(), SlotPosition::at_slot(206));
    }
}
