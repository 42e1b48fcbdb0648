// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular mapping between scroll slots and logical item indices.
//!
//! The scroll strip is indexed by signed [`ScrollSlot`]s and never ends. Slot
//! `s` shows logical item `s mod item_count`, always non-negative. A picker
//! starts out near [`SLOT_BASE`], an exact multiple of the item count, so the
//! user could scroll for a very long time in either direction before reaching
//! slot zero. Slots below zero still map correctly; the base only keeps
//! numbers readable in logs and positive for hosts that store them unsigned.

/// A position in the unbounded scroll strip.
pub type ScrollSlot = i64;

/// Anchor slot near which pickers start, before rounding down to a multiple
/// of the item count.
pub const SLOT_BASE: ScrollSlot = 1 << 30;

/// Largest item count for which [`SLOT_BASE`] still rounds to a positive
/// multiple of the count.
pub const MAX_ITEM_COUNT: usize = 1 << 30;

/// Maps scroll slots onto a finite set of `item_count` logical items.
///
/// An empty space (`item_count == 0`) maps nothing: every query returns `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotSpace {
    item_count: usize,
}

impl SlotSpace {
    /// Creates a slot space over `item_count` items.
    ///
    /// Callers are expected to have validated `item_count <= MAX_ITEM_COUNT`;
    /// larger counts are clamped to it.
    #[must_use]
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count: item_count.min(MAX_ITEM_COUNT),
        }
    }

    /// Number of logical items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns `true` if there are no items to map onto.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    fn period(&self) -> Option<ScrollSlot> {
        if self.item_count == 0 {
            None
        } else {
            // Bounded by MAX_ITEM_COUNT, so this never wraps.
            Some(self.item_count as ScrollSlot)
        }
    }

    /// Logical item shown by `slot`.
    #[must_use]
    pub fn logical_index(&self, slot: ScrollSlot) -> Option<usize> {
        let period = self.period()?;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "rem_euclid yields a value in 0..item_count"
        )]
        Some(slot.rem_euclid(period) as usize)
    }

    /// Largest multiple of the item count not above [`SLOT_BASE`].
    #[must_use]
    pub fn base_slot(&self) -> Option<ScrollSlot> {
        let period = self.period()?;
        Some(SLOT_BASE - SLOT_BASE % period)
    }

    /// First visible slot that puts `start_index` in the focus slot.
    ///
    /// The focus slot sits `unfocused_side_count` slots after the first visible
    /// one. `start_index` is not clamped; indices past the end alias onto the
    /// item they wrap to.
    #[must_use]
    pub fn initial_scroll_slot(
        &self,
        start_index: usize,
        unfocused_side_count: usize,
    ) -> Option<ScrollSlot> {
        let base = self.base_slot()?;
        let start = self.logical_index(to_slot(start_index))?;
        Some(base + to_slot(start) - to_slot(unfocused_side_count))
    }

    /// Slot closest to `from` that shows `index`.
    ///
    /// Indices at or past the item count wrap. When two aliases are equally
    /// close the forward one wins.
    #[must_use]
    pub fn nearest_slot_for_index(&self, from: ScrollSlot, index: usize) -> Option<ScrollSlot> {
        let period = self.period()?;
        let current = self.logical_index(from)?;
        let wanted = self.logical_index(to_slot(index))?;
        let mut delta = (to_slot(wanted) - to_slot(current)).rem_euclid(period);
        if delta * 2 > period {
            delta -= period;
        }
        Some(from + delta)
    }
}

pub(crate) fn to_slot(value: usize) -> ScrollSlot {
    ScrollSlot::try_from(value).unwrap_or(ScrollSlot::MAX)
}

#[cfg(test)]
mod tests {
    use super::{SLOT_BASE, ScrollSlot, SlotSpace};

    #[test]
    fn logical_index_is_periodic() {
        for count in [1_usize, 3, 7, 50] {
            let space = SlotSpace::new(count);
            for slot in [-101_i64, -1, 0, 1, 49, 1_000_003] {
                assert_eq!(
                    space.logical_index(slot),
                    space.logical_index(slot + count as ScrollSlot),
                    "count {count}, slot {slot}"
                );
            }
        }
    }

    #[test]
    fn negative_slots_map_to_non_negative_indices() {
        let space = SlotSpace::new(5);
        assert_eq!(space.logical_index(-1), Some(4));
        assert_eq!(space.logical_index(-5), Some(0));
        assert_eq!(space.logical_index(-6), Some(4));
    }

    #[test]
    fn base_slot_is_a_multiple_of_the_count() {
        let space = SlotSpace::new(7);
        let base = space.base_slot().unwrap();
        assert_eq!(base % 7, 0);
        assert!(base <= SLOT_BASE && base > SLOT_BASE - 7);
    }

    #[test]
    fn initial_slot_round_trips_the_start_index() {
        for (count, side) in [(50_usize, 2_usize), (3, 0), (12, 5), (1, 3)] {
            let space = SlotSpace::new(count);
            for start in 0..count {
                let slot = space.initial_scroll_slot(start, side).unwrap();
                assert!(slot >= 0, "slot must stay non-negative");
                let focused = space.logical_index(slot + side as ScrollSlot);
                assert_eq!(focused, Some(start), "count {count}, side {side}");
            }
        }
    }

    #[test]
    fn empty_space_maps_nothing() {
        let space = SlotSpace::new(0);
        assert!(space.is_empty());
        assert_eq!(space.logical_index(12), None);
        assert_eq!(space.base_slot(), None);
        assert_eq!(space.initial_scroll_slot(0, 2), None);
        assert_eq!(space.nearest_slot_for_index(0, 3), None);
    }

    #[test]
    fn nearest_slot_takes_the_short_way_round() {
        let space = SlotSpace::new(10);
        let from = space.base_slot().unwrap() + 8;
        // 8 -> 1 is three steps forward across the wrap, seven steps back.
        assert_eq!(space.nearest_slot_for_index(from, 1), Some(from + 3));
        // 8 -> 5 is three steps back.
        assert_eq!(space.nearest_slot_for_index(from, 5), Some(from - 3));
        // Out-of-range indices wrap: 23 is item 3, five steps either way.
        assert_eq!(space.nearest_slot_for_index(from, 23), Some(from + 5));
        assert_eq!(space.nearest_slot_for_index(from, 8), Some(from));
    }
}
