// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal persisted form of a picker.

use crate::error::PickerError;

/// Everything needed to rebuild an equivalent picker resting on the same item.
///
/// Motion, listeners, and the exact slot are not persisted; a restored picker
/// starts idle with `index` in the focus slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickerSnapshot {
    /// Number of logical items.
    pub item_count: usize,
    /// Unfocused slots on each side of the focus slot.
    pub unfocused_side_count: usize,
    /// Logical index in the focus slot.
    pub index: usize,
}

impl PickerSnapshot {
    /// Checks that `index` lies within the stored item range.
    ///
    /// Empty pickers always store index `0`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::SnapshotIndexOutOfRange`] otherwise.
    pub fn validate(&self) -> Result<(), PickerError> {
        let in_range = if self.item_count == 0 {
            self.index == 0
        } else {
            self.index < self.item_count
        };
        if in_range {
            Ok(())
        } else {
            Err(PickerError::SnapshotIndexOutOfRange {
                index: self.index,
                count: self.item_count,
            })
        }
    }
}
