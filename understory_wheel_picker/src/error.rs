// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time errors.
//!
//! Only configuration problems surface as errors. Runtime edge cases such as
//! wrap-around, an empty picker, unmeasured geometry, or a cancelled animation
//! are normal operating states and are absorbed by the controller.

/// Reasons a picker configuration or snapshot is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// A signed item count was negative.
    #[error("item count must be >= 0, got {0}")]
    NegativeItemCount(i64),
    /// A signed unfocused side count was negative.
    #[error("unfocused side count must be >= 0, got {0}")]
    NegativeUnfocusedSideCount(i64),
    /// The item count does not fit in the circular slot space.
    #[error("item count {count} exceeds the supported maximum of {max}")]
    ItemCountTooLarge {
        /// Requested item count.
        count: usize,
        /// Largest supported item count.
        max: usize,
    },
    /// The visible window would be too large to lay out.
    #[error("unfocused side count {count} exceeds the supported maximum of {max}")]
    UnfocusedSideCountTooLarge {
        /// Requested unfocused side count.
        count: usize,
        /// Largest supported unfocused side count.
        max: usize,
    },
    /// A restored snapshot names an index outside its own item range.
    #[error("snapshot index {index} is out of range for {count} items")]
    SnapshotIndexOutOfRange {
        /// Stored logical index.
        index: usize,
        /// Stored item count.
        count: usize,
    },
}
