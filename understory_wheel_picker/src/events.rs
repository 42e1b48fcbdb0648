// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification for picker state.
//!
//! Hosts can either poll the [`PickerChanges`] returned by each state
//! operation, or [`subscribe`](crate::WheelPickerState::subscribe) a listener
//! that receives [`PickerEvent`]s in the order the state changed.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Identifier of an animated scroll started by the picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub(crate) u64);

impl AnimationId {
    /// Raw numeric id, increasing per picker.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle returned by [`subscribe`](crate::WheelPickerState::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

bitflags::bitflags! {
    /// What an operation changed, so hosts know what to redraw or re-read.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PickerChanges: u8 {
        /// The scroll position moved.
        const POSITION      = 0b0000_0001;
        /// The live index changed.
        const LIVE_INDEX    = 0b0000_0010;
        /// The settled index changed.
        const SETTLED_INDEX = 0b0000_0100;
        /// Motion started or stopped.
        const MOTION        = 0b0000_1000;
    }
}

/// A single observable state change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    /// The picker went from idle to moving.
    MotionStarted,
    /// The best-estimate centered index changed.
    LiveIndexChanged {
        /// New live index, `None` for an empty picker.
        index: Option<usize>,
    },
    /// The index the picker rests on changed.
    SettledIndexChanged {
        /// Previous settled index.
        previous: Option<usize>,
        /// New settled index.
        index: Option<usize>,
    },
    /// The picker came to rest on a slot boundary.
    MotionStopped,
    /// An animated scroll was pre-empted before reaching its target.
    AnimationCancelled(AnimationId),
    /// An animated scroll reached its target.
    AnimationFinished(AnimationId),
}

type Listener = Box<dyn FnMut(&PickerEvent)>;

/// Subscribed listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u32,
    entries: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, event: &PickerEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{Listeners, PickerChanges, PickerEvent};

    #[test]
    fn listeners_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        for tag in 0..3 {
            let log = Rc::clone(&log);
            listeners.subscribe(Box::new(move |_| log.borrow_mut().push(tag)));
        }
        listeners.emit(&PickerEvent::MotionStarted);
        assert_eq!(*log.borrow(), [0, 1, 2]);
    }

    #[test]
    fn unsubscribed_listeners_stop_receiving() {
        let hits = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::default();
        let id = {
            let hits = Rc::clone(&hits);
            listeners.subscribe(Box::new(move |_| *hits.borrow_mut() += 1))
        };
        listeners.emit(&PickerEvent::MotionStopped);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&PickerEvent::MotionStopped);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn change_flags_combine() {
        let changes = PickerChanges::POSITION | PickerChanges::LIVE_INDEX;
        assert!(changes.contains(PickerChanges::POSITION));
        assert!(!changes.contains(PickerChanges::SETTLED_INDEX));
        assert!(PickerChanges::default().is_empty());
    }
}
