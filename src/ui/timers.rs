// SPDX-License-Identifier: MPL-2.0
//! Named, fire-once timers on the logical clock.
//!
//! Each [`TimerSlot`] holds at most one deadline. Starting an armed slot
//! replaces its deadline, so a superseded timer can never fire. The owner
//! drains expired slots with [`TimerRegistry::pop_due`] and teardown is a single
//! [`TimerRegistry::cancel_all`].

use crate::domain::time::Timestamp;
use std::time::Duration;

/// Every delayed callback the viewer can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Hides the notification text.
    Notification,
    /// Hides the gesture glyph.
    GestureIndicator,
    /// Hides the large page-number overlay.
    PageOverlay,
    /// Ends the edge flash.
    EdgeFlash,
    /// Hides the two-finger indicator if no release was seen.
    TwoFingerIndicator,
    /// Leaves pan mode after inactivity.
    PanModeTimeout,
    /// Turns a stationary press into a long press.
    LongPress,
    /// Shows the tutorial after a document load.
    TutorialReveal,
    /// Hides the tutorial.
    TutorialHide,
    /// Fires the automatic search once typing pauses.
    SearchDebounce,
    /// Shows the match counter after next/previous match.
    FindSettle,
}

impl TimerSlot {
    pub const ALL: [TimerSlot; 11] = [
        TimerSlot::Notification,
        TimerSlot::GestureIndicator,
        TimerSlot::PageOverlay,
        TimerSlot::EdgeFlash,
        TimerSlot::TwoFingerIndicator,
        TimerSlot::PanModeTimeout,
        TimerSlot::LongPress,
        TimerSlot::TutorialReveal,
        TimerSlot::TutorialHide,
        TimerSlot::SearchDebounce,
        TimerSlot::FindSettle,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    deadline: Timestamp,
    // Start order, breaks ties between equal deadlines.
    seq: u64,
}

/// Fixed table of timer slots.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    slots: [Option<Armed>; TimerSlot::ALL.len()],
    next_seq: u64,
}

impl TimerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `slot` to fire `delay` after `now`, replacing any pending deadline.
    pub fn start(&mut self, slot: TimerSlot, now: Timestamp, delay: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[slot.index()] = Some(Armed {
            deadline: now.saturating_add(delay),
            seq,
        });
    }

    /// Disarms `slot`. Returns whether it was armed.
    pub fn cancel(&mut self, slot: TimerSlot) -> bool {
        self.slots[slot.index()].take().is_some()
    }

    /// Disarms every slot.
    pub fn cancel_all(&mut self) {
        self.slots = [None; TimerSlot::ALL.len()];
    }

    #[must_use]
    pub fn is_armed(&self, slot: TimerSlot) -> bool {
        self.slots[slot.index()].is_some()
    }

    #[must_use]
    pub fn deadline(&self, slot: TimerSlot) -> Option<Timestamp> {
        self.slots[slot.index()].map(|armed| armed.deadline)
    }

    /// Disarms and returns the earliest slot whose deadline is at or before `now`.
    ///
    /// Slots sharing a deadline come out in the order they were started.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<TimerSlot> {
        let slot = TimerSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slots[slot.index()].map(|armed| (slot, armed)))
            .filter(|(_, armed)| armed.deadline <= now)
            .min_by_key(|(_, armed)| (armed.deadline, armed.seq))
            .map(|(slot, _)| slot)?;
        self.slots[slot.index()] = None;
        Some(slot)
    }

    /// Earliest pending deadline, for hosts that sleep until the next tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.slots.iter().flatten().map(|armed| armed.deadline).min()
    }

    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}
