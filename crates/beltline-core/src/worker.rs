//! A single worker standing at a station.
//!
//! A worker has one hand per component type and a build countdown. Its
//! life cycle is a three-phase loop:
//!
//! 1. **Collecting**: at least one hand is empty. The worker takes matching
//!    components off the slot.
//! 2. **Assembling**: every hand is full and the countdown is above zero.
//!    Each call to [`Worker::assemble`] decrements the countdown.
//! 3. **Holding finished**: every hand is full and the countdown is zero.
//!    The worker waits for an empty slot to put the product on.
//!
//! Placing the product empties every hand and rewinds the countdown,
//! returning the worker to phase 1.

use crate::id::ComponentId;
use crate::item::Slot;
use serde::{Deserialize, Serialize};

/// Which phase of the build loop a worker is in. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerPhase {
    Collecting,
    Assembling { remaining: u32 },
    HoldingFinished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// One hand per component type, indexed by `ComponentId`.
    hands: Vec<bool>,
    build_time: u32,
    remaining: u32,
}

impl Worker {
    /// A worker with empty hands for `component_count` types.
    pub fn new(component_count: usize, build_time: u32) -> Self {
        debug_assert!(build_time >= 1, "build time must be at least one tick");
        Self {
            hands: vec![false; component_count],
            build_time,
            remaining: build_time,
        }
    }

    /// Advance the build countdown by one tick if every hand is full.
    pub fn assemble(&mut self) {
        if self.holds_all() && self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    /// Try to act on the station slot.
    ///
    /// Returns the new slot value if the worker acted, `None` otherwise.
    /// Placing a finished product is checked before taking a component.
    #[must_use = "the returned value replaces the station slot when the worker acts"]
    pub fn take_or_place(&mut self, slot: Slot) -> Option<Slot> {
        if slot.is_empty() && self.remaining == 0 && self.holds_all() {
            self.hands.fill(false);
            self.remaining = self.build_time;
            return Some(Slot::FinishedProduct);
        }

        if let Slot::Component(id) = slot
            && let Some(hand) = self.hands.get_mut(id.index())
            && !*hand
        {
            *hand = true;
            return Some(Slot::Empty);
        }

        None
    }

    pub fn phase(&self) -> WorkerPhase {
        if !self.holds_all() {
            WorkerPhase::Collecting
        } else if self.remaining > 0 {
            WorkerPhase::Assembling {
                remaining: self.remaining,
            }
        } else {
            WorkerPhase::HoldingFinished
        }
    }

    /// Units held of `id`: 0 or 1. Unknown types report 0.
    pub fn held(&self, id: ComponentId) -> u8 {
        self.hands.get(id.index()).copied().map(u8::from).unwrap_or(0)
    }

    /// Total component units in this worker's hands.
    pub fn held_total(&self) -> u32 {
        self.hands.iter().filter(|&&h| h).count() as u32
    }

    pub fn holds_all(&self) -> bool {
        self.hands.iter().all(|&h| h)
    }

    /// Ticks of assembly left before the product can be placed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn build_time(&self) -> u32 {
        self.build_time
    }

    pub(crate) fn hands(&self) -> &[bool] {
        &self.hands
    }
}
