//! A station: one shared slot and the workers standing around it.

use crate::id::ComponentId;
use crate::item::Slot;
use crate::worker::Worker;
use serde::{Deserialize, Serialize};

/// What the acting worker did to the slot this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationAction {
    /// A component was lifted off the slot, leaving it empty.
    Took(ComponentId),
    /// A finished product was put onto the empty slot.
    Placed,
}

/// The single slot action a station performed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotChange {
    /// Index of the acting worker within the station.
    pub worker: usize,
    pub action: StationAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    workers: Vec<Worker>,
    pub slot: Slot,
}

impl Station {
    /// A station with `worker_count` fresh workers and an empty slot.
    pub fn new(worker_count: usize, component_count: usize, build_time: u32) -> Self {
        debug_assert!(worker_count >= 1, "a station needs workers");
        Self {
            workers: (0..worker_count)
                .map(|_| Worker::new(component_count, build_time))
                .collect(),
            slot: Slot::Empty,
        }
    }

    /// Run one tick of this station.
    ///
    /// Workers are visited in their fixed order. Every worker assembles;
    /// only the first worker able to take or place acts on the slot, and
    /// the rest of the workers keep assembling without touching it.
    pub fn process_slot(&mut self) -> Option<SlotChange> {
        let mut change = None;

        for (index, worker) in self.workers.iter_mut().enumerate() {
            worker.assemble();

            if change.is_some() {
                continue;
            }

            let before = self.slot;
            if let Some(result) = worker.take_or_place(before) {
                self.slot = result;
                let action = match before {
                    Slot::Component(id) => StationAction::Took(id),
                    _ => StationAction::Placed,
                };
                change = Some(SlotChange {
                    worker: index,
                    action,
                });
            }
        }

        change
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }
}
