//! Running a line for many ticks.
//!
//! A [`Simulation`] pairs a [`Conveyor`] with an [`ArrivalSource`], pulls
//! one arrival per tick, and summarises the run in a [`RunReport`]. It also
//! provides a [`StateHash`] over the full line state so two runs can be
//! checked for determinism cheaply.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arrival::ArrivalSource;
use crate::conveyor::{Conveyor, ExitOutcome};
use crate::fixed::Ticks;
use crate::item::{Arrival, Slot};
use crate::trace::{NullTrace, TraceSink};

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Simulation<S> {
    conveyor: Conveyor,
    source: S,
    /// Units that entered the line, per component type.
    arrived: Vec<u64>,
}

impl<S: ArrivalSource> Simulation<S> {
    pub fn new(conveyor: Conveyor, source: S) -> Self {
        let arrived = vec![0; conveyor.components().len()];
        Self {
            conveyor,
            source,
            arrived,
        }
    }

    /// Run a single tick.
    pub fn step(&mut self) -> ExitOutcome {
        self.step_traced(&mut NullTrace)
    }

    /// Run a single tick, reporting to `sink`.
    pub fn step_traced(&mut self, sink: &mut dyn TraceSink) -> ExitOutcome {
        let item = self.source.next_arrival();
        if let Arrival::Component(id) = item
            && let Some(n) = self.arrived.get_mut(id.index())
        {
            *n += 1;
        }
        self.conveyor.add_new_item_traced(item, sink)
    }

    /// Run `ticks` ticks and summarise the line afterwards.
    pub fn run(&mut self, ticks: Ticks) -> RunReport {
        self.run_traced(ticks, &mut NullTrace)
    }

    pub fn run_traced(&mut self, ticks: Ticks, sink: &mut dyn TraceSink) -> RunReport {
        for _ in 0..ticks {
            self.step_traced(sink);
        }
        let report = self.report();
        log::debug!(
            "run finished after {} ticks: {} products, missed {:?}",
            report.ticks,
            report.finished_products,
            self.conveyor.missed_counts()
        );
        report
    }

    /// Summary of everything run so far.
    pub fn report(&self) -> RunReport {
        let components = self.conveyor.components();
        RunReport {
            ticks: self.conveyor.tick(),
            finished_products: self.conveyor.finished_products(),
            components: components
                .ids()
                .map(|id| ComponentTally {
                    component: components.symbol(id).to_string(),
                    arrived: self.arrived.get(id.index()).copied().unwrap_or(0),
                    missed: self.conveyor.missed(id),
                })
                .collect(),
        }
    }

    pub fn conveyor(&self) -> &Conveyor {
        &self.conveyor
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Units that entered the line, per component type.
    pub fn arrived(&self) -> &[u64] {
        &self.arrived
    }

    /// Hash of the complete line state: every slot, every worker's hands
    /// and countdown, and all counters.
    pub fn state_hash(&self) -> u64 {
        let mut h = StateHash::new();
        h.write_u64(self.conveyor.tick());
        h.write_u64(self.conveyor.finished_products());
        for &m in self.conveyor.missed_counts() {
            h.write_u64(m);
        }
        for &a in &self.arrived {
            h.write_u64(a);
        }
        for station in self.conveyor.stations() {
            h.write_slot(station.slot);
            for worker in station.workers() {
                h.write_u32(worker.remaining());
                for &hand in worker.hands() {
                    h.write(&[hand as u8]);
                }
            }
        }
        h.finish()
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Per-component totals for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTally {
    pub component: String,
    pub arrived: u64,
    pub missed: u64,
}

/// Result of a run, in configured component order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub ticks: Ticks,
    pub finished_products: u64,
    pub components: Vec<ComponentTally>,
}

impl RunReport {
    /// Missed count for a component symbol.
    pub fn missed(&self, component: &str) -> Option<u64> {
        self.components
            .iter()
            .find(|t| t.component == component)
            .map(|t| t.missed)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finished products: {}", self.finished_products)?;
        for tally in &self.components {
            writeln!(f, "Missed {}s: {}", tally.component, tally.missed)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// A simple deterministic hash of line state for comparing runs.
///
/// Uses FNV-1a (64-bit) for speed and simplicity. Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a new hash.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Feed bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    /// Feed a slot value: a tag byte, plus the component id if any.
    pub fn write_slot(&mut self, slot: Slot) {
        match slot {
            Slot::Empty => self.write(&[0]),
            Slot::FinishedProduct => self.write(&[1]),
            Slot::Component(id) => {
                self.write(&[2]);
                self.write(&id.0.to_le_bytes());
            }
        }
    }

    /// Finalize and return the hash value.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}
