//! The conveyor: an ordered line of stations and the per-tick pipeline.
//!
//! # Tick Pipeline
//!
//! Each call to [`Conveyor::add_new_item`] advances the line by one tick:
//!
//! 1. **Shift** -- every slot value moves one station toward the exit. The
//!    value that sat in the exit slot falls off the line (it was already
//!    tallied on the previous tick).
//! 2. **Insert** -- the arrival is written into the entry slot.
//! 3. **Process** -- every station runs [`Station::process_slot`], strictly
//!    from entry to exit.
//! 4. **Measure** -- the exit slot is inspected *after* processing. A
//!    finished product increments the product counter, a component
//!    increments that type's missed counter, an empty slot is not counted.
//!
//! Because measurement follows processing, a component the exit station's
//! workers pick up on the tick it arrives is never counted as missed.

use std::fmt;

use crate::component::ComponentSet;
use crate::fixed::Ticks;
use crate::id::ComponentId;
use crate::item::{Arrival, Slot};
use crate::station::Station;
use crate::trace::{NullTrace, TraceSink};
use serde::{Deserialize, Serialize};

/// What the measure phase saw in the exit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitOutcome {
    Empty,
    Product,
    Missed(ComponentId),
}

/// Component units and products sitting on the belt but not yet tallied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InTransit {
    /// Units per component type, indexed by `ComponentId`.
    pub components: Vec<u64>,
    pub products: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conveyor {
    components: ComponentSet,
    stations: Vec<Station>,
    finished_products: u64,
    /// Missed counters indexed by `ComponentId`.
    missed: Vec<u64>,
    tick: Ticks,
}

impl Conveyor {
    /// Build a line of `station_count` stations, each staffed by
    /// `workers_per_station` idle workers.
    ///
    /// Arguments are expected to be validated already; see
    /// [`LineConfig::validate`](crate::config::LineConfig::validate).
    pub fn new(
        station_count: usize,
        workers_per_station: usize,
        build_time: u32,
        components: ComponentSet,
    ) -> Self {
        debug_assert!(station_count >= 1, "a conveyor needs at least one station");
        let count = components.len();
        log::debug!(
            "building conveyor: {station_count} stations x {workers_per_station} workers, \
             build time {build_time}, {count} component types"
        );
        Self {
            stations: (0..station_count)
                .map(|_| Station::new(workers_per_station, count, build_time))
                .collect(),
            finished_products: 0,
            missed: vec![0; count],
            tick: 0,
            components,
        }
    }

    /// Advance the line by one tick with `item` arriving at the entry.
    pub fn add_new_item(&mut self, item: Arrival) -> ExitOutcome {
        self.add_new_item_traced(item, &mut NullTrace)
    }

    /// Like [`add_new_item`](Self::add_new_item), reporting each phase to
    /// `sink`.
    pub fn add_new_item_traced(&mut self, item: Arrival, sink: &mut dyn TraceSink) -> ExitOutcome {
        self.tick += 1;
        let tick = self.tick;

        // Shift, exit-most first so nothing is overwritten before it moves.
        for i in (1..self.stations.len()).rev() {
            self.stations[i].slot = self.stations[i - 1].slot;
        }
        if let Some(entry) = self.stations.first_mut() {
            entry.slot = Slot::from(item);
        }
        sink.on_loaded(tick, self);

        for index in 0..self.stations.len() {
            if let Some(change) = self.stations[index].process_slot() {
                sink.on_slot_change(tick, index, change);
            }
        }
        sink.on_processed(tick, self);

        let outcome = self.measure();
        log::trace!("tick {}: {} -> {:?}", tick, self, outcome);
        sink.on_exit(tick, outcome);
        outcome
    }

    fn measure(&mut self) -> ExitOutcome {
        match self.exit_slot() {
            Slot::Empty => ExitOutcome::Empty,
            Slot::FinishedProduct => {
                self.finished_products += 1;
                ExitOutcome::Product
            }
            Slot::Component(id) => {
                if let Some(counter) = self.missed.get_mut(id.index()) {
                    *counter += 1;
                }
                ExitOutcome::Missed(id)
            }
        }
    }

    /// The exit station's slot value.
    pub fn exit_slot(&self) -> Slot {
        self.stations.last().map(|s| s.slot).unwrap_or_default()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    pub fn finished_products(&self) -> u64 {
        self.finished_products
    }

    /// Missed count for one component type.
    pub fn missed(&self, id: ComponentId) -> u64 {
        self.missed.get(id.index()).copied().unwrap_or(0)
    }

    /// Missed counts indexed by `ComponentId`.
    pub fn missed_counts(&self) -> &[u64] {
        &self.missed
    }

    /// Number of ticks run so far.
    pub fn tick(&self) -> Ticks {
        self.tick
    }

    /// Units of `id` in workers' hands across the whole line.
    pub fn held_components(&self, id: ComponentId) -> u64 {
        self.stations
            .iter()
            .flat_map(Station::workers)
            .map(|w| u64::from(w.held(id)))
            .sum()
    }

    /// Everything on the belt except the exit slot.
    ///
    /// The exit slot is excluded because its value was already counted by
    /// the last measure phase.
    pub fn in_transit(&self) -> InTransit {
        let mut transit = InTransit {
            components: vec![0; self.components.len()],
            products: 0,
        };
        let upstream = self.stations.len().saturating_sub(1);
        for station in &self.stations[..upstream] {
            match station.slot {
                Slot::Empty => {}
                Slot::FinishedProduct => transit.products += 1,
                Slot::Component(id) => {
                    if let Some(n) = transit.components.get_mut(id.index()) {
                        *n += 1;
                    }
                }
            }
        }
        transit
    }
}

impl fmt::Display for Conveyor {
    /// Slot values from entry to exit, separated by `" | "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, station) in self.stations.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(station.slot.render(&self.components))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RecordingTrace;

    const A: ComponentId = ComponentId(0);
    const B: ComponentId = ComponentId(1);

    fn line(stations: usize, workers: usize, build_time: u32) -> Conveyor {
        Conveyor::new(stations, workers, build_time, ComponentSet::new(["A", "B"]))
    }

    #[test]
    fn new_line_is_empty() {
        let c = line(3, 2, 4);
        assert_eq!(c.stations().len(), 3);
        assert_eq!(c.finished_products(), 0);
        assert_eq!(c.missed_counts(), &[0, 0]);
        assert_eq!(c.to_string(), "  |   |  ");
    }

    #[test]
    fn items_shift_one_station_per_tick() {
        // Workers never pick up products, so one rides the belt unchanged.
        let mut c = line(3, 2, 4);
        c.stations[0].slot = Slot::FinishedProduct;
        c.add_new_item(Arrival::Nothing);
        assert_eq!(c.stations()[1].slot, Slot::FinishedProduct);
        assert_eq!(c.stations()[0].slot, Slot::Empty);
        c.add_new_item(Arrival::Nothing);
        assert_eq!(c.stations()[2].slot, Slot::FinishedProduct);
        assert_eq!(c.finished_products(), 1);
    }

    #[test]
    fn arrival_is_taken_at_the_entry() {
        let mut c = line(3, 2, 4);
        let outcome = c.add_new_item(Arrival::Component(A));
        assert_eq!(outcome, ExitOutcome::Empty);
        assert_eq!(c.stations()[0].slot, Slot::Empty);
        assert_eq!(c.stations()[0].workers()[0].held(A), 1);
    }

    #[test]
    fn exit_station_consumes_before_measure() {
        // Single station: whatever arrives is processed by the exit
        // station's workers before it is measured.
        let mut c = line(1, 2, 4);
        assert_eq!(c.add_new_item(Arrival::Component(A)), ExitOutcome::Empty);
        assert_eq!(c.missed(A), 0);
    }

    #[test]
    fn unconsumed_component_is_missed() {
        let mut c = line(1, 2, 4);
        c.add_new_item(Arrival::Component(A));
        c.add_new_item(Arrival::Component(A));
        let outcome = c.add_new_item(Arrival::Component(A));
        assert_eq!(outcome, ExitOutcome::Missed(A));
        assert_eq!(c.missed(A), 1);
        assert_eq!(c.missed(B), 0);
    }

    #[test]
    fn tick_counter_advances() {
        let mut c = line(2, 2, 1);
        for _ in 0..5 {
            c.add_new_item(Arrival::Nothing);
        }
        assert_eq!(c.tick(), 5);
    }

    #[test]
    fn display_renders_symbols() {
        let mut c = line(3, 2, 4);
        c.stations[0].slot = Slot::Component(B);
        c.stations[1].slot = Slot::FinishedProduct;
        assert_eq!(c.to_string(), "B | P |  ");
    }

    #[test]
    fn held_components_counts_per_type() {
        let mut c = line(2, 2, 4);
        for item in [A, A, B] {
            c.add_new_item(Arrival::Component(item));
        }
        assert_eq!(c.held_components(A), 2);
        assert_eq!(c.held_components(B), 1);
        assert_eq!(c.held_components(ComponentId(9)), 0);
    }

    #[test]
    fn in_transit_skips_exit_slot() {
        let mut c = line(3, 2, 4);
        c.stations[0].slot = Slot::Component(B);
        c.stations[1].slot = Slot::FinishedProduct;
        c.stations[2].slot = Slot::Component(A);
        let transit = c.in_transit();
        assert_eq!(transit.components, vec![0, 1]);
        assert_eq!(transit.products, 1);
    }

    #[test]
    fn traced_tick_reports_every_phase() {
        let mut c = line(1, 2, 4);
        let mut trace = RecordingTrace::default();
        c.add_new_item_traced(Arrival::Component(B), &mut trace);
        assert_eq!(trace.loaded(), ["B"]);
        assert_eq!(trace.processed(), [" "]);
        assert_eq!(trace.slot_changes().len(), 1);
        assert_eq!(trace.exits(), [ExitOutcome::Empty]);
    }
}
