//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::arrival::ScriptedArrivals;
use crate::component::ComponentSet;
use crate::conveyor::Conveyor;
use crate::id::ComponentId;
use crate::item::Arrival;
use crate::sim::Simulation;

// ===========================================================================
// Components
// ===========================================================================

pub fn a() -> ComponentId {
    ComponentId(0)
}

pub fn b() -> ComponentId {
    ComponentId(1)
}

pub fn two_parts() -> ComponentSet {
    ComponentSet::new(["A", "B"])
}

// ===========================================================================
// Lines
// ===========================================================================

/// A line building products from components `A` and `B`.
pub fn two_part_line(stations: usize, workers: usize, build_time: u32) -> Conveyor {
    Conveyor::new(stations, workers, build_time, two_parts())
}

/// Parse an arrival script: `A`, `B`, `C`, ... arrive as component 0, 1,
/// 2, ...; `.` or `-` means nothing arrives. Whitespace is ignored.
pub fn script(text: &str) -> Vec<Arrival> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' | '-' => Arrival::Nothing,
            'A'..='Z' => Arrival::Component(ComponentId(c as u16 - 'A' as u16)),
            other => panic!("unexpected arrival symbol {other:?}"),
        })
        .collect()
}

/// Feed each arrival to the line, one tick per arrival.
pub fn feed(conveyor: &mut Conveyor, arrivals: &[Arrival]) {
    for &item in arrivals {
        conveyor.add_new_item(item);
    }
}

/// A two-part simulation replaying `text` (see [`script`]).
pub fn scripted_sim(
    stations: usize,
    workers: usize,
    build_time: u32,
    text: &str,
) -> Simulation<ScriptedArrivals> {
    Simulation::new(
        two_part_line(stations, workers, build_time),
        ScriptedArrivals::new(script(text)),
    )
}

// ===========================================================================
// Invariant checks
// ===========================================================================

/// Panic if any worker holds more than one unit of a type or has a
/// countdown outside `[0, build_time]`.
pub fn assert_worker_bounds(conveyor: &Conveyor) {
    for (s, station) in conveyor.stations().iter().enumerate() {
        for (w, worker) in station.workers().iter().enumerate() {
            for id in conveyor.components().ids() {
                assert!(
                    worker.held(id) <= 1,
                    "station {s} worker {w} holds {} of {:?}",
                    worker.held(id),
                    id
                );
            }
            assert!(
                worker.remaining() <= worker.build_time(),
                "station {s} worker {w} countdown {} exceeds {}",
                worker.remaining(),
                worker.build_time()
            );
        }
    }
}

/// Per component type: units that arrived minus every place a unit can be
/// (held, on the belt upstream of the exit, built into a product, missed).
/// Zero everywhere when nothing was created or lost.
pub fn conservation_gaps<S>(sim: &Simulation<S>) -> Vec<i64>
where
    S: crate::arrival::ArrivalSource,
{
    let line = sim.conveyor();
    let transit = line.in_transit();
    let products = (line.finished_products() + transit.products) as i64;

    line.components()
        .ids()
        .map(|id| {
            let arrived = sim.arrived()[id.index()] as i64;
            let held = line.held_components(id) as i64;
            let on_belt = transit.components[id.index()] as i64;
            let missed = line.missed(id) as i64;
            arrived - held - on_belt - products - missed
        })
        .collect()
}
