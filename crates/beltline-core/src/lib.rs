//! Beltline Core -- a discrete-time assembly line simulation engine.
//!
//! Components arrive at one end of a conveyor, pass a sequence of stations
//! each staffed by several workers, and are either assembled into finished
//! products, held in a worker's hands, or leave the line unused ("missed").
//!
//! # Four-Phase Tick Pipeline
//!
//! Each call to [`conveyor::Conveyor::add_new_item`] advances the line by
//! one tick:
//!
//! 1. **Shift** -- every slot value moves one station toward the exit.
//! 2. **Insert** -- the tick's arrival is written into the entry slot.
//! 3. **Process** -- stations run entry to exit. In each station every
//!    worker assembles, and the first worker able to take a component or
//!    place a product acts on the slot.
//! 4. **Measure** -- the exit slot is tallied as a product, a missed
//!    component, or nothing.
//!
//! The engine never draws random numbers and never performs I/O. Arrivals
//! come from an [`arrival::ArrivalSource`] and observation goes through a
//! [`trace::TraceSink`] passed in per tick.
//!
//! ```rust,ignore
//! let config = LineConfig::default().validate()?;
//! let mut sim = config.simulation();
//! let report = sim.run(config.ticks());
//! println!("{report}");
//! ```
//!
//! # Key Types
//!
//! - [`worker::Worker`] -- per-worker hands and build countdown.
//! - [`station::Station`] -- one shared slot and its workers.
//! - [`conveyor::Conveyor`] -- the line and its counters.
//! - [`sim::Simulation`] -- a line plus an arrival source, run for N ticks.
//! - [`config::LineConfig`] -- user-facing parameters and validation.

pub mod arrival;
pub mod component;
pub mod config;
pub mod conveyor;
pub mod fixed;
pub mod id;
pub mod item;
#[cfg(feature = "data-loader")]
pub mod loader;
pub mod rng;
pub mod sim;
pub mod station;
pub mod trace;
pub mod worker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
