//! Sources of per-tick arrivals.
//!
//! The conveyor never draws random numbers itself. Whatever drives it pulls
//! one [`Arrival`] per tick from an [`ArrivalSource`]:
//!
//! - [`WeightedArrivals`] samples from per-component probabilities with a
//!   seeded [`SimRng`], reproducing the same sequence for the same seed.
//! - [`ScriptedArrivals`] replays a fixed list and then yields
//!   [`Arrival::Nothing`] forever. Used by tests and for replaying traces.

use std::collections::VecDeque;

use crate::fixed::{Fixed64, remainder_of_one};
use crate::id::ComponentId;
use crate::item::Arrival;
use crate::rng::SimRng;

pub trait ArrivalSource {
    /// The arrival for the next tick.
    fn next_arrival(&mut self) -> Arrival;
}

impl<F> ArrivalSource for F
where
    F: FnMut() -> Arrival,
{
    fn next_arrival(&mut self) -> Arrival {
        self()
    }
}

// ---------------------------------------------------------------------------
// WeightedArrivals
// ---------------------------------------------------------------------------

/// Samples arrivals from fixed per-component chances.
///
/// The weight table has one entry per component type followed by the
/// implicit "nothing arrives" weight, `1 - sum(chances)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedArrivals {
    rng: SimRng,
    weights: Vec<Fixed64>,
}

impl WeightedArrivals {
    /// `chances[i]` is the probability that component `i` arrives on a tick.
    pub fn new(chances: &[Fixed64], seed: u64) -> Self {
        let mut weights = chances.to_vec();
        weights.push(remainder_of_one(chances).max(Fixed64::ZERO));
        Self {
            rng: SimRng::new(seed),
            weights,
        }
    }

    /// Per-component chances followed by the "nothing" weight.
    pub fn weights(&self) -> &[Fixed64] {
        &self.weights
    }
}

impl ArrivalSource for WeightedArrivals {
    fn next_arrival(&mut self) -> Arrival {
        let nothing = self.weights.len() - 1;
        match self.rng.choose_weighted(&self.weights) {
            Some(i) if i < nothing => ComponentId::from_index(i)
                .map(Arrival::Component)
                .unwrap_or(Arrival::Nothing),
            _ => Arrival::Nothing,
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedArrivals
// ---------------------------------------------------------------------------

/// Replays a pre-generated arrival sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedArrivals {
    queue: VecDeque<Arrival>,
}

impl ScriptedArrivals {
    pub fn new(arrivals: impl IntoIterator<Item = Arrival>) -> Self {
        Self {
            queue: arrivals.into_iter().collect(),
        }
    }

    /// Arrivals not yet handed out.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ArrivalSource for ScriptedArrivals {
    fn next_arrival(&mut self) -> Arrival {
        self.queue.pop_front().unwrap_or(Arrival::Nothing)
    }
}
