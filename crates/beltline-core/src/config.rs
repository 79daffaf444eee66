//! Line configuration and its validation.
//!
//! [`LineConfig`] is the raw, user-facing form: it is what config files
//! deserialize into and what command-line flags override. The engine never
//! sees it directly. [`LineConfig::validate`] checks every precondition the
//! engine relies on and produces a [`ValidatedConfig`], from which the
//! conveyor and arrival source are built.

use serde::{Deserialize, Serialize};

use crate::arrival::WeightedArrivals;
use crate::component::ComponentSet;
use crate::conveyor::Conveyor;
use crate::fixed::{Fixed64, Ticks, f64_to_fixed64};
use crate::sim::Simulation;

/// Number of distinct component types a product is built from.
pub const REQUIRED_COMPONENTS: usize = 2;

/// Slack allowed when checking that chances do not exceed 1.
pub const CHANCE_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a [`LineConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("the number of components must be {expected}, got {found}")]
    ComponentCount { expected: usize, found: usize },

    #[error("the number of components ({components}) and the number of chances ({chances}) must be the same")]
    ChanceCount { components: usize, chances: usize },

    #[error("chance #{index} is {value}, expected a probability in [0, 1]")]
    ChanceOutOfRange { index: usize, value: f64 },

    #[error("chances add up to {total}, which leaves a negative chance of no arrival")]
    ChancesExceedOne { total: f64 },

    #[error("there must be at least one station")]
    NoStations,

    #[error("there must be at least two workers per station, got {found}")]
    TooFewWorkers { found: usize },

    #[error("the time to build a finished product must be at least one tick")]
    ZeroBuildTime,
}

// ---------------------------------------------------------------------------
// LineConfig
// ---------------------------------------------------------------------------

/// Unvalidated line parameters.
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineConfig {
    /// Number of ticks to simulate.
    #[serde(alias = "iterations")]
    pub ticks: Ticks,
    /// Component symbols. Duplicates are dropped during validation.
    pub components: Vec<String>,
    /// Arrival chance per component. A single value applies to every
    /// component.
    #[serde(alias = "chances")]
    pub chance: Vec<f64>,
    pub stations: usize,
    /// Workers per station.
    pub workers: usize,
    /// Ticks of assembly once a worker holds every component.
    #[serde(alias = "time")]
    pub build_time: u32,
    /// Seed for the arrival sampler.
    pub seed: u64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            ticks: 100,
            components: vec!["A".to_string(), "B".to_string()],
            chance: vec![1.0 / 3.0],
            stations: 3,
            workers: 2,
            build_time: 4,
            seed: 0,
        }
    }
}

impl LineConfig {
    /// Check every precondition and resolve defaults.
    ///
    /// Checks run in a fixed order (components, chances, stations, workers,
    /// build time) and the first failure is returned.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let components = ComponentSet::new(self.components.iter().cloned());
        if components.len() != REQUIRED_COMPONENTS {
            return Err(ConfigError::ComponentCount {
                expected: REQUIRED_COMPONENTS,
                found: components.len(),
            });
        }

        let chances = resolve_chances(&self.chance, components.len())?;

        if self.stations < 1 {
            return Err(ConfigError::NoStations);
        }
        if self.workers < 2 {
            return Err(ConfigError::TooFewWorkers {
                found: self.workers,
            });
        }
        if self.build_time < 1 {
            return Err(ConfigError::ZeroBuildTime);
        }

        Ok(ValidatedConfig {
            components,
            chances,
            stations: self.stations,
            workers: self.workers,
            build_time: self.build_time,
            ticks: self.ticks,
            seed: self.seed,
        })
    }
}

/// Broadcast a single chance, check ranges and convert to fixed-point.
fn resolve_chances(raw: &[f64], components: usize) -> Result<Vec<Fixed64>, ConfigError> {
    let chances: Vec<f64> = match raw.len() {
        1 => vec![raw[0]; components],
        n if n == components => raw.to_vec(),
        n => {
            return Err(ConfigError::ChanceCount {
                components,
                chances: n,
            });
        }
    };

    for (index, &value) in chances.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ChanceOutOfRange { index, value });
        }
    }

    let total: f64 = chances.iter().sum();
    if total > 1.0 + CHANCE_TOLERANCE {
        return Err(ConfigError::ChancesExceedOne { total });
    }

    Ok(chances.into_iter().map(f64_to_fixed64).collect())
}

// ---------------------------------------------------------------------------
// ValidatedConfig
// ---------------------------------------------------------------------------

/// Line parameters that passed [`LineConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    components: ComponentSet,
    chances: Vec<Fixed64>,
    stations: usize,
    workers: usize,
    build_time: u32,
    ticks: Ticks,
    seed: u64,
}

impl ValidatedConfig {
    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    /// Per-component arrival chances, one per component in id order.
    pub fn chances(&self) -> &[Fixed64] {
        &self.chances
    }

    pub fn stations(&self) -> usize {
        self.stations
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn build_time(&self) -> u32 {
        self.build_time
    }

    pub fn ticks(&self) -> Ticks {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A fresh, empty line.
    pub fn build_conveyor(&self) -> Conveyor {
        Conveyor::new(
            self.stations,
            self.workers,
            self.build_time,
            self.components.clone(),
        )
    }

    /// The seeded arrival sampler for this configuration.
    pub fn arrivals(&self) -> WeightedArrivals {
        WeightedArrivals::new(&self.chances, self.seed)
    }

    /// A ready-to-run simulation: fresh line plus seeded arrivals.
    pub fn simulation(&self) -> Simulation<WeightedArrivals> {
        Simulation::new(self.build_conveyor(), self.arrivals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let v = LineConfig::default().validate().unwrap();
        assert_eq!(v.components().symbols(), ["A", "B"]);
        assert_eq!(v.chances().len(), 2);
        assert_eq!(v.stations(), 3);
        assert_eq!(v.workers(), 2);
        assert_eq!(v.build_time(), 4);
        assert_eq!(v.ticks(), 100);
    }

    #[test]
    fn duplicate_components_collapse() {
        let cfg = LineConfig {
            components: vec!["A".into(), "A".into()],
            ..LineConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ComponentCount {
                expected: 2,
                found: 1
            })
        );

        let cfg = LineConfig {
            components: vec!["A".into(), "B".into(), "A".into()],
            ..LineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn three_components_rejected() {
        let cfg = LineConfig {
            components: vec!["A".into(), "B".into(), "C".into()],
            ..LineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ComponentCount { found: 3, .. })
        ));
    }

    #[test]
    fn single_chance_is_broadcast() {
        let cfg = LineConfig {
            chance: vec![0.25],
            ..LineConfig::default()
        };
        let v = cfg.validate().unwrap();
        assert_eq!(v.chances(), [f64_to_fixed64(0.25), f64_to_fixed64(0.25)]);
    }

    #[test]
    fn chance_count_must_match() {
        let cfg = LineConfig {
            chance: vec![0.1, 0.2, 0.3],
            ..LineConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ChanceCount {
                components: 2,
                chances: 3
            })
        );

        let cfg = LineConfig {
            chance: vec![],
            ..LineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ChanceCount { chances: 0, .. })
        ));
    }

    #[test]
    fn chances_must_leave_room_for_nothing() {
        let cfg = LineConfig {
            chance: vec![0.6, 0.5],
            ..LineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ChancesExceedOne { .. })
        ));

        let cfg = LineConfig {
            chance: vec![0.5, 0.5],
            ..LineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn chance_range_checked() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let cfg = LineConfig {
                chance: vec![0.1, bad],
                ..LineConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::ChanceOutOfRange { index: 1, .. })
            ));
        }
    }

    #[test]
    fn line_shape_checked() {
        let no_stations = LineConfig {
            stations: 0,
            ..LineConfig::default()
        };
        assert_eq!(no_stations.validate(), Err(ConfigError::NoStations));

        let one_worker = LineConfig {
            workers: 1,
            ..LineConfig::default()
        };
        assert_eq!(
            one_worker.validate(),
            Err(ConfigError::TooFewWorkers { found: 1 })
        );

        let instant = LineConfig {
            build_time: 0,
            ..LineConfig::default()
        };
        assert_eq!(instant.validate(), Err(ConfigError::ZeroBuildTime));
    }

    #[test]
    fn builds_matching_conveyor() {
        let cfg = LineConfig {
            stations: 5,
            workers: 3,
            ..LineConfig::default()
        };
        let conveyor = cfg.validate().unwrap().build_conveyor();
        assert_eq!(conveyor.stations().len(), 5);
        assert!(conveyor.stations().iter().all(|s| s.workers().len() == 3));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            ConfigError::NoStations.to_string(),
            "there must be at least one station"
        );
        assert_eq!(
            ConfigError::ComponentCount {
                expected: 2,
                found: 3
            }
            .to_string(),
            "the number of components must be 2, got 3"
        );
    }
}
