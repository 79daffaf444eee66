//! Command-line interface for the `beltline` binary.
//!
//! Every line parameter can come from a config file (`--config`) and be
//! overridden by the matching flag.

use std::path::PathBuf;

use beltline_core::config::LineConfig;
use clap::Parser;

/// Default trace file written by `--debug`.
pub const DEFAULT_DEBUG_FILE: &str = "debug.txt";

/// Simulate an assembly line fed by a conveyor belt.
#[derive(Debug, Parser)]
#[command(name = "beltline", version, about)]
pub struct Cli {
    /// TOML, RON or JSON file with line parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long)]
    pub iterations: Option<u64>,

    /// Component symbols; exactly two distinct ones are required.
    #[arg(long, num_args = 1..)]
    pub components: Option<Vec<String>>,

    /// Arrival chance per component. One value applies to every component.
    #[arg(long, num_args = 1..)]
    pub chance: Option<Vec<f64>>,

    /// Number of stations along the belt.
    #[arg(long)]
    pub stations: Option<usize>,

    /// Workers at each station.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Ticks a worker needs to assemble a product.
    #[arg(long)]
    pub time: Option<u32>,

    /// Seed for arrival sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the line before and after processing, one tick per line.
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Trace file for `--debug`; implies `--debug`.
    #[arg(long)]
    pub debug_file: Option<PathBuf>,

    /// Print the run report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Log every slot change at debug level unless `RUST_LOG` says
    /// otherwise.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Overwrite every field of `config` that was given on the command line.
    pub fn apply(&self, config: &mut LineConfig) {
        if let Some(n) = self.iterations {
            config.ticks = n;
        }
        if let Some(components) = &self.components {
            config.components = components.clone();
        }
        if let Some(chance) = &self.chance {
            config.chance = chance.clone();
        }
        if let Some(n) = self.stations {
            config.stations = n;
        }
        if let Some(n) = self.workers {
            config.workers = n;
        }
        if let Some(n) = self.time {
            config.build_time = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }

    /// Where to write the trace, if tracing was requested.
    pub fn trace_path(&self) -> Option<PathBuf> {
        match (&self.debug_file, self.debug) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(PathBuf::from(DEFAULT_DEBUG_FILE)),
            (None, false) => None,
        }
    }
}
