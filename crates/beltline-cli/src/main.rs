mod cli;

use std::io::{self, Write};

use anyhow::Context;
use beltline_core::config::LineConfig;
use beltline_core::loader::load_config;
use beltline_core::sim::RunReport;
use beltline_core::trace::{LogTrace, WriterTrace};
use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    run(&cli, &mut io::stdout().lock())
}

/// Resolve the configuration, run the line and print the report to `out`.
fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LineConfig::default(),
    };
    cli.apply(&mut config);

    let config = config.validate().context("invalid configuration")?;
    let mut sim = config.simulation();

    let (report, trace) = match cli.trace_path() {
        Some(path) => {
            let mut trace = WriterTrace::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let report = sim.run_traced(config.ticks(), &mut trace);
            (report, Some((path, trace)))
        }
        None if cli.verbose => (sim.run_traced(config.ticks(), &mut LogTrace), None),
        None => (sim.run(config.ticks()), None),
    };

    print_report(&report, cli.json, out)?;

    if let Some((path, mut trace)) = trace {
        trace
            .flush()
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("trace written to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &RunReport, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        write!(out, "{report}")?;
    }
    Ok(())
}
