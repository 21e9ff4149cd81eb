//! Heap Simulator CLI Library
//!
//! Provides the argument definitions, the scenario catalogue and the
//! dispatch logic behind the `gc-sim` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod scenarios;

pub use cli::{Cli, CollectorKind, Command, RunArgs};
pub use error::{CliError, CliResult};
pub use scenarios::{Scenario, Step, Transcript};

use memory_manager::{GenerationalGc, MarkSweepGc, RefCountGc};
use tracing::warn;

/// Runs the parsed command line, returning everything to print on stdout.
pub fn execute(cli: &Cli) -> CliResult<String> {
    match &cli.command {
        Command::List => Ok(list_scenarios()),
        Command::Run(args) => run_scenario(args),
    }
}

/// Renders the scenario catalogue, one scenario per line.
pub fn list_scenarios() -> String {
    let width = Scenario::all()
        .iter()
        .map(|scenario| scenario.name().len())
        .max()
        .unwrap_or(0);
    Scenario::all()
        .iter()
        .map(|scenario| format!("{:width$}  {}\n", scenario.name(), scenario.summary()))
        .collect()
}

/// Runs one scenario against the requested collector.
///
/// # Errors
///
/// [`CliError::UnknownScenario`] for names outside the catalogue, and any
/// config-loading or heap error along the way.
pub fn run_scenario(args: &RunArgs) -> CliResult<String> {
    let scenario = Scenario::find(&args.scenario)
        .ok_or_else(|| CliError::UnknownScenario(args.scenario.clone()))?;
    let config = args.gc_config()?;

    let mut out = match args.collector {
        CollectorKind::Generational => {
            let mut heap: GenerationalGc<&'static str> = GenerationalGc::with_config(config)?;
            let mut out = scenario.run(&mut heap)?.to_string();
            if args.stats_json {
                out.push('\n');
                out.push_str(&serde_json::to_string_pretty(heap.stats())?);
            }
            out
        }
        CollectorKind::MarkSweep => {
            let mut heap: MarkSweepGc<&'static str> = MarkSweepGc::new();
            scenario.run(&mut heap)?.to_string()
        }
        CollectorKind::RefCount => {
            let mut heap: RefCountGc<&'static str> = RefCountGc::new();
            scenario.run(&mut heap)?.to_string()
        }
    };

    if args.stats_json && args.collector != CollectorKind::Generational {
        warn!(collector = ?args.collector, "--stats-json is only supported for the generational collector");
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
