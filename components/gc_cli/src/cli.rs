//! Command-line argument definitions

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use memory_manager::GcConfig;

use crate::error::CliResult;

/// Generational heap simulator
#[derive(Parser, Debug)]
#[command(name = "gc-sim")]
#[command(about = "Run scripted heap scenarios against a choice of collectors", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging from the collectors
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available scenarios
    List,

    /// Run one scenario and print its transcript
    Run(RunArgs),
}

/// Which collector a scenario runs against
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectorKind {
    /// Two generations with a card-table write barrier
    #[default]
    Generational,
    /// Single-generation mark-sweep
    MarkSweep,
    /// Eager reference counting
    RefCount,
}

/// Options for `gc-sim run`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Scenario name (see `gc-sim list`)
    pub scenario: String,

    /// Collector to drive
    #[arg(long, value_enum, default_value_t = CollectorKind::Generational)]
    pub collector: CollectorKind,

    /// JSON file with collector settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the promotion age
    #[arg(long, value_name = "N")]
    pub promotion_age: Option<u32>,

    /// Override the number of minor collections between full collections
    #[arg(long, value_name = "N")]
    pub full_gc_interval: Option<u64>,

    /// Keep cards for old objects that still reference young objects
    #[arg(long)]
    pub retain_live_cards: bool,

    /// Print collector statistics as JSON after the transcript
    #[arg(long)]
    pub stats_json: bool,
}

impl RunArgs {
    /// Builds the collector configuration: file first, then flags.
    pub fn gc_config(&self) -> CliResult<GcConfig> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => GcConfig::default(),
        };
        if let Some(age) = self.promotion_age {
            config = config.with_promotion_age(age);
        }
        if let Some(interval) = self.full_gc_interval {
            config = config.with_full_gc_interval(interval);
        }
        if self.retain_live_cards {
            config = config.with_retain_live_cards(true);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(scenario: &str) -> RunArgs {
        RunArgs {
            scenario: scenario.to_string(),
            collector: CollectorKind::default(),
            config: None,
            promotion_age: None,
            full_gc_interval: None,
            retain_live_cards: false,
            stats_json: false,
        }
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        assert_eq!(run_args("promotion").gc_config().unwrap(), GcConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = run_args("promotion");
        args.promotion_age = Some(4);
        let config = args.gc_config().unwrap();
        assert_eq!(config.promotion_age, 4);
        assert_eq!(config.full_gc_interval, 8);
    }

    #[test]
    fn test_retain_live_cards_flag() {
        let mut args = run_args("old-to-young");
        assert!(!args.gc_config().unwrap().retain_live_cards);
        args.retain_live_cards = true;
        assert!(args.gc_config().unwrap().retain_live_cards);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let mut args = run_args("promotion");
        args.full_gc_interval = Some(0);
        assert!(args.gc_config().is_err());
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let mut args = run_args("promotion");
        args.config = Some(PathBuf::from("/nonexistent/gc-sim/config.json"));
        assert!(matches!(args.gc_config(), Err(crate::CliError::Io(_))));
    }
}
