//! Generational heap simulator CLI
//!
//! Entry point for `gc-sim`. Parses CLI arguments, installs logging and
//! delegates to the library for execution.

use clap::Parser as ClapParser;
use gc_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match gc_cli::execute(&cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so transcripts on stdout stay clean. `RUST_LOG` adds
/// directives on top of the default level.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}
