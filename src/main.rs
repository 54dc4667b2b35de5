//! sqa - Skill Quality Analyzer CLI
//!
//! Scores a skill directory and prints a JSON quality report.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sqa::cli::{Cli, Outcome};

/// Exit status when `--min-score` is not met.
const BELOW_THRESHOLD: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match sqa::cli::run(&cli) {
        Ok(Outcome::Passed) => ExitCode::SUCCESS,
        Ok(Outcome::BelowThreshold { .. }) => ExitCode::from(BELOW_THRESHOLD),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "warn,sqa=info",
        2 => "info,sqa=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays a single JSON document.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
