//! Command-line surface for sqa.

pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};

use crate::config::{Config, OutputFormat};
use crate::error::{Result, SqaError};
use crate::quality::analyze_skill;

use self::output::{emit_human, emit_json, render_report};

#[derive(Parser, Debug)]
#[command(name = "sqa", version, about = "Score a skill bundle across six quality dimensions")]
pub struct Cli {
    /// Path to the skill directory
    #[arg(long, value_name = "PATH")]
    pub skill_path: PathBuf,

    /// Config file (defaults to $SQA_CONFIG, then <config dir>/sqa/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit with status 2 when the overall score is below this value
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub min_score: Option<u32>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long)]
    pub quiet: bool,
}

/// How a completed run should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    BelowThreshold { score: u32, min_score: u32 },
}

pub fn run(cli: &Cli) -> Result<Outcome> {
    let skill_path = resolve_skill_path(&cli.skill_path)?;
    let config = effective_config(cli)?;
    info!(path = %skill_path.display(), "analyzing skill");

    let report = analyze_skill(&skill_path)?;
    match config.output.format {
        OutputFormat::Json => emit_json(&report)?,
        OutputFormat::Human => emit_human(render_report(&report)),
    }

    let score = report.overall_score();
    match config.gate.min_score {
        Some(min_score) if !config.gate.passes(score) => {
            warn!(score, min_score, "overall score below threshold");
            Ok(Outcome::BelowThreshold { score, min_score })
        }
        _ => Ok(Outcome::Passed),
    }
}

fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.min_score.is_some() {
        config.gate.min_score = cli.min_score;
    }
    Ok(config)
}

/// Expand a leading `~` and resolve to an absolute, symlink-free path.
pub fn resolve_skill_path(input: &Path) -> Result<PathBuf> {
    let expanded = expand_home(input);
    match expanded.canonicalize() {
        Ok(path) => Ok(path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let shown = std::path::absolute(&expanded).unwrap_or(expanded);
            Err(SqaError::SkillPathNotFound(shown))
        }
        Err(err) => Err(err.into()),
    }
}

fn expand_home(input: &Path) -> PathBuf {
    let Some(raw) = input.to_str() else {
        return input.to_path_buf();
    };
    if let Some(stripped) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    input.to_path_buf()
}
