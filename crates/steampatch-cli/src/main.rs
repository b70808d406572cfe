mod cli;
mod commands;
mod config;
mod prompter;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use steampatch::{Action, Policy, ReplacementPayload};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Mode};
use crate::config::{FileConfig, RunConfig};
use crate::prompter::CliPrompter;

/// Exit code when the search directory does not exist
const EXIT_MISSING_PATH: u8 = 1;
/// Exit code when one or more installations failed to process
const EXIT_BATCH_ERRORS: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so listings on stdout stay clean
    let default_level = if cli.verbose {
        "steampatch=debug"
    } else {
        "steampatch=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    if !cli.search_dir.is_dir() {
        eprintln!("ERROR: Cannot find path \"{}\"", cli.search_dir.display());
        return Ok(ExitCode::from(EXIT_MISSING_PATH));
    }

    let file_config = FileConfig::load_or_default(cli.config.as_deref());
    let config = RunConfig::resolve(&cli, file_config)?;
    debug!("Effective settings: {:?}", config);

    let payload = ReplacementPayload::load_dir(&config.payload_dir).with_context(|| {
        format!(
            "Failed to load replacement binaries from {}",
            config.payload_dir.display()
        )
    })?;
    info!("Loaded replacement binaries from {}", config.payload_dir.display());

    let policy = match config.mode {
        Mode::List { json } => {
            commands::list::run(&config, &payload, json)?;
            return Ok(ExitCode::SUCCESS);
        }
        Mode::Patch => {
            println!("Mode: Patch All");
            Policy::Apply(Action::Patch)
        }
        Mode::Unpatch => {
            println!("Mode: Unpatch All");
            Policy::Apply(Action::Unpatch)
        }
        Mode::Interactive => {
            println!("Mode: Interactive");
            Policy::Ask
        }
    };

    let summary = commands::process::run(&config, &payload, policy, &CliPrompter);
    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_BATCH_ERRORS))
    }
}
