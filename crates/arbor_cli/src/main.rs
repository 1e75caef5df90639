//! Arbor CLI
//!
//! Runs grammar files through the Arbor tokenizer.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_check, run_tokenize};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Tokenize {
            file,
            grammar,
            format,
        } => run_tokenize(file, grammar, *format),
        Commands::Check { grammar } => run_check(grammar),
    }
}
