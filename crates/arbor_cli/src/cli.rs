//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Arbor - Regex tokenizer and tree rewriting toolkit
#[derive(Parser)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize a file with a grammar
    Tokenize {
        /// File to tokenize
        file: PathBuf,

        /// Grammar file (JSON or JSONC)
        #[arg(short, long)]
        grammar: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check that every pattern of a grammar compiles
    Check {
        /// Grammar file (JSON or JSONC)
        #[arg(short, long)]
        grammar: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `line:column kind value` line per token
    Text,
    /// A JSON array of tokens
    Json,
}
