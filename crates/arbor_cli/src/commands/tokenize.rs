//! Tokenize command implementation

use std::fs;
use std::path::Path;

use arbor_token::Tokenizer;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::output::output_tokens;

pub fn run_tokenize(file: &Path, grammar: &Path, format: OutputFormat) -> Result<()> {
    let tokenizer = Tokenizer::from_file(grammar)
        .wrap_err_with(|| format!("Failed to load grammar {}", grammar.display()))?;

    let source = fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;

    let name = file.display().to_string();
    let stream = tokenizer.tokenize_file(&name, &source)?;
    debug!(file = %name, tokens = stream.len(), "Tokenized file");

    output_tokens(&stream, format)
}
