//! Check command implementation

use std::path::Path;

use arbor_token::Tokenizer;
use miette::{Result, WrapErr};
use tracing::info;

pub fn run_check(grammar: &Path) -> Result<()> {
    let tokenizer = Tokenizer::from_file(grammar)
        .wrap_err_with(|| format!("Failed to load grammar {}", grammar.display()))?;

    tokenizer.validate()?;

    let config = tokenizer.config();
    let refinements: usize = config.refinements.values().map(Vec::len).sum();
    info!(grammar = %grammar.display(), "Grammar is valid");
    println!(
        "{}: {} patterns, {} refinements, {} skipped kinds",
        grammar.display(),
        config.patterns.len(),
        refinements,
        config.skip.len()
    );
    Ok(())
}
