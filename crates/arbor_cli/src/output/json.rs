//! JSON output formatter

use arbor_token::TokenStream;
use miette::{IntoDiagnostic, Result};

pub fn output_json(stream: &TokenStream) -> Result<()> {
    let tokens = stream.tokens();
    println!(
        "{}",
        serde_json::to_string_pretty(&tokens).into_diagnostic()?
    );
    Ok(())
}
