//! Output formatting module

mod json;
mod text;

use arbor_token::TokenStream;
use miette::Result;

use crate::cli::OutputFormat;

pub fn output_tokens(stream: &TokenStream, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(stream)?,
        OutputFormat::Text => text::output_text(stream),
    }
    Ok(())
}
