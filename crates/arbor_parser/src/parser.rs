//! Tokenizer and lexer wiring.

use arbor_token::{TokenStream, Tokenizer};
use tracing::debug;

use crate::{Lexer, ParseError};

/// Runs a [`Tokenizer`] and a [`Lexer`] over source text.
///
/// Parsing fails with [`ParseError::Incomplete`] when the lexer leaves
/// tokens behind.
#[derive(Debug, Clone)]
pub struct Parser<L> {
    tokenizer: Tokenizer,
    lexer: L,
}

impl<L: Lexer> Parser<L> {
    /// Creates a parser.
    pub fn new(tokenizer: Tokenizer, lexer: L) -> Self {
        Self { tokenizer, lexer }
    }

    /// Returns the tokenizer.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Returns the tokenizer for editing patterns.
    pub fn tokenizer_mut(&mut self) -> &mut Tokenizer {
        &mut self.tokenizer
    }

    /// Replaces the tokenizer.
    pub fn set_tokenizer(&mut self, tokenizer: Tokenizer) -> &mut Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Returns the lexer.
    pub fn lexer(&self) -> &L {
        &self.lexer
    }

    /// Replaces the lexer.
    pub fn set_lexer(&mut self, lexer: L) -> &mut Self {
        self.lexer = lexer;
        self
    }

    /// Parses `input`.
    pub fn parse(&self, input: &str) -> Result<L::Output, ParseError> {
        let stream = self.tokenizer.tokenize(input)?;
        self.finish(stream)
    }

    /// Parses `input` read from `file`. Tokens and errors carry the file
    /// name.
    pub fn parse_file(&self, file: &str, input: &str) -> Result<L::Output, ParseError> {
        let stream = self.tokenizer.tokenize_file(file, input)?;
        self.finish(stream)
    }

    fn finish(&self, mut stream: TokenStream) -> Result<L::Output, ParseError> {
        let total = stream.len();
        let output = self.lexer.generate(&mut stream)?;

        if let Some(token) = stream.consume() {
            debug!(
                consumed = total.saturating_sub(stream.len() + 1),
                left = stream.len() + 1,
                "Lexer stopped early"
            );
            return Err(ParseError::incomplete(token));
        }
        Ok(output)
    }
}
