//! Lexer trait definition.

use arbor_token::TokenStream;

use crate::ParseError;

/// Builds a result, usually a tree, from a token stream.
///
/// Implementations are hand-written recursive-descent builders. They take
/// tokens from the front of the stream and leave whatever they do not
/// understand in place; [`Parser`](crate::Parser) reports leftovers.
///
/// # Example
///
/// ```rust
/// use arbor_parser::{Lexer, ParseError};
/// use arbor_token::TokenStream;
///
/// struct Sum;
///
/// impl Lexer for Sum {
///     type Output = i64;
///
///     fn generate(&self, stream: &mut TokenStream) -> Result<i64, ParseError> {
///         let mut total = 0;
///         while let Some(token) = stream.optional("number") {
///             total += token
///                 .value
///                 .parse::<i64>()
///                 .map_err(|e| ParseError::invalid_at(e.to_string(), token.clone()))?;
///         }
///         Ok(total)
///     }
/// }
/// ```
pub trait Lexer {
    /// What the lexer produces.
    type Output;

    /// Consumes tokens from `stream` and builds the output.
    fn generate(&self, stream: &mut TokenStream) -> Result<Self::Output, ParseError>;
}

impl<L: Lexer + ?Sized> Lexer for &L {
    type Output = L::Output;

    fn generate(&self, stream: &mut TokenStream) -> Result<Self::Output, ParseError> {
        (**self).generate(stream)
    }
}
