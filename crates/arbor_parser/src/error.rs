//! Parse error types.

use arbor_token::{SyntaxError, Token, TokenError};
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The input could not be tokenized.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    /// The lexer met a token it did not expect.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Token(#[from] TokenError),

    /// The lexer finished before the input did.
    #[error("There are still tokens to be processed, starting with `{}` at {}", .token.value, .token.location())]
    #[diagnostic(code(arbor::parse::incomplete))]
    Incomplete {
        /// The first token left over.
        token: Box<Token>,
    },

    /// The tokens are well formed but make no sense to the lexer.
    #[error("{message}")]
    #[diagnostic(code(arbor::parse::invalid))]
    Invalid {
        /// Error message.
        message: String,
        /// The token the lexer rejected, if any.
        token: Option<Box<Token>>,
    },
}

impl ParseError {
    /// Creates an incomplete input error.
    pub fn incomplete(token: Token) -> Self {
        Self::Incomplete {
            token: Box::new(token),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            token: None,
        }
    }

    /// Creates an invalid input error pointing at `token`.
    pub fn invalid_at(message: impl Into<String>, token: Token) -> Self {
        Self::Invalid {
            message: message.into(),
            token: Some(Box::new(token)),
        }
    }

    /// Returns the token the error points at, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Syntax(_) => None,
            Self::Token(err) => err.token(),
            Self::Incomplete { token } => Some(token),
            Self::Invalid { token, .. } => token.as_deref(),
        }
    }
}
