//! Tokenizer, token stream and configuration errors.

use miette::Diagnostic;
use thiserror::Error;

use crate::{Position, Token};

/// Failure to split input into tokens.
#[derive(Debug, Error, Diagnostic)]
pub enum SyntaxError {
    /// The tokenizer has no patterns.
    #[error("No token patterns are defined")]
    #[diagnostic(code(arbor::syntax::no_patterns))]
    NoPatterns,

    /// A pattern failed to compile.
    #[error("Invalid pattern for `{name}`")]
    #[diagnostic(code(arbor::syntax::invalid_pattern))]
    InvalidPattern {
        /// Token kind of the pattern.
        name: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// No pattern matches the input at `position`.
    #[error("Unable to match a token at {position}")]
    #[diagnostic(code(arbor::syntax::no_match))]
    NoMatch {
        /// Line and column of the unmatched text.
        position: Position,
        /// Byte offset of the unmatched text.
        #[label("no pattern matches here")]
        offset: usize,
    },

    /// A pattern matched the empty string.
    #[error("Pattern `{kind}` matched an empty string at {position}")]
    #[diagnostic(
        code(arbor::syntax::empty_match),
        help("token patterns must consume at least one character")
    )]
    EmptyMatch {
        /// Token kind of the pattern.
        kind: String,
        /// Where the empty match happened.
        position: Position,
    },
}

/// An expectation on a token stream that was not met.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TokenError {
    /// The next token does not fit. It has been consumed.
    #[error("Unexpected token `{}` at {}", .0.value, .0.location())]
    #[diagnostic(code(arbor::token::unexpected_token))]
    UnexpectedToken(Box<Token>),

    /// The stream ran out of tokens.
    #[error("Unexpected end of input")]
    #[diagnostic(code(arbor::token::unexpected_end))]
    UnexpectedEnd,
}

impl TokenError {
    /// Creates an unexpected token error.
    pub fn unexpected(token: Token) -> Self {
        Self::UnexpectedToken(Box::new(token))
    }

    /// Returns the offending token, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::UnexpectedToken(token) => Some(token),
            Self::UnexpectedEnd => None,
        }
    }
}

/// Failure to load a tokenizer configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read grammar: {0}")]
    #[diagnostic(code(arbor::config::io))]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON/JSONC or has the wrong shape.
    #[error("Invalid grammar: {0}")]
    #[diagnostic(code(arbor::config::invalid))]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid configuration error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
