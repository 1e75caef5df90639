//! Token stream used by recursive-descent lexers.
//!
//! The stream is a queue: lexers look at the front with [`TokenStream::peek`]
//! and the `is*` family, then take tokens with [`TokenStream::consume`],
//! `expect*` (failing when the front does not fit) or `optional*` (taking
//! the front only when it fits).

use std::collections::VecDeque;
use std::fmt;

use regex::Regex;

use crate::{Token, TokenError};

/// Constraint on a token value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFilter<'a> {
    /// The value must equal this text.
    Exact(&'a str),
    /// The value must equal one of these texts.
    OneOf(&'a [&'a str]),
}

impl ValueFilter<'_> {
    /// Returns true if `value` passes the filter.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ValueFilter::Exact(expected) => *expected == value,
            ValueFilter::OneOf(expected) => expected.contains(&value),
        }
    }
}

impl<'a> From<&'a str> for ValueFilter<'a> {
    fn from(value: &'a str) -> Self {
        ValueFilter::Exact(value)
    }
}

impl<'a> From<&'a [&'a str]> for ValueFilter<'a> {
    fn from(values: &'a [&'a str]) -> Self {
        ValueFilter::OneOf(values)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for ValueFilter<'a> {
    fn from(values: &'a [&'a str; N]) -> Self {
        ValueFilter::OneOf(values)
    }
}

/// FIFO queue of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    /// Creates a stream over `tokens`.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Appends a token at the end.
    pub fn push_back(&mut self, token: Token) -> &mut Self {
        self.tokens.push_back(token);
        self
    }

    /// Puts a token back at the front.
    pub fn push_front(&mut self, token: Token) -> &mut Self {
        self.tokens.push_front(token);
        self
    }

    /// Appends all tokens of `other`.
    pub fn merge(&mut self, other: TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Drops all tokens.
    pub fn clear(&mut self) -> &mut Self {
        self.tokens.clear();
        self
    }

    /// Returns the front token.
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Returns the token `n` places after the front.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(n)
    }

    /// Removes and returns the front token.
    #[inline]
    pub fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Returns true if the front token has the given kind.
    pub fn is(&self, kind: &str) -> bool {
        self.peek().is_some_and(|token| token.is(kind))
    }

    /// Returns true if the front token has the given kind and its value
    /// passes `filter`.
    pub fn is_value<'a>(&self, kind: &str, filter: impl Into<ValueFilter<'a>>) -> bool {
        let filter = filter.into();
        self.peek()
            .is_some_and(|token| token.is(kind) && filter.accepts(&token.value))
    }

    /// Returns true if the front token has one of the given kinds.
    pub fn is_one_of(&self, kinds: &[&str]) -> bool {
        self.peek()
            .is_some_and(|token| kinds.contains(&token.kind.as_str()))
    }

    /// Returns true if the front token value matches `regex`.
    pub fn matches(&self, regex: &Regex) -> bool {
        self.peek().is_some_and(|token| token.matches(regex))
    }

    /// Consumes the front token if it has the given kind.
    pub fn expect(&mut self, kind: &str) -> Result<Token, TokenError> {
        let fits = self.is(kind);
        self.take_if(fits)
    }

    /// Consumes the front token if it has the given kind and value.
    pub fn expect_value<'a>(
        &mut self,
        kind: &str,
        filter: impl Into<ValueFilter<'a>>,
    ) -> Result<Token, TokenError> {
        let fits = self.is_value(kind, filter);
        self.take_if(fits)
    }

    /// Consumes the front token if it has one of the given kinds.
    pub fn expect_one_of(&mut self, kinds: &[&str]) -> Result<Token, TokenError> {
        let fits = self.is_one_of(kinds);
        self.take_if(fits)
    }

    /// Consumes the front token if its value matches `regex`.
    pub fn expect_match(&mut self, regex: &Regex) -> Result<Token, TokenError> {
        let fits = self.matches(regex);
        self.take_if(fits)
    }

    /// Consumes the front token only if it has the given kind.
    pub fn optional(&mut self, kind: &str) -> Option<Token> {
        if self.is(kind) {
            self.consume()
        } else {
            None
        }
    }

    /// Consumes the front token only if it has the given kind and value.
    pub fn optional_value<'a>(
        &mut self,
        kind: &str,
        filter: impl Into<ValueFilter<'a>>,
    ) -> Option<Token> {
        if self.is_value(kind, filter) {
            self.consume()
        } else {
            None
        }
    }

    /// Consumes the front token only if it has one of the given kinds.
    pub fn optional_one_of(&mut self, kinds: &[&str]) -> Option<Token> {
        if self.is_one_of(kinds) {
            self.consume()
        } else {
            None
        }
    }

    /// Consumes the front token only if its value matches `regex`.
    pub fn optional_match(&mut self, regex: &Regex) -> Option<Token> {
        if self.matches(regex) {
            self.consume()
        } else {
            None
        }
    }

    /// Number of remaining tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no token remains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the remaining tokens without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Returns the remaining tokens.
    pub fn tokens(&self) -> Vec<&Token> {
        self.tokens.iter().collect()
    }

    /// A failed expectation still consumes the offending token.
    fn take_if(&mut self, fits: bool) -> Result<Token, TokenError> {
        match (fits, self.consume()) {
            (true, Some(token)) => Ok(token),
            (false, Some(token)) => Err(TokenError::unexpected(token)),
            (_, None) => Err(TokenError::UnexpectedEnd),
        }
    }
}

impl Extend<Token> for TokenStream {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::collections::vec_deque::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{}", token))
    }
}
