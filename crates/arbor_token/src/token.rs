//! Lexical tokens.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Position, Span};

/// A typed piece of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Name of the pattern that produced the token.
    pub kind: String,
    /// The matched text.
    pub value: String,
    /// Source file, when tokenized from a named file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Position of the first character.
    pub position: Position,
    /// Byte range in the source text.
    pub span: Span,
}

impl Token {
    /// Creates a token at the start of the input.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let span = Span::new(0, value.len());
        Self {
            kind: kind.into(),
            value,
            file: None,
            position: Position::default(),
            span,
        }
    }

    /// Sets the position and byte range.
    pub fn at(mut self, position: Position, span: Span) -> Self {
        self.position = position;
        self.span = span;
        self
    }

    /// Sets the source file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Returns true if the token has the given kind.
    #[inline]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Returns true if the token has the given kind and value.
    #[inline]
    pub fn is_value(&self, kind: &str, value: &str) -> bool {
        self.is(kind) && self.value == value
    }

    /// Returns true if the value matches `regex`.
    pub fn matches(&self, regex: &Regex) -> bool {
        regex.is_match(&self.value)
    }

    /// Formats the location as `file:line:column` or `line:column`.
    pub fn location(&self) -> String {
        match &self.file {
            Some(file) => format!("{}:{}", file, self.position),
            None => self.position.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
