//! Tokenizer grammar configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A named token pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Token kind produced by the pattern.
    pub name: String,
    /// Regular expression, matched at the current input offset.
    pub pattern: String,
}

impl Pattern {
    /// Creates a pattern.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Token patterns loaded from a JSON or JSONC grammar file.
///
/// ```jsonc
/// {
///   "patterns": [{ "name": "number", "pattern": "[0-9]+" }],
///   "refinements": { "word": [{ "name": "keyword", "pattern": "let|in" }] },
///   "skip": ["whitespace"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Primary patterns in priority order.
    pub patterns: Vec<Pattern>,

    /// Patterns re-applied to the text of tokens of the keyed kind.
    pub refinements: BTreeMap<String, Vec<Pattern>>,

    /// Token kinds dropped from the produced stream.
    pub skip: Vec<String>,
}

impl TokenizerConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parses a configuration from JSON. Comments and trailing commas are
    /// accepted.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| ConfigError::invalid(e.to_string()))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value).map_err(|e| ConfigError::invalid(e.to_string()))
    }
}
