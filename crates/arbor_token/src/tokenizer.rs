//! Regex-driven tokenizer.
//!
//! Patterns are tried in declaration order at the current offset; the first
//! one that matches wins, even when a later pattern would match more text.
//! A token kind with refinements has its text tokenized again with the
//! refinement patterns in front of the current patterns, so `let` matched
//! as a `word` can come out as a `keyword`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    ConfigError, Pattern, Position, Span, SyntaxError, Token, TokenStream, TokenizerConfig,
};

/// A pattern set compiled into one anchored alternation.
struct Compiled {
    regex: Regex,
    /// Capture group index of each pattern, in pattern order.
    groups: Vec<usize>,
}

/// Where the next token starts.
struct Cursor {
    line: u32,
    column: u32,
    eol: Option<&'static str>,
}

impl Cursor {
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self, value: &str) {
        let after_last_eol = self
            .eol
            .and_then(|eol| value.rfind(eol).map(|index| (eol, index)));

        match after_last_eol {
            Some((eol, index)) => {
                self.line += value.matches(eol).count() as u32;
                self.column = 1 + value[index + eol.len()..].chars().count() as u32;
            }
            None => self.column += value.chars().count() as u32,
        }
    }
}

/// The first line ending found in `input`.
fn line_ending(input: &str) -> Option<&'static str> {
    let index = input.find(['\r', '\n'])?;
    Some(match &input[index..] {
        rest if rest.starts_with("\r\n") => "\r\n",
        rest if rest.starts_with('\r') => "\r",
        _ => "\n",
    })
}

/// Splits text into a [`TokenStream`].
///
/// # Example
///
/// ```rust
/// use arbor_token::Tokenizer;
///
/// let tokenizer = Tokenizer::new()
///     .with_pattern("number", "[0-9]+")
///     .with_pattern("op", r"[-+*/]")
///     .with_pattern("space", r"\s+")
///     .with_skip("space");
///
/// let stream = tokenizer.tokenize("1 + 22").unwrap();
/// let kinds: Vec<_> = stream.iter().map(|t| t.kind.as_str()).collect();
/// assert_eq!(kinds, vec!["number", "op", "number"]);
/// ```
#[derive(Default)]
pub struct Tokenizer {
    patterns: Vec<Pattern>,
    refinements: BTreeMap<String, Vec<Pattern>>,
    skip: BTreeSet<String>,
    compiled: Mutex<HashMap<Vec<Pattern>, Arc<Compiled>>>,
}

impl Tokenizer {
    /// Creates a tokenizer without patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tokenizer from a grammar configuration.
    pub fn from_config(config: &TokenizerConfig) -> Self {
        Self {
            patterns: config.patterns.clone(),
            refinements: config.refinements.clone(),
            skip: config.skip.iter().cloned().collect(),
            compiled: Mutex::default(),
        }
    }

    /// Loads a grammar file and creates a tokenizer from it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        TokenizerConfig::from_file(path).map(|config| Self::from_config(&config))
    }

    /// Returns the configuration this tokenizer would be built from.
    pub fn config(&self) -> TokenizerConfig {
        TokenizerConfig {
            patterns: self.patterns.clone(),
            refinements: self.refinements.clone(),
            skip: self.skip.iter().cloned().collect(),
        }
    }

    /// Adds or replaces a primary pattern.
    pub fn with_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.set_pattern(name, pattern);
        self
    }

    /// Drops tokens of `kind` from produced streams.
    pub fn with_skip(mut self, kind: impl Into<String>) -> Self {
        self.skip.insert(kind.into());
        self
    }

    /// Adds or replaces a primary pattern. A replaced pattern keeps its
    /// priority; a new one has the lowest.
    pub fn set_pattern(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> &mut Self {
        upsert(&mut self.patterns, Pattern::new(name, pattern));
        self
    }

    /// Removes a primary pattern and returns it.
    pub fn remove_pattern(&mut self, name: &str) -> Option<String> {
        let index = self.patterns.iter().position(|p| p.name == name)?;
        Some(self.patterns.remove(index).pattern)
    }

    /// Primary patterns in priority order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Returns the primary pattern for `name`.
    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.pattern.as_str())
    }

    /// Adds or replaces one refinement pattern of `kind`.
    pub fn set_refinement(
        &mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> &mut Self {
        let set = self.refinements.entry(kind.into()).or_default();
        upsert(set, Pattern::new(name, pattern));
        self
    }

    /// Replaces all refinement patterns of `kind`.
    pub fn set_refinements(
        &mut self,
        kind: impl Into<String>,
        patterns: impl IntoIterator<Item = Pattern>,
    ) -> &mut Self {
        self.refinements
            .insert(kind.into(), patterns.into_iter().collect());
        self
    }

    /// Removes all refinement patterns of `kind` and returns them.
    pub fn remove_refinement(&mut self, kind: &str) -> Option<Vec<Pattern>> {
        self.refinements.remove(kind)
    }

    /// Refinement patterns of `kind`, empty when none are set.
    pub fn refinements(&self, kind: &str) -> &[Pattern] {
        self.refinements.get(kind).map_or(&[], Vec::as_slice)
    }

    /// Token kinds dropped from produced streams.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.skip.iter().map(String::as_str)
    }

    /// Compiles the primary pattern set and every refinement set.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        self.compile(&self.patterns)?;
        for kind in self.refinements.keys() {
            self.compile(&self.refined(kind, &self.patterns))?;
        }
        Ok(())
    }

    /// Splits `input` into tokens.
    pub fn tokenize(&self, input: &str) -> Result<TokenStream, SyntaxError> {
        self.run(input, None)
    }

    /// Splits `input` into tokens and records `file` on each of them.
    pub fn tokenize_file(&self, file: &str, input: &str) -> Result<TokenStream, SyntaxError> {
        self.run(input, Some(file))
    }

    fn run(&self, input: &str, file: Option<&str>) -> Result<TokenStream, SyntaxError> {
        let mut cursor = Cursor {
            line: 1,
            column: 1,
            eol: line_ending(input),
        };
        let mut tokens = Vec::new();
        let mut chain = Vec::new();

        self.process(&self.patterns, input, 0, &mut chain, &mut cursor, &mut tokens)?;

        if let Some(file) = file {
            for token in &mut tokens {
                token.file = Some(file.to_string());
            }
        }
        debug!(
            tokens = tokens.len(),
            bytes = input.len(),
            "Tokenized input"
        );
        Ok(TokenStream::new(tokens))
    }

    /// Tokenizes `input`, which starts at byte `base` of the source.
    fn process<'a>(
        &'a self,
        patterns: &[Pattern],
        input: &str,
        base: usize,
        chain: &mut Vec<&'a str>,
        cursor: &mut Cursor,
        tokens: &mut Vec<Token>,
    ) -> Result<(), SyntaxError> {
        let compiled = self.compile(patterns)?;
        let mut offset = 0;

        while offset < input.len() {
            let rest = &input[offset..];
            let Some(captures) = compiled.regex.captures(rest) else {
                return Err(SyntaxError::NoMatch {
                    position: cursor.position(),
                    offset: base + offset,
                });
            };
            let Some((index, matched)) = compiled
                .groups
                .iter()
                .enumerate()
                .find_map(|(index, group)| captures.get(*group).map(|m| (index, m)))
            else {
                return Err(SyntaxError::NoMatch {
                    position: cursor.position(),
                    offset: base + offset,
                });
            };

            let kind = &patterns[index].name;
            let value = matched.as_str();
            if value.is_empty() {
                return Err(SyntaxError::EmptyMatch {
                    kind: kind.clone(),
                    position: cursor.position(),
                });
            }

            let start = base + offset;
            match self.refinements.get_key_value(kind.as_str()) {
                Some((refined, _)) if !chain.contains(&refined.as_str()) => {
                    let refined_patterns = self.refined(refined, patterns);
                    chain.push(refined.as_str());
                    self.process(&refined_patterns, value, start, chain, cursor, tokens)?;
                    chain.pop();
                }
                _ => {
                    let position = cursor.position();
                    cursor.advance(value);
                    if !self.skip.contains(kind) {
                        tokens.push(
                            Token::new(kind.clone(), value)
                                .at(position, Span::new(start, start + value.len())),
                        );
                    }
                }
            }

            offset += value.len();
        }

        Ok(())
    }

    /// Refinements of `kind` followed by the patterns they do not shadow.
    fn refined(&self, kind: &str, patterns: &[Pattern]) -> Vec<Pattern> {
        let refinements = self.refinements(kind);
        refinements
            .iter()
            .chain(
                patterns
                    .iter()
                    .filter(|p| !refinements.iter().any(|r| r.name == p.name)),
            )
            .cloned()
            .collect()
    }

    fn compile(&self, patterns: &[Pattern]) -> Result<Arc<Compiled>, SyntaxError> {
        if patterns.is_empty() {
            return Err(SyntaxError::NoPatterns);
        }
        if let Some(compiled) = self.compiled.lock().get(patterns) {
            return Ok(Arc::clone(compiled));
        }

        let mut alternatives = Vec::with_capacity(patterns.len());
        for (index, pattern) in patterns.iter().enumerate() {
            Regex::new(&pattern.pattern).map_err(|source| SyntaxError::InvalidPattern {
                name: pattern.name.clone(),
                source,
            })?;
            alternatives.push(format!("(?P<arbor_{}>{})", index, pattern.pattern));
        }

        let source = format!(r"\A(?:{})", alternatives.join("|"));
        let regex = Regex::new(&source).map_err(|source| SyntaxError::InvalidPattern {
            name: patterns
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join("|"),
            source,
        })?;

        let names: HashMap<&str, usize> = regex
            .capture_names()
            .enumerate()
            .filter_map(|(group, name)| name.map(|name| (name, group)))
            .collect();
        let groups = (0..patterns.len())
            .map(|index| {
                names
                    .get(format!("arbor_{}", index).as_str())
                    .copied()
                    .unwrap_or(0)
            })
            .collect();

        trace!(patterns = patterns.len(), "Compiled pattern set");
        let compiled = Arc::new(Compiled { regex, groups });
        self.compiled
            .lock()
            .insert(patterns.to_vec(), Arc::clone(&compiled));
        Ok(compiled)
    }
}

fn upsert(set: &mut Vec<Pattern>, pattern: Pattern) {
    match set.iter_mut().find(|p| p.name == pattern.name) {
        Some(existing) => existing.pattern = pattern.pattern,
        None => set.push(pattern),
    }
}

impl Clone for Tokenizer {
    fn clone(&self) -> Self {
        Self {
            patterns: self.patterns.clone(),
            refinements: self.refinements.clone(),
            skip: self.skip.clone(),
            compiled: Mutex::default(),
        }
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("patterns", &self.patterns)
            .field("refinements", &self.refinements)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}
