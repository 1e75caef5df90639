//! # arbor_token
//!
//! Tokens, token streams and the regex tokenizer used by Arbor front ends.
//!
//! ## Example
//!
//! ```rust
//! use arbor_token::{Tokenizer, TokenizerConfig};
//!
//! let config = TokenizerConfig::from_json(r#"{
//!     "patterns": [
//!         { "name": "number", "pattern": "[0-9]+" },
//!         { "name": "space", "pattern": "\\s+" }
//!     ],
//!     "skip": ["space"]
//! }"#).unwrap();
//!
//! let mut stream = Tokenizer::from_config(&config).tokenize("1 2").unwrap();
//! assert_eq!(stream.expect("number").unwrap().value, "1");
//! assert_eq!(stream.expect("number").unwrap().value, "2");
//! assert!(stream.is_empty());
//! ```

mod config;
mod error;
mod span;
mod stream;
mod token;
mod tokenizer;

pub use config::{Pattern, TokenizerConfig};
pub use error::{ConfigError, SyntaxError, TokenError};
pub use span::{Position, Span};
pub use stream::{TokenStream, ValueFilter};
pub use token::Token;
pub use tokenizer::Tokenizer;
