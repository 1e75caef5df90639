//! # arbor_parser
//!
//! Glue between the Arbor tokenizer and hand-written lexers.
//!
//! A [`Parser`] tokenizes its input, hands the resulting stream to a
//! [`Lexer`] that builds the tree, and checks that every token was used.
//! The produced tree is then ready for `arbor_tree` traversals.

mod error;
mod parser;
mod traits;

pub use error::ParseError;
pub use parser::Parser;
pub use traits::Lexer;
