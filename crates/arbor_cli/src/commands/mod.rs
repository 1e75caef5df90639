//! Subcommand implementations

mod check;
mod tokenize;

pub use check::run_check;
pub use tokenize::run_tokenize;
