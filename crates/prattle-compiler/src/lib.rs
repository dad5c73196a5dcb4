//! Prattle grammar compiler.
//!
//! Turns grammar text into a [`Rules`] registry runnable by
//! [`prattle_engine::Parser`]:
//! - `grammar` - the grammar language, its bootstrap and the compile pipeline
//! - `diagnostics` - validation findings and their rendering
//!
//! ```
//! use prattle_compiler::Grammar;
//!
//! let grammar = Grammar::compile("digit -> `\\d`").unwrap();
//! let tree = grammar.parse("digit", "7").unwrap();
//! assert_eq!(tree.text(), Some("7"));
//! ```
//!
//! [`Rules`]: prattle_engine::Rules

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod grammar;

#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use grammar::{BOOTSTRAP_GRAMMAR, Grammar, GrammarCompiler};

use prattle_engine::{ParseError, PatternError};

/// Errors that can occur while compiling grammar text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The text is not in the grammar language.
    #[error("grammar syntax error: {0}")]
    GrammarSyntax(ParseError),

    /// The text parsed but failed validation.
    #[error("grammar validation failed with {} errors", .0.error_count())]
    GrammarInvalid(Diagnostics),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The grammar-language parser produced a tree the compiler cannot read.
    /// Only possible with a bootstrap grammar whose rules were altered.
    #[error("malformed grammar tree: expected {expected} at {offset}")]
    MalformedTree {
        expected: &'static str,
        offset: usize,
    },
}

impl Error {
    /// Render against the grammar text the error came from.
    pub fn render(&self, source: &str) -> String {
        match self {
            Self::GrammarSyntax(error) => error.render(source),
            Self::GrammarInvalid(diagnostics) => diagnostics.render(source),
            _ => self.to_string(),
        }
    }
}

/// Result type for grammar compilation.
pub type Result<T> = std::result::Result<T, Error>;
