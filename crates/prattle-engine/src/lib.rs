#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Backtracking pattern combinators with an operator-precedence expression
//! engine on top.
//!
//! A grammar is a [`Rules`] registry of named [`Pattern`]s. [`Parser`] applies
//! one of them to source text and returns a [`ParseNode`] tree or the
//! furthest [`ParseError`]. Semantics are PEG: ordered choice, greedy
//! repetition, no memoization.
//!
//! [`ParseNode`]: prattle_core::ParseNode

mod context;
mod error;
mod parser;
mod rules;
mod trace;

pub mod expression;
pub mod pattern;

#[cfg(test)]
mod parser_tests;

pub use context::ParserContext;
pub use error::{ParseError, PatternError, Priority};
pub use expression::{ExpressionPattern, Fixity, OperatorInfo};
pub use parser::{FuelLimits, Parser, Start};
pub use pattern::{Pattern, Step};
pub use rules::{Rules, TRIVIA_RULE};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity, symbols};

pub type Result<T> = std::result::Result<T, ParseError>;
