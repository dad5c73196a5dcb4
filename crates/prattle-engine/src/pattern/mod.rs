//! Pattern combinators.
//!
//! A `Pattern` is built once and matched many times. Matching never mutates
//! the pattern; all per-parse state lives in [`ParserContext`].
//!
//! Contract of [`Pattern::try_match`]: on success the cursor sits at the end
//! of the consumed span, on failure it is back where the call started.
//! Trivia is skipped at the start of every match, so node offsets point at
//! significant input.

mod choice;
mod display;
mod label;
mod lookahead;
mod lookup;
mod quantifier;
mod sequence;
mod terminal;

#[cfg(test)]
mod pattern_tests;

pub use choice::Choice;
pub use label::Label;
pub use lookahead::Lookahead;
pub use lookup::Lookup;
pub use quantifier::Quantifier;
pub use sequence::{Sequence, Step};
pub use terminal::Terminal;

use prattle_core::ParseNode;

use crate::context::ParserContext;
use crate::error::PatternError;
use crate::expression::{ExpressionPattern, OperatorInfo};
use crate::trace::Tracer;

#[derive(Debug, Clone)]
pub enum Pattern {
    Terminal(Terminal),
    Sequence(Sequence),
    Choice(Choice),
    Quantifier(Quantifier),
    Lookup(Lookup),
    Label(Label),
    Lookahead(Lookahead),
    Expression(ExpressionPattern),
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Terminal(Terminal::literal(text))
    }

    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Terminal::regex(pattern).map(Self::Terminal)
    }

    pub fn sequence(steps: impl IntoIterator<Item = Step>) -> Result<Self, PatternError> {
        Sequence::new(steps.into_iter().collect()).map(Self::Sequence)
    }

    pub fn choice(alternatives: impl IntoIterator<Item = Pattern>) -> Result<Self, PatternError> {
        Choice::new(alternatives.into_iter().collect()).map(Self::Choice)
    }

    pub fn lookup(key: impl Into<String>) -> Self {
        Self::Lookup(Lookup::new(key))
    }

    pub fn expression(operators: Vec<OperatorInfo>) -> Result<Self, PatternError> {
        ExpressionPattern::new(operators).map(Self::Expression)
    }

    pub fn label(self, name: impl Into<String>) -> Self {
        Self::Label(Label::new(name, self))
    }

    /// Repeat between `min` and `max` times (`None` = unbounded).
    pub fn repeat(self, min: u32, max: Option<u32>) -> Result<Self, PatternError> {
        Quantifier::new(self, min, max).map(Self::Quantifier)
    }

    /// `self?`
    pub fn optional(self) -> Self {
        Self::Quantifier(Quantifier::unchecked(self, 0, Some(1)))
    }

    /// `self*`
    pub fn star(self) -> Self {
        Self::Quantifier(Quantifier::unchecked(self, 0, None))
    }

    /// `self+`
    pub fn plus(self) -> Self {
        Self::Quantifier(Quantifier::unchecked(self, 1, None))
    }

    /// `!self`: succeeds where `self` fails, consuming nothing.
    pub fn not(self) -> Self {
        Self::Lookahead(Lookahead::new(self, false))
    }

    /// `&self`: succeeds where `self` succeeds, consuming nothing.
    pub fn and(self) -> Self {
        Self::Lookahead(Lookahead::new(self, true))
    }

    /// Match at the context cursor.
    pub fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        if !ctx.consume_fuel() {
            return None;
        }
        let start = ctx.offset();
        ctx.skip_trivia();

        let result = match self {
            Self::Terminal(p) => p.try_match(ctx),
            Self::Sequence(p) => p.try_match(ctx),
            Self::Choice(p) => p.try_match(ctx),
            Self::Quantifier(p) => p.try_match(ctx),
            Self::Lookup(p) => p.try_match(ctx),
            Self::Label(p) => p.try_match(ctx),
            Self::Lookahead(p) => p.try_match(ctx),
            Self::Expression(p) => p.try_match(ctx),
        };

        // Lookahead is zero-width, trivia included.
        if result.is_none() || matches!(self, Self::Lookahead(_)) {
            ctx.set_offset(start);
        }
        result
    }

    /// Rule names referenced by this pattern, in order of appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Terminal(_) => {}
            Self::Sequence(p) => {
                for step in p.steps() {
                    step.pattern.collect_references(out);
                }
            }
            Self::Choice(p) => {
                for alternative in p.alternatives() {
                    alternative.collect_references(out);
                }
            }
            Self::Quantifier(p) => p.inner().collect_references(out),
            Self::Lookup(p) => out.push(p.key()),
            Self::Label(p) => p.inner().collect_references(out),
            Self::Lookahead(p) => p.inner().collect_references(out),
            Self::Expression(p) => {
                for op in p.operators() {
                    op.pattern.collect_references(out);
                }
            }
        }
    }
}

impl From<Terminal> for Pattern {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}
