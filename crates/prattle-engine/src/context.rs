//! Mutable state of a single parse.

use std::ops::Range;

use prattle_core::ParseNode;

use crate::Rules;
use crate::error::{ParseError, Priority};
use crate::parser::FuelLimits;
use crate::trace::{NoopTracer, Tracer};

/// Best failure seen so far, ordered by `(offset, priority)`.
#[derive(Debug)]
struct Failure {
    offset: usize,
    priority: Priority,
    error: ParseError,
}

/// Cursor, error slots and limits threaded through every `try_match`.
///
/// Patterns and rules are shared and immutable; everything a parse mutates
/// lives here, so separate parses never interfere.
pub struct ParserContext<'a, T: Tracer = NoopTracer> {
    source: &'a str,
    rules: &'a Rules,
    offset: usize,
    end: usize,

    best: Option<Failure>,
    /// Set once by grammar-authoring or resource errors. Every pattern
    /// returns `None` immediately afterwards.
    fatal: Option<ParseError>,

    /// When > 0, failures are not recorded (lookahead probes, trivia).
    quiet_depth: u32,
    /// Offset where the expression engine is looking for a continuation.
    probe_at: Option<usize>,
    in_trivia: bool,

    exec_fuel: Option<u32>,
    recursion_depth: u32,
    recursion_limit: Option<u32>,

    tracer: &'a mut T,
}

impl<'a, T: Tracer> ParserContext<'a, T> {
    pub(crate) fn new(
        rules: &'a Rules,
        source: &'a str,
        range: Range<usize>,
        limits: FuelLimits,
        tracer: &'a mut T,
    ) -> Self {
        Self {
            source,
            rules,
            offset: range.start,
            end: range.end,
            best: None,
            fatal: None,
            quiet_depth: 0,
            probe_at: None,
            in_trivia: false,
            exec_fuel: limits.get_exec_fuel(),
            recursion_depth: 0,
            recursion_limit: limits.get_recursion_limit(),
            tracer,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn rules(&self) -> &'a Rules {
        self.rules
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        debug_assert!(offset <= self.end, "offset {offset} past end {}", self.end);
        self.offset = offset;
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..self.end]
    }

    pub fn tracer(&mut self) -> &mut T {
        &mut *self.tracer
    }

    pub fn is_aborted(&self) -> bool {
        self.fatal.is_some()
    }

    /// Abort the parse. The first fatal error wins.
    pub(crate) fn abort(&mut self, error: ParseError) {
        if self.fatal.is_none() {
            self.fatal = Some(error);
        }
    }

    /// Charge one pattern invocation. Returns `false` if matching must stop.
    pub(crate) fn consume_fuel(&mut self) -> bool {
        if self.fatal.is_some() {
            return false;
        }
        if let Some(fuel) = &mut self.exec_fuel {
            if *fuel == 0 {
                let offset = self.offset;
                self.abort(ParseError::ExecFuelExhausted { offset });
                return false;
            }
            *fuel -= 1;
        }
        true
    }

    /// Enter a rule body. Returns `false` if the recursion limit is hit.
    pub(crate) fn enter_rule(&mut self) -> bool {
        if let Some(limit) = self.recursion_limit
            && self.recursion_depth >= limit
        {
            let offset = self.offset;
            self.abort(ParseError::RecursionLimitExceeded { offset });
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_rule(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    /// Run `f` without recording failures.
    pub(crate) fn quietly<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.quiet_depth += 1;
        let result = f(self);
        self.quiet_depth -= 1;
        result
    }

    /// Consume trivia at the cursor, if the grammar defines any.
    pub(crate) fn skip_trivia(&mut self) {
        if self.in_trivia {
            return;
        }
        let rules = self.rules;
        let Some(trivia) = rules.trivia() else {
            return;
        };
        self.in_trivia = true;
        self.quietly(|ctx| trivia.try_match(ctx));
        self.in_trivia = false;
    }

    pub(crate) fn in_trivia(&self) -> bool {
        self.in_trivia
    }

    /// Offset of the next significant input, without moving the cursor.
    pub(crate) fn peek_past_trivia(&mut self) -> usize {
        let offset = self.offset;
        self.skip_trivia();
        let significant = self.offset;
        self.offset = offset;
        significant
    }

    /// Swap the expression probe offset, returning the previous one.
    pub(crate) fn set_probe(&mut self, probe_at: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.probe_at, probe_at)
    }

    /// A terminal described as `expected` did not match at `offset`.
    pub(crate) fn expect_token(&mut self, offset: usize, expected: &str) {
        let priority = if self.probe_at == Some(offset) {
            Priority::Probe
        } else {
            Priority::Token
        };
        let error = ParseError::UnexpectedToken {
            offset,
            expected: vec![expected.to_string()],
        };
        self.record(error, priority);
    }

    /// An expression operand was required at `offset`.
    pub(crate) fn expect_term(&mut self, offset: usize) {
        self.record(ParseError::ExpressionTerm { offset }, Priority::Term);
    }

    fn record(&mut self, error: ParseError, priority: Priority) {
        if self.quiet_depth > 0 {
            return;
        }
        let offset = error.offset();

        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| (offset, priority) > (best.offset, best.priority));
        if improves {
            self.best = Some(Failure {
                offset,
                priority,
                error,
            });
            return;
        }

        // Same key: collect every terminal expected at this position.
        if let Some(best) = &mut self.best
            && (best.offset, best.priority) == (offset, priority)
            && let ParseError::UnexpectedToken { expected, .. } = &mut best.error
            && let ParseError::UnexpectedToken { expected: more, .. } = error
        {
            for item in more {
                if !expected.contains(&item) {
                    expected.push(item);
                }
            }
        }
    }

    /// Turn the outcome of the start pattern into the parse result.
    ///
    /// A fatal error wins over everything. A match must reach the end of the
    /// range (trailing trivia allowed), otherwise the furthest failure is
    /// reported with "end of input" merged into its expectations.
    pub(crate) fn finish(mut self, matched: Option<ParseNode>) -> Result<ParseNode, ParseError> {
        if let Some(node) = matched {
            self.skip_trivia();
            if self.fatal.is_none() && self.offset == self.end {
                return Ok(node);
            }
            let offset = self.offset;
            self.probe_at = None;
            self.expect_token(offset, "end of input");
        }

        if let Some(fatal) = self.fatal {
            return Err(fatal);
        }
        Err(self
            .best
            .map(|failure| failure.error)
            .unwrap_or(ParseError::UnexpectedToken {
                offset: self.offset,
                expected: Vec::new(),
            }))
    }
}
