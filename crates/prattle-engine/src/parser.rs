use std::ops::Range;

use prattle_core::ParseNode;

use crate::context::ParserContext;
use crate::error::ParseError;
use crate::trace::{NoopTracer, Tracer};
use crate::{Pattern, Rules};

/// Resource limits for a parse. Both are unlimited by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuelLimits {
    /// Maximum number of pattern invocations.
    pub(crate) exec_fuel: Option<u32>,
    /// Maximum nesting of rule lookups.
    pub(crate) recursion_limit: Option<u32>,
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort after `fuel` pattern invocations.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Abort when rule lookups nest deeper than `limit`.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> Option<u32> {
        self.recursion_limit
    }
}

/// Where a parse begins: a rule of the registry, or a standalone pattern.
#[derive(Clone, Copy, Debug)]
pub enum Start<'p> {
    Rule(&'p str),
    Pattern(&'p Pattern),
}

impl<'p> From<&'p str> for Start<'p> {
    fn from(name: &'p str) -> Self {
        Self::Rule(name)
    }
}

impl<'p> From<&'p String> for Start<'p> {
    fn from(name: &'p String) -> Self {
        Self::Rule(name)
    }
}

impl<'p> From<&'p Pattern> for Start<'p> {
    fn from(pattern: &'p Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

/// Runs patterns of a rule registry over source text.
///
/// ```
/// use prattle_engine::{Parser, Pattern, Rules};
///
/// let mut rules = Rules::new();
/// rules.insert("digit", Pattern::regex(r"\d").unwrap());
///
/// let tree = Parser::new(&rules).parse("digit", "7").unwrap();
/// assert_eq!(tree.text(), Some("7"));
/// ```
pub struct Parser<'r, T: Tracer = NoopTracer> {
    rules: &'r Rules,
    limits: FuelLimits,
    tracer: T,
}

impl<'r> Parser<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        Self {
            rules,
            limits: FuelLimits::default(),
            tracer: NoopTracer,
        }
    }
}

impl<'r, T: Tracer> Parser<'r, T> {
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Shorthand for [`FuelLimits::exec_fuel`].
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Shorthand for [`FuelLimits::recursion_limit`].
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    /// Replace the tracer.
    pub fn tracer<U: Tracer>(self, tracer: U) -> Parser<'r, U> {
        Parser {
            rules: self.rules,
            limits: self.limits,
            tracer,
        }
    }

    pub fn tracer_ref(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Parse all of `source`.
    pub fn parse<'p>(
        &mut self,
        start: impl Into<Start<'p>>,
        source: &str,
    ) -> Result<ParseNode, ParseError> {
        self.parse_range(start, source, 0..source.len())
    }

    /// Parse `source[range]`. Offsets in the result and in errors are
    /// relative to the whole of `source`. The range is clamped to the source
    /// and both ends move back to char boundaries.
    ///
    /// Parsing by rule name returns the rule's own result, without a
    /// `Lookup` wrapper.
    pub fn parse_range<'p>(
        &mut self,
        start: impl Into<Start<'p>>,
        source: &str,
        range: Range<usize>,
    ) -> Result<ParseNode, ParseError> {
        let mut end = range.end.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let mut begin = range.start.min(end);
        while !source.is_char_boundary(begin) {
            begin -= 1;
        }

        let (pattern, rule) = match start.into() {
            Start::Pattern(pattern) => (pattern, None),
            Start::Rule(name) => match self.rules.get(name) {
                Some(pattern) => (pattern, Some(name)),
                None => {
                    return Err(ParseError::UndefinedRule {
                        offset: begin,
                        name: name.to_string(),
                    });
                }
            },
        };

        let mut ctx =
            ParserContext::new(self.rules, source, begin..end, self.limits, &mut self.tracer);
        if let Some(name) = rule {
            ctx.tracer().trace_enter_rule(name, begin);
        }
        let matched = pattern.try_match(&mut ctx);
        if let Some(name) = rule {
            let end = matched.as_ref().map(|_| ctx.offset());
            ctx.tracer().trace_exit_rule(name, end);
        }
        ctx.finish(matched)
    }
}
