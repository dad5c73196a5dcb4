//! Instrumentation hooks for watching a parse.
//!
//! When `NoopTracer` is used every trait method is an `#[inline(always)]`
//! empty function, so the calls and their arguments compile away. The
//! context is generic over the tracer and defaults to `NoopTracer`.
//!
//! Tracing-only state (the rule stack used for indentation) lives in the
//! tracer, not in the parser context.

use prattle_core::Colors;

/// How much a [`PrintTracer`] records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Rule entry/exit and matched terminals.
    #[default]
    Default,
    /// Also failed terminals, operator matches and reductions.
    Verbose,
    /// Also backtracking between choice alternatives.
    VeryVerbose,
}

/// Tracer trait for matching instrumentation.
///
/// - `trace_enter_rule` / `trace_exit_rule` - around a `Lookup`
/// - `trace_terminal` - after a terminal was tried
/// - `trace_operator` - an expression operator matched its pattern
/// - `trace_reduce` - an expression builder was completed
/// - `trace_backtrack` - a choice alternative failed
pub trait Tracer {
    fn trace_enter_rule(&mut self, name: &str, offset: usize);

    /// `end` is the cursor after a successful match, `None` on failure.
    fn trace_exit_rule(&mut self, name: &str, end: Option<usize>);

    /// `matched` is the consumed text on success.
    fn trace_terminal(&mut self, description: &str, offset: usize, matched: Option<&str>);

    fn trace_operator(&mut self, op_name: &str, offset: usize);

    fn trace_reduce(&mut self, op_name: &str);

    fn trace_backtrack(&mut self, alternative: usize, offset: usize);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter_rule(&mut self, _name: &str, _offset: usize) {}

    #[inline(always)]
    fn trace_exit_rule(&mut self, _name: &str, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_terminal(&mut self, _description: &str, _offset: usize, _matched: Option<&str>) {}

    #[inline(always)]
    fn trace_operator(&mut self, _op_name: &str, _offset: usize) {}

    #[inline(always)]
    fn trace_reduce(&mut self, _op_name: &str) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _alternative: usize, _offset: usize) {}
}

/// Trace line symbols.
pub mod symbols {
    pub const CALL: &str = "▶";
    pub const RETURN: &str = "◀";
    pub const RETURN_FAILED: &str = "◁";
    pub const MATCH_SUCCESS: &str = "●";
    pub const MATCH_FAILURE: &str = "○";
    pub const OPERATOR: &str = "⬥";
    pub const REDUCE: &str = "⬦";
    pub const BACKTRACK: &str = "❮❮❮";
}

/// Tracer that collects an indented execution trace.
#[derive(Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// Rules currently entered, innermost last.
    rule_stack: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            rule_stack: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn push(&mut self, symbol: &str, content: &str) {
        let indent = "  ".repeat(self.rule_stack.len());
        self.lines.push(format!("{indent}{symbol} {content}"));
    }

    fn at(&self, offset: usize) -> String {
        self.colors.meta(&format!("@{offset}"))
    }
}

impl Tracer for PrintTracer {
    fn trace_enter_rule(&mut self, name: &str, offset: usize) {
        let content = format!("{} {}", self.colors.name(name), self.at(offset));
        self.push(symbols::CALL, &content);
        self.rule_stack.push(name.to_string());
    }

    fn trace_exit_rule(&mut self, name: &str, end: Option<usize>) {
        self.rule_stack.pop();
        match end {
            Some(end) => {
                let content = format!("{} {}", self.colors.name(name), self.at(end));
                self.push(symbols::RETURN, &content);
            }
            None => {
                let content = self.colors.name(name);
                self.push(symbols::RETURN_FAILED, &content);
            }
        }
    }

    fn trace_terminal(&mut self, description: &str, offset: usize, matched: Option<&str>) {
        let description = self.colors.text(description);
        match matched {
            Some(text) => {
                let content = format!("{description} {:?} {}", text, self.at(offset));
                self.push(symbols::MATCH_SUCCESS, &content);
            }
            // Failed terminals hidden in default verbosity
            None if self.verbosity == Verbosity::Default => {}
            None => {
                let content = format!("{description} {}", self.at(offset));
                self.push(symbols::MATCH_FAILURE, &content);
            }
        }
    }

    fn trace_operator(&mut self, op_name: &str, offset: usize) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let content = format!("{} {}", self.colors.name(op_name), self.at(offset));
        self.push(symbols::OPERATOR, &content);
    }

    fn trace_reduce(&mut self, op_name: &str) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let content = self.colors.name(op_name);
        self.push(symbols::REDUCE, &content);
    }

    fn trace_backtrack(&mut self, alternative: usize, offset: usize) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let content = format!("#{alternative} {}", self.at(offset));
        self.push(symbols::BACKTRACK, &content);
    }
}
