//! Static checks on a grammar before lowering.
//!
//! - rule names are unique and every reference resolves
//! - regex terminals parse and compile to a DFA (no backreferences or
//!   lookaround)
//! - operator tables are non-empty, have unique names and `u32` precedences

use indexmap::IndexMap;
use indexmap::map::Entry;
use prattle_core::Span;
use prattle_engine::{Pattern, PatternError};
use regex_syntax::ast;

use super::ast::{Atom, Body, ChoiceExpr, GrammarAst, TableDef, Token};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

pub fn validate(grammar: &GrammarAst) -> Diagnostics {
    let mut validator = Validator {
        diag: Diagnostics::new(),
        defined: IndexMap::new(),
    };
    validator.validate(grammar);
    validator.diag.sort();
    validator.diag
}

struct Validator<'a> {
    diag: Diagnostics,
    /// First definition of each rule.
    defined: IndexMap<&'a str, Span>,
}

impl<'a> Validator<'a> {
    fn validate(&mut self, grammar: &'a GrammarAst) {
        for rule in &grammar.rules {
            match self.defined.entry(rule.name.text.as_str()) {
                Entry::Vacant(entry) => {
                    entry.insert(rule.name.span);
                }
                Entry::Occupied(entry) => {
                    self.diag
                        .report(DiagnosticKind::DuplicateRule, rule.name.span)
                        .message(&rule.name.text)
                        .related_to("first defined here", *entry.get())
                        .emit();
                }
            }
        }

        for rule in &grammar.rules {
            match &rule.body {
                Body::Choice(choice) => self.visit_choice(choice),
                Body::Table(table) => self.visit_table(table),
            }
        }
    }

    fn visit_table(&mut self, table: &TableDef) {
        if table.operators.is_empty() {
            self.diag
                .report(DiagnosticKind::EmptyOperatorTable, table.span)
                .emit();
            return;
        }

        let mut names: IndexMap<String, Span> = IndexMap::new();
        for op in &table.operators {
            let name = op.name.unescaped();
            if let Some(first) = names.get(&name) {
                self.diag
                    .report(DiagnosticKind::DuplicateOperator, op.name.span)
                    .message(&name)
                    .related_to("first defined here", *first)
                    .emit();
            } else {
                names.insert(name, op.name.span);
            }

            for precedence in [&op.left, &op.right].into_iter().flatten() {
                if precedence.text.parse::<u32>().is_err() {
                    self.diag
                        .report(DiagnosticKind::PrecedenceOutOfRange, precedence.span)
                        .message(&precedence.text)
                        .emit();
                }
            }

            self.visit_choice(&op.pattern);
        }

        let has_nullary = table
            .operators
            .iter()
            .any(|op| op.left.is_none() && op.right.is_none());
        if !has_nullary {
            self.diag
                .report(DiagnosticKind::NoNullaryOperator, table.span)
                .emit();
        }
    }

    fn visit_choice(&mut self, choice: &ChoiceExpr) {
        for term in choice.alternatives.iter().flat_map(|seq| &seq.terms) {
            match &term.atom {
                Atom::Regex(token) => self.validate_regex(token),
                Atom::Literal(_) => {}
                Atom::Group(inner) => self.visit_choice(inner),
                Atom::Rule(name) => {
                    if !self.defined.contains_key(name.text.as_str()) {
                        self.diag
                            .report(DiagnosticKind::UndefinedRule, name.span)
                            .message(&name.text)
                            .emit();
                    }
                }
            }
        }
    }

    fn validate_regex(&mut self, token: &Token) {
        let pattern = token.unescaped();

        // Parse with octal disabled so \1-\9 are backreferences, not octal
        let parsed = ast::parse::ParserBuilder::new()
            .octal(false)
            .build()
            .parse(&pattern);

        if let Err(e) = parsed {
            let span = map_regex_span(token, e.span());
            let report = match e.kind() {
                ast::ErrorKind::UnsupportedBackreference => {
                    self.diag.report(DiagnosticKind::RegexBackreference, span)
                }
                ast::ErrorKind::UnsupportedLookAround => {
                    // Skip the opening `(` - point at `?=` / `?!` / `?<=` / `?<!`
                    let span = Span::new((span.start + 1).min(span.end), span.end);
                    self.diag.report(DiagnosticKind::RegexLookaround, span)
                }
                kind => self
                    .diag
                    .report(DiagnosticKind::RegexSyntaxError, span)
                    .message(kind.to_string()),
            };
            report.emit();
            return;
        }

        // Valid syntax can still be out of reach for a DFA (e.g. Unicode `\b`).
        if let Err(e) = Pattern::regex(&pattern) {
            let detail = match e {
                PatternError::InvalidRegex { message, .. } => message,
                other => other.to_string(),
            };
            self.diag
                .report(DiagnosticKind::RegexCompile, token.span)
                .message(detail)
                .emit();
        }
    }
}

/// Map a span within the unescaped regex to a span in the grammar text.
fn map_regex_span(token: &Token, span: &ast::Span) -> Span {
    let start = source_offset(token, span.start.offset);
    let end = source_offset(token, span.end.offset);
    Span::new(start, end.max(start))
}

/// Grammar-text offset of byte `offset` of the unescaped regex. Every
/// doubled backtick before it counts twice.
pub(super) fn source_offset(token: &Token, offset: usize) -> usize {
    // Content starts after the opening backtick.
    let content_start = token.span.start + 1;
    let content = token.content();

    let mut unescaped = 0;
    let mut raw = 0;
    let mut chars = content.char_indices().peekable();
    while unescaped < offset
        && let Some((i, c)) = chars.next()
    {
        raw = i + c.len_utf8();
        if c == '`'
            && let Some(&(j, '`')) = chars.peek()
        {
            chars.next();
            raw = j + 1;
        }
        unescaped += c.len_utf8();
    }
    content_start + raw
}
