use std::fmt;

use prattle_core::ParseNode;
use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::{Anchored, Input};

use crate::context::ParserContext;
use crate::error::PatternError;
use crate::trace::Tracer;

/// A regex or literal anchored at the cursor.
#[derive(Clone)]
pub struct Terminal {
    kind: TerminalKind,
    /// Grammar-text form, used in error messages and display.
    description: String,
}

#[derive(Clone)]
enum TerminalKind {
    Literal(String),
    Regex {
        source: String,
        dfa: dense::DFA<Vec<u32>>,
    },
}

impl Terminal {
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        let description = format!("'{}'", text.replace('\'', "''"));
        Self {
            kind: TerminalKind::Literal(text),
            description,
        }
    }

    /// Compile `pattern` to an anchored DFA.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        let dfa = dense::DFA::builder()
            .configure(dense::DFA::config().start_kind(StartKind::Anchored))
            .build(pattern)
            .map_err(|e| PatternError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            kind: TerminalKind::Regex {
                source: pattern.to_string(),
                dfa,
            },
            description: format!("`{}`", pattern.replace('`', "``")),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TerminalKind::Literal(_))
    }

    /// The literal text or the regex source.
    pub fn text(&self) -> &str {
        match &self.kind {
            TerminalKind::Literal(text) => text,
            TerminalKind::Regex { source, .. } => source,
        }
    }

    /// Length of the match at the start of `input[offset..end]`.
    fn match_len(&self, source: &str, offset: usize, end: usize) -> Option<usize> {
        match &self.kind {
            TerminalKind::Literal(text) => source[offset..end]
                .starts_with(text.as_str())
                .then_some(text.len()),
            TerminalKind::Regex { dfa, .. } => {
                let input = Input::new(source)
                    .range(offset..end)
                    .anchored(Anchored::Yes);
                // Search errors (quit bytes) count as no match.
                dfa.try_search_fwd(&input)
                    .ok()
                    .flatten()
                    .map(|m| m.offset() - offset)
            }
        }
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        let source = ctx.source();
        // Trivia terminals are not traced.
        let traced = !ctx.in_trivia();

        let Some(len) = self.match_len(source, offset, ctx.end()) else {
            if traced {
                ctx.tracer().trace_terminal(&self.description, offset, None);
            }
            ctx.expect_token(offset, &self.description);
            return None;
        };

        let text = &source[offset..offset + len];
        if traced {
            ctx.tracer().trace_terminal(&self.description, offset, Some(text));
        }
        ctx.set_offset(offset + len);
        Some(ParseNode::value(offset, text))
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Terminal").field(&self.description).finish()
    }
}
