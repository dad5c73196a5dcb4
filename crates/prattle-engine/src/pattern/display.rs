//! Grammar-text rendering of patterns.
//!
//! Output parses back into an equivalent pattern with the grammar language,
//! as long as every sequence keeps the steps the compiler would keep and
//! repetition bounds are `?`, `*` or `+`.

use std::fmt;

use super::Pattern;
use crate::expression::ExpressionPattern;

/// Binding strength, loosest first. A child weaker than its slot requires
/// is parenthesized.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Choice,
    Sequence,
    Label,
    Lookahead,
    Quantifier,
    Atom,
}

impl Pattern {
    fn level(&self) -> Level {
        match self {
            Self::Choice(_) => Level::Choice,
            Self::Sequence(_) => Level::Sequence,
            Self::Label(_) => Level::Label,
            Self::Lookahead(_) => Level::Lookahead,
            Self::Quantifier(_) => Level::Quantifier,
            Self::Terminal(_) | Self::Lookup(_) | Self::Expression(_) => Level::Atom,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: Level) -> fmt::Result {
        if self.level() < min {
            write!(f, "(")?;
            self.fmt_bare(f)?;
            return write!(f, ")");
        }
        self.fmt_bare(f)
    }

    fn fmt_bare(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(t) => write!(f, "{}", t.description()),
            Self::Lookup(l) => write!(f, "{}", l.key()),
            Self::Sequence(s) => {
                for (i, step) in s.steps().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    step.pattern.fmt_at(f, Level::Label)?;
                }
                Ok(())
            }
            Self::Choice(c) => {
                for (i, alternative) in c.alternatives().iter().enumerate() {
                    if i > 0 {
                        write!(f, " / ")?;
                    }
                    alternative.fmt_at(f, Level::Sequence)?;
                }
                Ok(())
            }
            Self::Label(l) => {
                write!(f, "'{}':", l.name().replace('\'', "''"))?;
                l.inner().fmt_at(f, Level::Lookahead)
            }
            Self::Lookahead(l) => {
                write!(f, "{}", if l.want_success() { "&" } else { "!" })?;
                l.inner().fmt_at(f, Level::Quantifier)
            }
            Self::Quantifier(q) => {
                q.inner().fmt_at(f, Level::Atom)?;
                match (q.min(), q.max()) {
                    (0, Some(1)) => write!(f, "?"),
                    (0, None) => write!(f, "*"),
                    (1, None) => write!(f, "+"),
                    (min, Some(max)) => write!(f, "{{{min},{max}}}"),
                    (min, None) => write!(f, "{{{min},}}"),
                }
            }
            Self::Expression(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, Level::Choice)
    }
}

impl fmt::Display for ExpressionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, op) in self.operators().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}' ", op.name.replace('\'', "''"))?;
            write_precedence(f, op.left_precedence)?;
            write!(f, " ")?;
            write_precedence(f, op.right_precedence)?;
            write!(f, " {}", op.pattern)?;
        }
        write!(f, "]")
    }
}

fn write_precedence(f: &mut fmt::Formatter<'_>, precedence: Option<u32>) -> fmt::Result {
    match precedence {
        Some(p) => write!(f, "{p}"),
        None => write!(f, "none"),
    }
}
