use std::fmt;

use prattle_core::Span;

/// What a finding is about. Variant order is the priority used to sort
/// findings that start at the same offset.
///
/// Structural problems come first: a grammar with duplicate or missing rules
/// produces confusing follow-up findings everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Rule registry
    DuplicateRule,
    UndefinedRule,

    // Regex terminals
    RegexSyntaxError,
    RegexLookaround,
    RegexBackreference,
    RegexCompile,

    // Operator tables
    EmptyOperatorTable,
    DuplicateOperator,
    PrecedenceOutOfRange,
    NoNullaryOperator,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        if self == Self::NoNullaryOperator {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Message used when the reporter gives no detail.
    pub fn title(self) -> &'static str {
        match self {
            Self::DuplicateRule => "duplicate rule",
            Self::UndefinedRule => "undefined rule",

            Self::RegexSyntaxError => "invalid regex syntax",
            Self::RegexLookaround => "lookahead/lookbehind is not supported",
            Self::RegexBackreference => "backreferences are not supported",
            Self::RegexCompile => "regex cannot be compiled",

            Self::EmptyOperatorTable => "operator table is empty",
            Self::DuplicateOperator => "duplicate operator",
            Self::PrecedenceOutOfRange => "precedence out of range",
            Self::NoNullaryOperator => "operator table has no operand",
        }
    }

    /// Message with the reporter's detail, usually the offending name.
    pub fn describe(self, detail: &str) -> String {
        match self {
            Self::DuplicateRule => format!("rule `{detail}` is already defined"),
            Self::UndefinedRule => format!("rule `{detail}` is not defined"),
            Self::DuplicateOperator => format!("operator `{detail}` is already in this table"),
            Self::PrecedenceOutOfRange => format!("precedence `{detail}` does not fit in 32 bits"),
            _ => format!("{}: {detail}", self.title()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A secondary location attached to a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Note {
    pub(crate) span: Span,
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Finding {
    pub(crate) kind: DiagnosticKind,
    /// Range of the grammar text the finding points at.
    pub(crate) span: Span,
    pub(crate) text: String,
    pub(crate) notes: Vec<Note>,
}

impl Finding {
    pub(crate) fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            text: kind.title().to_string(),
            notes: Vec::new(),
        }
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Plain one-line form: `error at 5..8: rule `x` is not defined`.
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Span { start, end } = self.span;
        write!(f, "{} at {start}..{end}: {}", self.severity(), self.text)?;
        for note in &self.notes {
            let Span { start, end } = note.span;
            write!(f, " (related: {} at {start}..{end})", note.text)?;
        }
        Ok(())
    }
}
