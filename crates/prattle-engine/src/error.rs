//! Errors raised while building patterns and while parsing.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

/// Tie-breaker between failures recorded at the same offset.
///
/// Probe: an infix/postfix continuation was not found. This is how every
/// expression normally ends, so it yields to anything else.
/// Term: an operand was required and none matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Probe = -1,
    Token = 0,
    Term = 1,
}

/// Failure of a parse.
///
/// Only one of these survives a parse: the furthest-reaching (then highest
/// priority) recorded failure, or a fatal error that aborted matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected input at {offset}: expected {}", join_expected(.expected))]
    UnexpectedToken { offset: usize, expected: Vec<String> },

    #[error("expected an expression term at {offset}")]
    ExpressionTerm { offset: usize },

    /// Unbounded repetition whose body matched without consuming input.
    #[error("unbounded repetition matched empty input at {offset}")]
    ZeroLengthMatch { offset: usize },

    #[error("reference to undefined rule `{name}` at {offset}")]
    UndefinedRule { offset: usize, name: String },

    #[error("execution limit exceeded at {offset}")]
    ExecFuelExhausted { offset: usize },

    #[error("recursion limit exceeded at {offset}")]
    RecursionLimitExceeded { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::ExpressionTerm { offset }
            | Self::ZeroLengthMatch { offset }
            | Self::UndefinedRule { offset, .. }
            | Self::ExecFuelExhausted { offset }
            | Self::RecursionLimitExceeded { offset } => *offset,
        }
    }

    /// Grammar-authoring and resource errors abort the whole parse.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnexpectedToken { .. } | Self::ExpressionTerm { .. }
        )
    }

    /// Message without the offset, for display next to a source excerpt.
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedToken { expected, .. } => {
                format!("expected {}", join_expected(expected))
            }
            Self::ExpressionTerm { .. } => "expected an expression term".to_string(),
            Self::ZeroLengthMatch { .. } => {
                "unbounded repetition matched empty input".to_string()
            }
            Self::UndefinedRule { name, .. } => format!("reference to undefined rule `{name}`"),
            Self::ExecFuelExhausted { .. } => "execution limit exceeded".to_string(),
            Self::RecursionLimitExceeded { .. } => "recursion limit exceeded".to_string(),
        }
    }

    /// Render the error under the offending source line with a caret.
    ///
    /// ```text
    /// error: expected ')'
    ///   |
    /// 1 | max(1,2
    ///   |        ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let mut start = self.offset().min(source.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        // Zero-width offsets point at the next character.
        let width = source[start..].chars().next().map_or(0, char::len_utf8);

        let snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..start + width));
        let message = self.message();
        let report = [Level::ERROR.primary_title(&message).element(snippet)];
        Renderer::plain().render(&report).to_string()
    }
}

fn join_expected(expected: &[String]) -> String {
    match expected {
        [] => "more input".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

/// Invalid pattern construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("sequence discards every step")]
    AllStepsDiscarded,

    #[error("choice has no alternatives")]
    EmptyChoice,

    #[error("repetition minimum {min} exceeds maximum {max}")]
    InvalidRepetition { min: u32, max: u32 },

    #[error("operator table has no operators")]
    EmptyOperatorTable,
}
