//! Findings of grammar validation.
//!
//! Passes collect into a [`Diagnostics`] with the builder API
//! (`report(kind, span).message(..).emit()`); the compiler refuses a
//! grammar only when an error-severity finding was emitted.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use prattle_core::Span;

pub use message::{DiagnosticKind, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Finding, Note};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    findings: Vec<Finding>,
}

/// A finding under construction. Nothing is recorded until [`emit`].
///
/// [`emit`]: DiagnosticBuilder::emit
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    target: &'a mut Diagnostics,
    finding: Finding,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a finding of `kind` at `span`, titled with the kind's default
    /// message until `.message()` gives a detail.
    pub fn report(&mut self, kind: DiagnosticKind, span: Span) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            target: self,
            finding: Finding::new(kind, span),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity() == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Kinds in their current order.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.findings.iter().map(|f| f.kind).collect()
    }

    /// Order by start offset, then kind priority, then end offset.
    pub fn sort(&mut self) {
        self.findings
            .sort_by_key(|f| (f.span.start, f.kind, f.span.end));
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    pub fn printer<'s>(&self) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter::new(self)
    }

    /// Render as caret snippets over `source`.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.findings.extend(other.findings);
    }
}

impl DiagnosticBuilder<'_> {
    /// Replace the default message with one built from `detail`.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.finding.text = self.finding.kind.describe(detail.as_ref());
        self
    }

    /// Point at a second location, e.g. a first definition.
    pub fn related_to(mut self, text: impl Into<String>, span: Span) -> Self {
        self.finding.notes.push(Note {
            span,
            text: text.into(),
        });
        self
    }

    pub fn emit(self) {
        self.target.findings.push(self.finding);
    }
}
