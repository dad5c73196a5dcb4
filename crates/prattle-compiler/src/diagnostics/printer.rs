//! Text output for [`Diagnostics`].

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use prattle_core::Span;

use super::Diagnostics;
use super::message::{Finding, Severity};

/// Renders findings one per line, or as caret snippets once a source is set.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    styled: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            styled: false,
        }
    }

    /// Grammar text the spans point into.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Use ANSI styles in snippets.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn render(&self) -> String {
        let blocks: Vec<String> = match self.source {
            None => self.diagnostics.iter().map(Finding::to_string).collect(),
            Some(source) => {
                let renderer = if self.styled {
                    Renderer::styled()
                } else {
                    Renderer::plain()
                };
                self.diagnostics
                    .iter()
                    .map(|finding| render_snippet(&renderer, source, finding))
                    .collect()
            }
        };
        blocks.join("\n")
    }
}

fn render_snippet(renderer: &Renderer, source: &str, finding: &Finding) -> String {
    let primary = AnnotationKind::Primary
        .span(snippet_range(finding.span, source))
        .label(&finding.text);
    let snippet = finding.notes.iter().fold(
        Snippet::source(source).line_start(1).annotation(primary),
        |snippet, note| {
            snippet.annotation(
                AnnotationKind::Context
                    .span(snippet_range(note.span, source))
                    .label(&note.text),
            )
        },
    );

    let level = match finding.severity() {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    };
    let report = [level.primary_title(&finding.text).element(snippet)];
    renderer.render(&report).to_string()
}

/// Clamp `span` to the source. An empty span covers the character after it
/// so the caret stays visible.
fn snippet_range(span: Span, source: &str) -> Range<usize> {
    let mut start = span.start.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = span.end.clamp(start, source.len());
    if start < end {
        return start..end;
    }
    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}
