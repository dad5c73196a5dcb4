use prattle_core::Span;

use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyOperatorTable, Span::new(0, 2))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 0..2: operator table is empty");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, Span::new(5, 8))
        .message("foo")
        .emit();
    diagnostics
        .report(DiagnosticKind::RegexSyntaxError, Span::new(9, 10))
        .message("unclosed group")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 5..8: rule `foo` is not defined
    error at 9..10: invalid regex syntax: unclosed group
    ");
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NoNullaryOperator, Span::new(0, 1))
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule, Span::new(10, 11))
        .message("a")
        .related_to("first defined here", Span::new(0, 1))
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 10..11: rule `a` is already defined (related: first defined here at 0..1)"
    );

    let rendered = diagnostics.render("a -> 'x'\n\na -> 'y'");
    assert!(rendered.contains("error: rule `a` is already defined"));
    assert!(rendered.contains("first defined here"));
    assert!(rendered.contains("3 | a -> 'y'"));
}

#[test]
fn render_snippet() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, Span::new(5, 12))
        .message("missing")
        .emit();

    insta::assert_snapshot!(diagnostics.render("a -> missing"), @r"
    error: rule `missing` is not defined
      |
    1 | a -> missing
      |      ^^^^^^^ rule `missing` is not defined
    ");
}

#[test]
fn styled_snippet_uses_ansi() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NoNullaryOperator, Span::new(0, 1))
        .emit();

    let styled = diagnostics.printer().source("e").styled(true).render();
    assert!(styled.contains("\x1b["));
    assert!(!diagnostics.render("e").contains("\x1b["));
}

#[test]
fn zero_width_span_at_end_of_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyOperatorTable, Span::empty(5))
        .emit();

    // Widened over the whole two-byte character.
    let rendered = diagnostics.render("a -> é");
    assert!(rendered.contains("operator table is empty"));

    let rendered = diagnostics.render("a");
    assert!(rendered.contains("operator table is empty"));
}

#[test]
fn sort_orders_by_position_then_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NoNullaryOperator, Span::new(4, 6))
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, Span::new(9, 10))
        .emit();
    diagnostics
        .report(DiagnosticKind::EmptyOperatorTable, Span::new(4, 6))
        .emit();

    diagnostics.sort();
    assert_eq!(
        diagnostics.kinds(),
        [
            DiagnosticKind::EmptyOperatorTable,
            DiagnosticKind::NoNullaryOperator,
            DiagnosticKind::UndefinedRule,
        ]
    );
}

#[test]
fn extend_keeps_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::DuplicateRule, Span::empty(0)).emit();
    let mut second = Diagnostics::new();
    second.report(DiagnosticKind::RegexCompile, Span::empty(1)).emit();

    first.extend(second);
    assert_eq!(
        first.kinds(),
        [DiagnosticKind::DuplicateRule, DiagnosticKind::RegexCompile]
    );
}
