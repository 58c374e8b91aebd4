use rowan::TextRange;

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
        .report(
            DiagnosticKind::ExpectedArrow,
            TextRange::new(0.into(), 5.into()),
        )
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.to_string(), "error at 0..5: expected `->`");
}

#[test]
fn report_with_detail() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UnexpectedToken,
            TextRange::new(2.into(), 3.into()),
        )
        .message("`)`")
        .emit();

    assert_eq!(diagnostics.to_string(), "error at 2..3: unexpected token; `)`");
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::DuplicateProduction,
            TextRange::new(0.into(), 1.into()),
        )
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn shifted_moves_spans() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::ExpectedExpression,
            TextRange::new(1.into(), 2.into()),
        )
        .related_to("here", TextRange::new(0.into(), 1.into()))
        .emit();

    let shifted = diagnostics.shifted(10);
    let message = shifted.iter().next().unwrap();
    assert_eq!(message.range(), TextRange::new(11.into(), 12.into()));
    assert_eq!(
        shifted.to_string(),
        "error at 11..12: expected an expression (related: here at 10..11)"
    );
}

#[test]
fn render_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UnclosedParen,
            TextRange::new(0.into(), 5.into()),
        )
        .message("primary")
        .related_to("related info", TextRange::new(6.into(), 10.into()))
        .emit();

    let result = diagnostics.render("hello world!");
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn render_without_source_falls_back_to_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::InvalidHead,
            TextRange::new(0.into(), 1.into()),
        )
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @"error at 0..1: production head must be a variable");
}
