use super::*;

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule)
        .rule("foo")
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @"rule 'foo': duplicate name");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule)
        .rule("a")
        .message("b")
        .emit();
    diagnostics
        .report(DiagnosticKind::InvalidRange)
        .rule("a")
        .message("'122' > '97'")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    rule 'a': rule 'b' not found
    rule 'a': bad range '122' > '97'
    ");
}

#[test]
fn cycle_message_reads_as_sentence() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::CircularDependency)
        .rule("a")
        .message("b")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @"rule 'a' has circular dependency with 'b'");
}

#[test]
fn span_without_rule() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedElement)
        .span(4..5)
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @"error at 4..5: expected an element");
}

#[test]
fn render_with_source() {
    let source = "a = (b";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup)
        .span(4..6)
        .emit();

    insta::assert_snapshot!(diagnostics.render_source(source, Some("test.abnf"), false), @r"
    error: missing closing `)`
     --> test.abnf:1:5
      |
    1 | a = (b
      |     ^^ missing closing `)`
    ");
}

#[test]
fn render_with_source_keeps_plain_rule_findings() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ZeroRepetition)
        .rule("r")
        .emit();

    insta::assert_snapshot!(diagnostics.render_source("r = 0\"x\"", None, false), @"rule 'r': repetition is zero");
}

#[test]
fn extend_and_count() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::DuplicateRule).rule("x").emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::DuplicateRule).rule("y").emit();
    b.report(DiagnosticKind::EmptyGroup).rule("y").emit();

    a.extend(b);

    assert_eq!(a.error_count(), 3);
    assert_eq!(a.count(DiagnosticKind::DuplicateRule), 2);
    assert!(DiagnosticKind::UnclosedGroup.is_parse_error());
    assert!(!DiagnosticKind::EmptyGroup.is_parse_error());
}
