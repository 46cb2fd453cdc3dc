//! Test utilities.

use abnfc_core::RuleSet;

use crate::analyze::check;
use crate::emit::{Config, Format, PrintInfo};
use crate::parser::parse;

/// Parse and check `source`; any diagnostic fails the test.
pub fn valid_rules(source: &str) -> RuleSet<'_> {
    let (mut rules, diagnostics) = parse(source, "test.abnf").expect("parse must not be fatal");
    assert!(
        diagnostics.is_empty(),
        "unexpected parse diagnostics:\n{}",
        diagnostics.render()
    );
    let diagnostics = check(&mut rules);
    assert!(
        diagnostics.is_empty(),
        "unexpected check diagnostics:\n{}",
        diagnostics.render()
    );
    rules
}

/// Parse `source` without checking; parse diagnostics fail the test.
pub fn parsed_rules(source: &str) -> RuleSet<'_> {
    let (rules, diagnostics) = parse(source, "test.abnf").expect("parse must not be fatal");
    assert!(
        diagnostics.is_empty(),
        "unexpected parse diagnostics:\n{}",
        diagnostics.render()
    );
    rules
}

/// Parse diagnostics of `source`, rendered without source context.
pub fn parse_errors(source: &str) -> String {
    let (_, diagnostics) = parse(source, "test.abnf").expect("parse must not be fatal");
    assert!(diagnostics.has_errors(), "expected parse diagnostics");
    diagnostics.render()
}

/// Emit `rules` with an empty header.
pub fn emit(format: Format, rules: &RuleSet<'_>, config: &Config) -> String {
    let mut out = String::new();
    format
        .emit(&mut out, rules, &PrintInfo::new(), config)
        .expect("String write never fails");
    out
}

/// Emitted text without the header comment lines.
pub fn emit_body(format: Format, rules: &RuleSet<'_>, config: &Config) -> String {
    let marker = format.comment_style().line;
    emit(format, rules, config)
        .lines()
        .skip_while(|line| line.starts_with(marker))
        .collect::<Vec<_>>()
        .join("\n")
}
