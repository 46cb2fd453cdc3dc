//! Structural validation and name resolution.
//!
//! Every rule is visited exactly once, in declaration order, and every
//! finding is collected; nothing short-circuits. The only mutation is
//! setting `RuleRef::resolved`.

use abnfc_core::chars::is_rule_name;
use abnfc_core::{Alternation, Element, Repetition, RuleId, RuleSet};
use indexmap::IndexMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Lowercased rule name to the first rule declaring it.
pub type SymbolTable = IndexMap<Vec<u8>, RuleId>;

pub fn symbol_table(rules: &RuleSet<'_>) -> SymbolTable {
    let mut table = SymbolTable::with_capacity(rules.len());
    for (id, rule) in rules.ids().zip(rules) {
        table
            .entry(rule.name.as_bytes().to_ascii_lowercase())
            .or_insert(id);
    }
    table
}

/// Check every rule and resolve every rule reference.
///
/// References that do not resolve are reset to unresolved, so running the
/// check again after editing the set leaves no stale handles.
pub fn check(rules: &mut RuleSet<'_>) -> Diagnostics {
    let symbols = symbol_table(rules);
    let mut checker = Checker {
        symbols: &symbols,
        diagnostics: Diagnostics::new(),
        rule: String::new(),
    };

    for (index, rule) in rules.iter_mut().enumerate() {
        let id = RuleId::from_index(index);
        checker.rule = rule.name.to_string();
        log::trace!("checking rule {} ({id})", checker.rule);

        if rule.body.is_empty() {
            checker.report(DiagnosticKind::EmptyAlternation);
        }
        if rule.name.is_empty() {
            checker.report(DiagnosticKind::EmptyRuleName);
        } else if !is_rule_name(rule.name.as_bytes()) {
            checker.report(DiagnosticKind::InvalidRuleName);
        }
        if !rule.name.is_empty() && checker.lookup(rule.name.as_bytes()) != Some(id) {
            checker.report(DiagnosticKind::DuplicateRule);
        }

        checker.check_alternation(&mut rule.body);
    }

    log::debug!(
        "checked {} rules: {} diagnostics",
        rules.len(),
        checker.diagnostics.len()
    );
    checker.diagnostics
}

struct Checker<'t> {
    symbols: &'t SymbolTable,
    diagnostics: Diagnostics,
    /// Name of the rule being checked, for attribution.
    rule: String,
}

impl Checker<'_> {
    fn lookup(&self, name: &[u8]) -> Option<RuleId> {
        self.symbols.get(&name.to_ascii_lowercase()).copied()
    }

    fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.report(kind).rule(self.rule.as_str()).emit();
    }

    fn report_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics
            .report(kind)
            .rule(self.rule.as_str())
            .message(message)
            .emit();
    }

    fn check_alternation(&mut self, alternation: &mut Alternation<'_>) {
        for concatenation in alternation.iter_mut() {
            if concatenation.is_empty() {
                self.report(DiagnosticKind::EmptyConcatenation);
                continue;
            }
            for repetition in concatenation.iter_mut() {
                self.check_repetition(repetition);
            }
        }
    }

    fn check_repetition(&mut self, repetition: &mut Repetition<'_>) {
        let (min, max) = (repetition.min, repetition.max);
        if min == 0 && max == 0 {
            self.report(DiagnosticKind::ZeroRepetition);
        }
        if min > max {
            self.report_msg(DiagnosticKind::InvalidRepetition, format!("'{min}' > '{max}'"));
        }
        self.check_element(&mut repetition.element);
    }

    fn check_element(&mut self, element: &mut Element<'_>) {
        match element {
            Element::Empty => self.report(DiagnosticKind::EmptyElement),
            Element::RuleRef(r) => {
                if r.name.is_empty() {
                    r.resolved = None;
                    self.report(DiagnosticKind::EmptyReference);
                    return;
                }
                r.resolved = self.lookup(r.name.as_bytes());
                if r.resolved.is_none() {
                    self.report_msg(DiagnosticKind::UndefinedRule, r.name.to_string());
                }
            }
            Element::Range { lo, hi } => {
                if lo > hi {
                    self.report_msg(DiagnosticKind::InvalidRange, format!("'{lo}' > '{hi}'"));
                }
            }
            Element::String(bytes) => {
                if bytes.is_empty() {
                    self.report(DiagnosticKind::EmptyString);
                }
            }
            Element::Token(bytes) => {
                if bytes.is_empty() {
                    self.report(DiagnosticKind::EmptyToken);
                }
            }
            Element::Group(body) => {
                if body.is_empty() {
                    self.report(DiagnosticKind::EmptyGroup);
                    return;
                }
                self.check_alternation(body);
            }
            // Opaque hook, nothing to check.
            Element::Action(_) => {}
        }
    }
}
