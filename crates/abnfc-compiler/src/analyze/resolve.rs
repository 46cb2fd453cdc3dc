//! Dependency ordering for targets that forbid forward references.
//!
//! Depth-first from each not yet placed rule in declaration order. A rule is
//! placed after every rule it references (through resolved references,
//! groups included), so dependencies come strictly before dependents in an
//! acyclic set.
//!
//! The on-path marks are cleared before each root and placed rules are never
//! revisited. A traversal always runs to completion before the next root
//! starts, so every cycle still has one edge that closes on the path and is
//! reported exactly there, once.

use abnfc_core::{Alternation, Element, RuleId, RuleSet};
use indexmap::IndexSet;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Reorder `rules` so referenced rules precede the rules referencing them.
///
/// Cycles are reported and the traversal continues; the resulting order is
/// still a permutation of the input. Sets with at most one rule are left
/// untouched.
pub fn resolve_dependencies(rules: &mut RuleSet<'_>) -> Diagnostics {
    if rules.len() <= 1 {
        return Diagnostics::new();
    }
    let (order, diagnostics) = dependency_order(rules);
    log::debug!(
        "resolved dependency order of {} rules: {} diagnostics",
        order.len(),
        diagnostics.len()
    );
    rules.reorder(&order);
    diagnostics
}

/// The placement order without applying it.
pub fn dependency_order(rules: &RuleSet<'_>) -> (Vec<RuleId>, Diagnostics) {
    let mut resolver = Resolver {
        rules,
        marks: vec![Mark::Unvisited; rules.len()],
        order: IndexSet::with_capacity(rules.len()),
        diagnostics: Diagnostics::new(),
    };

    for root in rules.ids() {
        if resolver.marks[root.index()] == Mark::Done {
            continue;
        }
        for mark in &mut resolver.marks {
            if *mark == Mark::InProgress {
                *mark = Mark::Unvisited;
            }
        }
        resolver.visit(root);
    }

    (resolver.order.into_iter().collect(), resolver.diagnostics)
}

struct Resolver<'r, 'a> {
    rules: &'r RuleSet<'a>,
    marks: Vec<Mark>,
    order: IndexSet<RuleId>,
    diagnostics: Diagnostics,
}

impl Resolver<'_, '_> {
    fn visit(&mut self, id: RuleId) {
        self.marks[id.index()] = Mark::InProgress;
        if let Some(rule) = self.rules.get(id) {
            self.visit_alternation(id, &rule.body);
        }
        self.order.insert(id);
        self.marks[id.index()] = Mark::Done;
    }

    fn visit_alternation(&mut self, current: RuleId, alternation: &Alternation<'_>) {
        for repetition in alternation.iter().flat_map(|c| c.iter()) {
            match &repetition.element {
                Element::RuleRef(r) => {
                    let Some(target) = r.resolved else { continue };
                    if target == current {
                        continue;
                    }
                    // Stale handle pointing past this set.
                    let Some(&mark) = self.marks.get(target.index()) else {
                        continue;
                    };
                    match mark {
                        Mark::Done => {}
                        Mark::InProgress => self.report_cycle(current, target),
                        Mark::Unvisited => self.visit(target),
                    }
                }
                Element::Group(body) => self.visit_alternation(current, body),
                _ => {}
            }
        }
    }

    fn report_cycle(&mut self, current: RuleId, target: RuleId) {
        let name = |id: RuleId| {
            self.rules
                .get(id)
                .map(|rule| rule.name.to_string())
                .unwrap_or_default()
        };
        let (rule, with) = (name(current), name(target));
        log::trace!("cycle between {rule} and {with}");
        self.diagnostics
            .report(DiagnosticKind::CircularDependency)
            .rule(rule)
            .message(with)
            .emit();
    }
}
