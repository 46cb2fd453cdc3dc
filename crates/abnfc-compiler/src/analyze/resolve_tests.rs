use abnfc_core::{Alternation, Element, RuleId, RuleSet};
use indoc::indoc;

use crate::analyze::{dependency_order, resolve_dependencies};
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{parsed_rules, valid_rules};

fn names(rules: &RuleSet<'_>) -> Vec<String> {
    rules.iter().map(|r| r.name.to_string()).collect()
}

/// Every resolved reference points at a rule with the referenced name.
fn assert_handles_consistent(rules: &RuleSet<'_>) {
    fn walk(rules: &RuleSet<'_>, alternation: &Alternation<'_>) {
        for repetition in alternation.iter().flat_map(|c| c.iter()) {
            match &repetition.element {
                Element::RuleRef(r) => {
                    let id = r.resolved.expect("reference resolved");
                    let target = rules.get(id).expect("handle in range");
                    assert!(target.name.eq_ignore_ascii_case(r.name.as_bytes()));
                }
                Element::Group(body) => walk(rules, body),
                _ => {}
            }
        }
    }

    for rule in rules {
        walk(rules, &rule.body);
    }
}

#[test]
fn dependencies_come_first() {
    let mut rules = valid_rules(indoc! {r#"
        request = line *header
        line    = method SP uri
        header  = name ":" value
        method  = "GET" / "PUT"
        uri     = 1*VCHAR
        name    = 1*VCHAR
        value   = *( VCHAR / SP )
        SP      = %x20
        VCHAR   = %x21-7E
    "#});

    assert!(resolve_dependencies(&mut rules).is_empty());
    insta::assert_snapshot!(names(&rules).join(" "), @"method SP VCHAR uri line name value header request");
    assert_handles_consistent(&rules);
}

#[test]
fn every_reference_points_backwards() {
    let mut rules = valid_rules(indoc! {"
        a = b c / ( d [ e ] )
        b = c e
        c = %x63
        d = e c
        e = %x65
    "});

    resolve_dependencies(&mut rules);

    for (position, rule) in rules.iter().enumerate() {
        let mut stack = vec![&rule.body];
        while let Some(alternation) = stack.pop() {
            for repetition in alternation.iter().flat_map(|c| c.iter()) {
                match &repetition.element {
                    Element::RuleRef(r) => {
                        let target = r.resolved.unwrap().index();
                        assert!(target < position, "{} refers forward", rule.name);
                    }
                    Element::Group(body) => stack.push(body),
                    _ => {}
                }
            }
        }
    }
    assert_handles_consistent(&rules);
}

#[test]
fn order_is_a_permutation() {
    let rules = valid_rules("a = b\nb = c\nc = a\nd = %x20\n");

    let (order, _) = dependency_order(&rules);
    let mut indices: Vec<_> = order.iter().map(|id| id.index()).collect();
    indices.sort_unstable();
    assert_eq!(indices, [0, 1, 2, 3]);
}

#[test]
fn mutual_recursion_is_reported() {
    let mut rules = valid_rules("a = %x61 b\nb = %x62 a\n");

    let diagnostics = resolve_dependencies(&mut rules);
    insta::assert_snapshot!(diagnostics.render(), @"rule 'b' has circular dependency with 'a'");
    insta::assert_snapshot!(names(&rules).join(" "), @"b a");
    assert_handles_consistent(&rules);
}

#[test]
fn cycle_through_a_group() {
    let mut rules = valid_rules("x = *( y )\ny = [ z ]\nz = x\n");

    let diagnostics = resolve_dependencies(&mut rules);
    assert_eq!(diagnostics.count(DiagnosticKind::CircularDependency), 1);
    insta::assert_snapshot!(diagnostics.render(), @"rule 'z' has circular dependency with 'x'");
}

#[test]
fn self_reference_is_allowed() {
    let mut rules = valid_rules("list = item [ \",\" list ]\nitem = %x30-39\n");

    assert!(resolve_dependencies(&mut rules).is_empty());
    insta::assert_snapshot!(names(&rules).join(" "), @"item list");
}

#[test]
fn cycle_reached_from_several_roots_is_reported_once() {
    let mut rules = valid_rules("a = b\nb = %x62 / c\nc = b\nd = c\n");

    let (order, _) = dependency_order(&rules);
    assert_eq!(order.len(), 4);

    let diagnostics = resolve_dependencies(&mut rules);
    insta::assert_snapshot!(diagnostics.render(), @"rule 'c' has circular dependency with 'b'");
    insta::assert_snapshot!(names(&rules).join(" "), @"c b a d");
}

#[test]
fn unresolved_references_are_skipped() {
    let mut rules = parsed_rules("a = missing b\nb = %x20\n");

    assert!(resolve_dependencies(&mut rules).is_empty());
    // Without a check nothing is resolved, so declaration order stays.
    insta::assert_snapshot!(names(&rules).join(" "), @"a b");
}

#[test]
fn handles_past_the_set_are_skipped() {
    let mut rules = parsed_rules("a = b\nb = %x62\n");
    for rule in rules.iter_mut() {
        for repetition in rule.body.iter_mut().flat_map(|c| c.iter_mut()) {
            if let Element::RuleRef(r) = &mut repetition.element {
                r.resolved = Some(RuleId::from_index(9));
            }
        }
    }

    assert!(resolve_dependencies(&mut rules).is_empty());
    insta::assert_snapshot!(names(&rules).join(" "), @"a b");
}

#[test]
fn single_rule_is_untouched() {
    let mut rules = valid_rules("a = a / %x20\n");
    let before = rules.clone();

    assert!(resolve_dependencies(&mut rules).is_empty());
    assert_eq!(rules, before);
    assert!(resolve_dependencies(&mut RuleSet::new()).is_empty());
}
