use abnfc_core::build::*;
use indoc::indoc;

use crate::emit::{Config, Format};
use crate::test_utils::{emit, emit_body, parsed_rules, valid_rules};

fn abnf(rules: &abnfc_core::RuleSet<'_>) -> String {
    emit_body(Format::Abnf, rules, &Config::new())
}

#[test]
fn greeting_round_trips() {
    let rules = valid_rules("greeting = \"hi\" / \"bye\"\n");

    insta::assert_snapshot!(emit(Format::Abnf, &rules, &Config::new()), @r#"
    ; Generated by abnfc
    greeting = "hi" / "bye"
    "#);
}

#[test]
fn names_are_padded_and_repeats_rendered() {
    let rules = parsed_rules(indoc! {r#"
        a = 1*b [c] *d 2*3e 4f
        bb = %x41 / %x30-39 / %d13.10 / "-"
    "#});

    insta::assert_snapshot!(abnf(&rules), @r#"
    a  = 1*b [ c ] *d 2*3e 4*4f
    bb = %x41 / %x30-39 / %x0d.0a / "-"
    "#);
}

#[test]
fn grouping_is_count_based() {
    let rules = parsed_rules(indoc! {"
        r = (a b / c) d
        s = (a / b)
        t = a (b c)
        u = [a b / c]
        v = (a)
    "});

    insta::assert_snapshot!(abnf(&rules), @r"
    r = ( ( a b ) / c ) d
    s = ( a / b )
    t = a ( b c )
    u = [ ( a b ) / c ]
    v = a
    ");
}

#[test]
fn nested_repeat_keeps_its_group() {
    let rules = parsed_rules("a = 2*( *b ) *( [c] ) [ *d ]\n");

    let text = abnf(&rules);
    insta::assert_snapshot!(text, @"a = 2*( *b ) *( [ c ] ) [ *d ]");

    let source = format!("{text}\n");
    assert_eq!(parsed_rules(&source), rules);
}

#[test]
fn token_splits_into_quoted_and_hex_runs() {
    let rules = rule(
        "x",
        alternation(
            concatenation(once(token(b"ab\x01\x02cd")), end()),
            alternation(
                concatenation(once(byte(b'"')), concatenation(once(byte(b' ')), end())),
                end(),
            ),
        ),
        end(),
    );

    insta::assert_snapshot!(abnf(&rules), @r#"x = ( "ab" %x01.02 "cd" ) / ( %x22 " " )"#);
}

#[test]
fn letters_and_controls_print_as_hex() {
    let rules = rule(
        "x",
        alternation(
            concatenation(
                once(byte(b'a')),
                concatenation(
                    once(byte(b'\n')),
                    concatenation(once(byte(b'7')), concatenation(once(string(b"ab")), end())),
                ),
            ),
            end(),
        ),
        end(),
    );

    insta::assert_snapshot!(abnf(&rules), @r#"x = %x61 %x0a "7" %x61.62"#);
}

#[test]
fn actions_render_nothing() {
    fn hook(_: usize) {}

    let rules = rule(
        "x",
        alternation(
            concatenation(once(rule_ref("y")), concatenation(once(action(hook, 7)), end())),
            end(),
        ),
        end(),
    );

    // The separator stays; only the action itself is skipped.
    assert_eq!(abnf(&rules), "x = y ");
}

#[test]
fn empty_set_emits_only_header() {
    let rules = abnfc_core::RuleSet::new();

    assert_eq!(emit(Format::Abnf, &rules, &Config::new()), "; Generated by abnfc\n");
}
