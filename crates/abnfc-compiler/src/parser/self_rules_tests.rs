use abnfc_core::build::*;
use abnfc_core::{Element, RuleSet};
use indoc::indoc;

use crate::emit::{Config, Format};
use crate::parser::self_rules::parse_self_rules;
use crate::test_utils::{emit, valid_rules};

fn read_back(text: &str) -> RuleSet<'_> {
    let (rules, diagnostics) = parse_self_rules(text).expect("reading must not be fatal");
    assert!(diagnostics.is_empty(), "{}", diagnostics.render());
    rules
}

fn read_errors(text: &str) -> String {
    let (rules, diagnostics) = parse_self_rules(text).expect("reading must not be fatal");
    assert!(rules.is_empty());
    diagnostics.render()
}

#[test]
fn emitted_grammar_reads_back_equal() {
    let rules = valid_rules(indoc! {r##"
        message  = start-line *( header CRLF ) CRLF [ body ]
        start-line = 1*VCHAR SP %s"HTTP/" 1*DIGIT "." 1*DIGIT
        header   = 1*tchar ":" *( SP / HTAB ) *VCHAR
        tchar    = "!" / "#" / %x24-27 / "\" / "'" / ALPHA / DIGIT
        body     = 2*5OCTET 3( %d13.10 )
        CRLF     = %x0D.0A
        SP       = %x20
        HTAB     = %x09
        VCHAR    = %x21-7E
        DIGIT    = %x30-39
        ALPHA    = %x41-5A / %x61-7A
        OCTET    = %x00-FF
    "##});

    let text = emit(Format::SelfRules, &rules, &Config::new());
    let copy = read_back(&text);

    assert_eq!(copy, rules);
    assert!(copy.iter().all(|r| r.origin == "test.abnf"));
}

#[test]
fn bare_expression_without_preamble() {
    let rules = read_back(indoc! {r#"
        rule(
            "pair",
            alternation(
                concatenation(
                    repetition(rule_ref(NULL), 2, INFINITY),
                concatenation(
                    any(byte(b'\t')),
                end())),
            end()),
        next)
    "#});

    let expected = rule(
        "pair",
        alternation(
            concatenation(
                repetition(rule_ref(NULL), 2, INFINITY),
                concatenation(any(byte(b'\t')), end()),
            ),
            end(),
        ),
        end(),
    );
    assert_eq!(rules, expected);
}

#[test]
fn empty_chains() {
    assert!(read_back("next").is_empty());
    assert!(read_back("end()").is_empty());
}

#[test]
fn escapes_decode_to_bytes() {
    let rules = read_back(r#"rule("e", alternation(concatenation(once(token(b"\x7f\0\"\\")), concatenation(once(range(0x80, b'\'')), end())), end()), next)"#);

    let elements: Vec<_> = rules
        .first()
        .unwrap()
        .body
        .iter()
        .flat_map(|c| c.iter())
        .map(|r| r.element.clone())
        .collect();
    assert_eq!(
        elements,
        [
            Element::Token(b"\x7f\0\"\\".into()),
            Element::Range { lo: 0x80, hi: b'\'' },
        ]
    );
}

#[test]
fn actions_read_back_as_empty() {
    fn hook(_: usize) {}

    let rules = rule(
        "x",
        alternation(concatenation(once(action(hook, 1)), end()), end()),
        end(),
    );
    let text = emit(Format::SelfRules, &rules, &Config::new());

    let copy = read_back(&text);
    let rep = copy.first().unwrap().body.iter().next().unwrap().first().unwrap();
    assert_eq!(rep.element, Element::Empty);
}

#[test]
fn unknown_element() {
    insta::assert_snapshot!(
        read_errors(r#"rule("a", alternation(concatenation(once(bogus(1)), end()), end()), next)"#),
        @"error at 41..46: expected an element"
    );
}

#[test]
fn byte_out_of_range() {
    insta::assert_snapshot!(
        read_errors(r#"rule("a", alternation(concatenation(once(byte(0x100)), end()), end()), next)"#),
        @"error at 46..51: `0x100` does not fit in a byte"
    );
}

#[test]
fn bad_escape() {
    insta::assert_snapshot!(
        read_errors(r#"rule("a", alternation(concatenation(once(token("\q")), end()), end()), next)"#),
        @"error at 47..51: invalid escape sequence"
    );
}

#[test]
fn truncated_text() {
    insta::assert_snapshot!(read_errors(r#"rule("a","#), @"error at 9..9: expected `alternation`");
}
