use abnfc_core::build::*;
use abnfc_core::RuleSet;
use indoc::indoc;

use crate::emit::{Config, Format, PrintInfo};
use crate::test_utils::{emit, valid_rules};

/// The generated function, without header and imports.
fn declare_fn(rules: &RuleSet<'_>) -> String {
    let out = emit(Format::SelfRules, rules, &Config::new());
    let start = out.find("pub fn").expect("generated function");
    out[start..].to_owned()
}

#[test]
fn nested_calls_close_on_terminator_lines() {
    let rules = valid_rules(indoc! {r#"
        a = b ["x"]
        b = %x00-1F / %s"Q"
    "#});

    insta::assert_snapshot!(declare_fn(&rules), @r#"
    pub fn declare_rules(next: RuleSet<'static>) -> RuleSet<'static> {
        let mut rule_list =
            rule(
                "a",
                alternation(
                    concatenation(
                        once(rule_ref("b")),
                    concatenation(
                        optional(group(
                            alternation(
                                concatenation(
                                    once(token("x")),
                                end()),
                            end())
                        )),
                    end())),
                end()),
            rule(
                "b",
                alternation(
                    concatenation(
                        once(range(b'\0', 0x1f)),
                    end()),
                alternation(
                    concatenation(
                        once(string("Q")),
                    end()),
                end())),
            next));
        rule_list.assign_origin(0..2, "test.abnf");
        rule_list
    }
    "#);
}

#[test]
fn preamble_and_header() {
    let info = PrintInfo::new().source("core").output("rules.rs");
    let mut out = String::new();
    Format::SelfRules
        .emit(&mut out, &RuleSet::new(), &info, &Config::new())
        .unwrap();

    assert_eq!(
        out,
        "// Generated by abnfc\n\
         // Output file: rules.rs\n\
         // Sources:\n\
         // \tcore\n\
         \n\
         use abnfc_core::RuleSet;\n\
         use abnfc_core::build::*;\n\
         \n\
         pub fn declare_rules(next: RuleSet<'static>) -> RuleSet<'static> {\n\
         \x20   let rule_list =\n\
         \x20       next;\n\
         \x20   rule_list\n\
         }\n"
    );
}

#[test]
fn texts_and_bytes_are_escaped() {
    let rules = rule(
        "q",
        alternation(
            concatenation(
                once(string(b"say \"hi\"\\")),
                concatenation(
                    once(token(b"a\r\n\x7f")),
                    concatenation(
                        once(byte(b'\'')),
                        concatenation(once(byte(0xff)), end()),
                    ),
                ),
            ),
            end(),
        ),
        end(),
    );

    let out = declare_fn(&rules);
    assert!(out.contains(r#"once(string("say \"hi\"\\")),"#), "{out}");
    assert!(out.contains(r#"once(token(b"a\r\n\x7f")),"#), "{out}");
    assert!(out.contains(r"once(byte(b'\'')),"), "{out}");
    assert!(out.contains("once(byte(0xff)),"), "{out}");
    // No origin was assigned.
    assert!(!out.contains("assign_origin"), "{out}");
}

#[test]
fn general_repetition_and_empty_spans() {
    let rules = rule(
        NULL,
        alternation(
            concatenation(
                repetition(rule_ref(NULL), 2, INFINITY),
                concatenation(repetition(empty(), 0, 0), end()),
            ),
            end(),
        ),
        end(),
    );

    let out = declare_fn(&rules);
    assert!(out.contains("            NULL,\n"), "{out}");
    assert!(out.contains("repetition(rule_ref(NULL), 2, INFINITY),"), "{out}");
    assert!(out.contains("repetition(empty(), 0, 0),"), "{out}");
}

#[test]
fn origin_runs_are_grouped() {
    let mut rules = valid_rules("a = b\nb = c\nc = %x20\n");
    rules.assign_origin(2..3, "core");

    let out = declare_fn(&rules);
    assert!(out.contains(
        "    rule_list.assign_origin(0..2, \"test.abnf\");\n    rule_list.assign_origin(2..3, \"core\");\n"
    ));
}
