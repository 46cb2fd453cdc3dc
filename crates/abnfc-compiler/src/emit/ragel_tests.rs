use abnfc_core::build::*;
use abnfc_core::{Alternation, Concatenation, Repetition, RuleSet};
use indoc::indoc;

use crate::analyze::resolve_dependencies;
use crate::emit::{Config, Format};
use crate::test_utils::{emit, emit_body, valid_rules};

fn ragel(rules: &RuleSet<'_>, config: &Config) -> String {
    emit_body(Format::Ragel, rules, config).replace('\t', "    ")
}

fn seq<'a>(repetitions: impl IntoIterator<Item = Repetition<'a>>) -> Concatenation<'a> {
    repetitions.into_iter().collect()
}

#[test]
fn machine_block_in_dependency_order() {
    let mut rules = valid_rules(indoc! {r#"
        main-rule = word *(" " word)
        word = 1*ALPHA
        ALPHA = %x41-5A / %x61-7A
    "#});
    assert!(resolve_dependencies(&mut rules).is_empty());
    let config = Config::new().machine("greeting").instantiate(true);

    insta::assert_snapshot!(ragel(&rules, &config), @r#"
    %%{
        # write your name
        machine greeting;

        # generated rules, define required actions
        ALPHA = 0x41..0x5a | 0x61..0x7a;
        word = ALPHA+;
        main_rule = word ( " " word )*;

        # instantiate machine rules
        main := main_rule;
    }%%
    "#);
}

#[test]
fn reserved_names_get_suffix() {
    let rules = valid_rules(indoc! {r#"
        core = "x"
        any = core
        a-b = any
    "#});

    insta::assert_snapshot!(ragel(&rules, &Config::new()), @r#"
    %%{
        # write your name
        machine abnf;

        # generated rules, define required actions
        core_ = "x"i;
        any_ = core_;
        a_b = any_;
    }%%
    "#);
}

#[test]
fn references_use_declared_casing() {
    let mut rules = valid_rules(indoc! {r#"
        Foo = BAR
        bar = "1"
    "#});
    resolve_dependencies(&mut rules);

    let out = ragel(&rules, &Config::new());
    assert!(out.contains("    bar = \"1\";\n    Foo = bar;\n"), "{out}");
}

#[test]
fn elements_and_repetition_suffixes() {
    let body: Alternation<'_> = [
        seq([once(token(b"ab\x01cd"))]),
        seq([
            once(byte(b'a')),
            once(byte(b'\t')),
            once(byte(0x80)),
            once(range(b'0', b'9')),
        ]),
        seq([repetition(string(b"ab"), 2, 3), once(string(b"ab"))]),
        seq([
            repetition(rule_ref("t"), 3, 3),
            repetition(rule_ref("t"), 2, INFINITY),
            repetition(rule_ref("t"), 0, 5),
            optional(rule_ref("t")),
        ]),
    ]
    .into_iter()
    .collect();
    let rules = rule("t", body, end());

    let out = ragel(&rules, &Config::new());
    let line = out.lines().find(|l| l.trim_start().starts_with("t =")).unwrap();
    insta::assert_snapshot!(line.trim_start(), @r#"t = ( "ab"i 0x01 "cd"i ) | ( 0x61 "\t" 0x80 0x30..0x39 ) | ( (0x61.0x62){2,3} 0x61.0x62 ) | ( t{3} t{2,} t{,5} t? );"#);
}

#[test]
fn repeated_groups_keep_strings_whole() {
    let rules = valid_rules(indoc! {"
        crlf-opt = [ %x0D.0A ]
        crlf-any = *( %x0D.0A )
        plain    = *%x0D.0A
        nested   = 2*( *%x61 )
    "});

    let out = ragel(&rules, &Config::new());
    let bindings: Vec<_> = out
        .lines()
        .map(str::trim_start)
        .filter(|line| line.contains(" = "))
        .collect();
    insta::assert_snapshot!(bindings.join("\n"), @r"
    crlf_opt = (0x0d.0x0a)?;
    crlf_any = (0x0d.0x0a)*;
    plain = (0x0d.0x0a)*;
    nested = ( 0x61* ){2,};
    ");
}

#[test]
fn token_without_letters_has_no_flag() {
    let rules = rule(
        "t",
        alternation(concatenation(once(token(b"1-2")), end()), end()),
        end(),
    );

    assert!(ragel(&rules, &Config::new()).contains("    t = \"1-2\";\n"));
}

#[test]
fn instantiate_without_rules_leaves_placeholder() {
    let config = Config::new().instantiate(true);

    insta::assert_snapshot!(ragel(&RuleSet::new(), &config), @r"
    %%{
        # write your name
        machine abnf;

        # generated rules, define required actions

        # instantiate machine rules
        # main := <rule_name>;
    }%%
    ");
}

#[test]
fn block_is_tab_indented() {
    let rules = rule(
        "a",
        alternation(concatenation(once(byte(b'-')), end()), end()),
        end(),
    );

    let out = emit(Format::Ragel, &rules, &Config::new());
    assert_eq!(
        out,
        "# Generated by abnfc\n%%{\n\t# write your name\n\tmachine abnf;\n\n\t# generated rules, define required actions\n\ta = \"-\";\n}%%\n"
    );
}
