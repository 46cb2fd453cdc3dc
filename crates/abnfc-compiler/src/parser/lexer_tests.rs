use crate::parser::lexer::{lex, token_text};

/// Format tokens without trivia (default for most tests)
fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

/// Format tokens with trivia included
fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let mut out = String::new();
    for token in lex(input) {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn rule_definitions() {
    insta::assert_snapshot!(snapshot("greeting = hello / bye\nbye =/ end-of-line"), @r#"
    RuleName "greeting"
    DefinedAs "="
    RuleName "hello"
    Slash "/"
    RuleName "bye"
    RuleName "bye"
    DefinedAsIncremental "=/"
    RuleName "end-of-line"
    "#);
}

#[test]
fn repeats_and_groups() {
    insta::assert_snapshot!(snapshot("2*3elem *x 4[y] (z)"), @r#"
    Number "2"
    Star "*"
    Number "3"
    RuleName "elem"
    Star "*"
    RuleName "x"
    Number "4"
    BracketOpen "["
    RuleName "y"
    BracketClose "]"
    ParenOpen "("
    RuleName "z"
    ParenClose ")"
    "#);
}

#[test]
fn literals() {
    insta::assert_snapshot!(snapshot(r#""Ab" %s"Ab" %I"cd" "" <some prose>"#), @r#"
    CharVal "\"Ab\""
    CaseSensitiveVal "%s\"Ab\""
    CaseInsensitiveVal "%I\"cd\""
    CharVal "\"\""
    ProseVal "<some prose>"
    "#);
}

#[test]
fn numeric_values() {
    insta::assert_snapshot!(snapshot("%b0101 %d13.10 %x0D-0a %xZZ"), @r#"
    NumVal "%b0101"
    NumVal "%d13.10"
    NumVal "%x0D-0a"
    NumVal "%xZZ"
    "#);
}

#[test]
fn unclosed_literal_stops_at_line_end() {
    insta::assert_snapshot!(snapshot("a = \"abc\nb"), @r#"
    RuleName "a"
    DefinedAs "="
    UnclosedCharVal "\"abc"
    RuleName "b"
    "#);
}

#[test]
fn trivia() {
    insta::assert_snapshot!(snapshot_raw("a = b ; note\r\n\t/ c\n"), @r#"
    RuleName "a"
    Whitespace " "
    DefinedAs "="
    Whitespace " "
    RuleName "b"
    Whitespace " "
    Comment "; note"
    Newline "\r\n"
    Whitespace "\t"
    Slash "/"
    Whitespace " "
    RuleName "c"
    Newline "\n"
    "#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("a = @@$ b €"), @r#"
    RuleName "a"
    DefinedAs "="
    Garbage "@@$"
    RuleName "b"
    Garbage "€"
    "#);
}

#[test]
fn line_start_detection() {
    let source = "a = b\n  / c\nd = e";
    let starts: Vec<_> = lex(source)
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (token_text(source, t), t.at_line_start(source)))
        .collect();

    assert_eq!(
        starts,
        [
            ("a", true),
            ("=", false),
            ("b", false),
            ("/", false),
            ("c", false),
            ("d", true),
            ("=", false),
            ("e", false),
        ]
    );
}
