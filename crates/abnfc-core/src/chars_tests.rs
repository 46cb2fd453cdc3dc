use crate::chars::{is_escapable, is_rule_name, is_token_char, runs};

#[test]
fn token_chars_exclude_quote_and_controls() {
    assert!(is_token_char(b' '));
    assert!(is_token_char(b'!'));
    assert!(!is_token_char(b'"'));
    assert!(is_token_char(b'~'));
    assert!(!is_token_char(0x7f));
    assert!(!is_token_char(b'\t'));
}

#[test]
fn escapable_covers_control_escapes() {
    for b in [0x00, 0x07, 0x08, b'\t', b'\n', 0x0b, 0x0c, b'\r', b'"', b'\\'] {
        assert!(is_escapable(b), "{b:#04x}");
    }
    assert!(!is_escapable(0x01));
    assert!(!is_escapable(0x1b));
    assert!(!is_escapable(0x80));
}

#[test]
fn rule_names() {
    assert!(is_rule_name(b"a"));
    assert!(is_rule_name(b"c-wsp"));
    assert!(is_rule_name(b"Rule2"));
    assert!(!is_rule_name(b""));
    assert!(!is_rule_name(b"2rule"));
    assert!(!is_rule_name(b"-rule"));
    assert!(!is_rule_name(b"bad_name"));
}

#[test]
fn runs_are_maximal() {
    let parts = runs(b"ab\x01\x02cd", is_token_char);
    assert_eq!(
        parts,
        vec![
            (true, &b"ab"[..]),
            (false, &b"\x01\x02"[..]),
            (true, &b"cd"[..]),
        ]
    );
    assert!(runs(b"", is_token_char).is_empty());
    assert_eq!(runs(b"xyz", is_token_char).len(), 1);
}
