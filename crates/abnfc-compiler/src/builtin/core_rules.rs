// Generated by abnfc
// Output file: core_rules.rs
// Sources:
// 	RFC2234 Core

use abnfc_core::RuleSet;
use abnfc_core::build::*;

pub fn declare_rules(next: RuleSet<'static>) -> RuleSet<'static> {
    let mut rule_list =
        rule(
            "ALPHA",
            alternation(
                concatenation(
                    once(range(b'A', b'Z')),
                end()),
            alternation(
                concatenation(
                    once(range(b'a', b'z')),
                end()),
            end())),
        rule(
            "BIT",
            alternation(
                concatenation(
                    once(byte(b'0')),
                end()),
            alternation(
                concatenation(
                    once(byte(b'1')),
                end()),
            end())),
        rule(
            "CHAR",
            alternation(
                concatenation(
                    once(range(0x01, 0x7f)),
                end()),
            end()),
        rule(
            "CR",
            alternation(
                concatenation(
                    once(byte(b'\r')),
                end()),
            end()),
        rule(
            "CRLF",
            alternation(
                concatenation(
                    once(rule_ref("CR")),
                concatenation(
                    once(rule_ref("LF")),
                end())),
            end()),
        rule(
            "CTL",
            alternation(
                concatenation(
                    once(range(b'\0', 0x1f)),
                end()),
            alternation(
                concatenation(
                    once(byte(0x7f)),
                end()),
            end())),
        rule(
            "DIGIT",
            alternation(
                concatenation(
                    once(range(b'0', b'9')),
                end()),
            end()),
        rule(
            "DQUOTE",
            alternation(
                concatenation(
                    once(byte(b'"')),
                end()),
            end()),
        rule(
            "HEXDIG",
            alternation(
                concatenation(
                    once(rule_ref("DIGIT")),
                end()),
            alternation(
                concatenation(
                    once(token("A")),
                end()),
            alternation(
                concatenation(
                    once(token("B")),
                end()),
            alternation(
                concatenation(
                    once(token("C")),
                end()),
            alternation(
                concatenation(
                    once(token("D")),
                end()),
            alternation(
                concatenation(
                    once(token("E")),
                end()),
            alternation(
                concatenation(
                    once(token("F")),
                end()),
            end()))))))),
        rule(
            "HTAB",
            alternation(
                concatenation(
                    once(byte(b'\t')),
                end()),
            end()),
        rule(
            "LF",
            alternation(
                concatenation(
                    once(byte(b'\n')),
                end()),
            end()),
        rule(
            "LWSP",
            alternation(
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                once(rule_ref("WSP")),
                            end()),
                        alternation(
                            concatenation(
                                once(rule_ref("CRLF")),
                            concatenation(
                                once(rule_ref("WSP")),
                            end())),
                        end()))
                    )),
                end()),
            end()),
        rule(
            "OCTET",
            alternation(
                concatenation(
                    once(range(b'\0', 0xff)),
                end()),
            end()),
        rule(
            "SP",
            alternation(
                concatenation(
                    once(byte(b' ')),
                end()),
            end()),
        rule(
            "VCHAR",
            alternation(
                concatenation(
                    once(range(b'!', b'~')),
                end()),
            end()),
        rule(
            "WSP",
            alternation(
                concatenation(
                    once(rule_ref("SP")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("HTAB")),
                end()),
            end())),
        next))))))))))))))));
    rule_list.assign_origin(0..16, "RFC2234 Core");
    rule_list
}
