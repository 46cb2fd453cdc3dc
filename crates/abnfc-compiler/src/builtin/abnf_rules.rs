// Generated by abnfc
// Output file: abnf_rules.rs
// Sources:
// 	RFC2234 ABNF

use abnfc_core::RuleSet;
use abnfc_core::build::*;

pub fn declare_rules(next: RuleSet<'static>) -> RuleSet<'static> {
    let mut rule_list =
        rule(
            "rulelist",
            alternation(
                concatenation(
                    more(group(
                        alternation(
                            concatenation(
                                once(rule_ref("rule")),
                            end()),
                        alternation(
                            concatenation(
                                any(rule_ref("c-wsp")),
                            concatenation(
                                once(rule_ref("c-nl")),
                            end())),
                        end()))
                    )),
                end()),
            end()),
        rule(
            "rule",
            alternation(
                concatenation(
                    once(rule_ref("rulename")),
                concatenation(
                    once(rule_ref("defined-as")),
                concatenation(
                    once(rule_ref("elements")),
                concatenation(
                    once(rule_ref("c-nl")),
                end())))),
            end()),
        rule(
            "rulename",
            alternation(
                concatenation(
                    once(rule_ref("ALPHA")),
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                once(rule_ref("ALPHA")),
                            end()),
                        alternation(
                            concatenation(
                                once(rule_ref("DIGIT")),
                            end()),
                        alternation(
                            concatenation(
                                once(byte(b'-')),
                            end()),
                        end())))
                    )),
                end())),
            end()),
        rule(
            "defined-as",
            alternation(
                concatenation(
                    any(rule_ref("c-wsp")),
                concatenation(
                    once(group(
                        alternation(
                            concatenation(
                                once(byte(b'=')),
                            end()),
                        alternation(
                            concatenation(
                                once(token("=/")),
                            end()),
                        end()))
                    )),
                concatenation(
                    any(rule_ref("c-wsp")),
                end()))),
            end()),
        rule(
            "elements",
            alternation(
                concatenation(
                    once(rule_ref("alternation")),
                concatenation(
                    any(rule_ref("c-wsp")),
                end())),
            end()),
        rule(
            "c-wsp",
            alternation(
                concatenation(
                    once(rule_ref("WSP")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("c-nl")),
                concatenation(
                    once(rule_ref("WSP")),
                end())),
            end())),
        rule(
            "c-nl",
            alternation(
                concatenation(
                    once(rule_ref("comment")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("CRLF")),
                end()),
            end())),
        rule(
            "comment",
            alternation(
                concatenation(
                    once(byte(b';')),
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                once(rule_ref("WSP")),
                            end()),
                        alternation(
                            concatenation(
                                once(rule_ref("VCHAR")),
                            end()),
                        end()))
                    )),
                concatenation(
                    once(rule_ref("CRLF")),
                end()))),
            end()),
        rule(
            "alternation",
            alternation(
                concatenation(
                    once(rule_ref("concatenation")),
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                any(rule_ref("c-wsp")),
                            concatenation(
                                once(byte(b'/')),
                            concatenation(
                                any(rule_ref("c-wsp")),
                            concatenation(
                                once(rule_ref("concatenation")),
                            end())))),
                        end())
                    )),
                end())),
            end()),
        rule(
            "concatenation",
            alternation(
                concatenation(
                    once(rule_ref("repetition")),
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                more(rule_ref("c-wsp")),
                            concatenation(
                                once(rule_ref("repetition")),
                            end())),
                        end())
                    )),
                end())),
            end()),
        rule(
            "repetition",
            alternation(
                concatenation(
                    optional(rule_ref("repeat")),
                concatenation(
                    once(rule_ref("element")),
                end())),
            end()),
        rule(
            "repeat",
            alternation(
                concatenation(
                    more(rule_ref("DIGIT")),
                end()),
            alternation(
                concatenation(
                    any(rule_ref("DIGIT")),
                concatenation(
                    once(byte(b'*')),
                concatenation(
                    any(rule_ref("DIGIT")),
                end()))),
            end())),
        rule(
            "element",
            alternation(
                concatenation(
                    once(rule_ref("rulename")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("group")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("option")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("char-val")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("num-val")),
                end()),
            alternation(
                concatenation(
                    once(rule_ref("prose-val")),
                end()),
            end())))))),
        rule(
            "group",
            alternation(
                concatenation(
                    once(byte(b'(')),
                concatenation(
                    any(rule_ref("c-wsp")),
                concatenation(
                    once(rule_ref("alternation")),
                concatenation(
                    any(rule_ref("c-wsp")),
                concatenation(
                    once(byte(b')')),
                end()))))),
            end()),
        rule(
            "option",
            alternation(
                concatenation(
                    once(byte(b'[')),
                concatenation(
                    any(rule_ref("c-wsp")),
                concatenation(
                    once(rule_ref("alternation")),
                concatenation(
                    any(rule_ref("c-wsp")),
                concatenation(
                    once(byte(b']')),
                end()))))),
            end()),
        rule(
            "char-val",
            alternation(
                concatenation(
                    once(rule_ref("DQUOTE")),
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                once(range(b' ', b'!')),
                            end()),
                        alternation(
                            concatenation(
                                once(range(b'#', b'~')),
                            end()),
                        end()))
                    )),
                concatenation(
                    once(rule_ref("DQUOTE")),
                end()))),
            end()),
        rule(
            "num-val",
            alternation(
                concatenation(
                    once(byte(b'%')),
                concatenation(
                    once(group(
                        alternation(
                            concatenation(
                                once(rule_ref("bin-val")),
                            end()),
                        alternation(
                            concatenation(
                                once(rule_ref("dec-val")),
                            end()),
                        alternation(
                            concatenation(
                                once(rule_ref("hex-val")),
                            end()),
                        end())))
                    )),
                end())),
            end()),
        rule(
            "bin-val",
            alternation(
                concatenation(
                    once(token("b")),
                concatenation(
                    more(rule_ref("BIT")),
                concatenation(
                    optional(group(
                        alternation(
                            concatenation(
                                more(group(
                                    alternation(
                                        concatenation(
                                            once(byte(b'.')),
                                        concatenation(
                                            more(rule_ref("BIT")),
                                        end())),
                                    end())
                                )),
                            end()),
                        alternation(
                            concatenation(
                                once(byte(b'-')),
                            concatenation(
                                more(rule_ref("BIT")),
                            end())),
                        end()))
                    )),
                end()))),
            end()),
        rule(
            "dec-val",
            alternation(
                concatenation(
                    once(token("d")),
                concatenation(
                    more(rule_ref("DIGIT")),
                concatenation(
                    optional(group(
                        alternation(
                            concatenation(
                                more(group(
                                    alternation(
                                        concatenation(
                                            once(byte(b'.')),
                                        concatenation(
                                            more(rule_ref("DIGIT")),
                                        end())),
                                    end())
                                )),
                            end()),
                        alternation(
                            concatenation(
                                once(byte(b'-')),
                            concatenation(
                                more(rule_ref("DIGIT")),
                            end())),
                        end()))
                    )),
                end()))),
            end()),
        rule(
            "hex-val",
            alternation(
                concatenation(
                    once(token("x")),
                concatenation(
                    more(rule_ref("HEXDIG")),
                concatenation(
                    optional(group(
                        alternation(
                            concatenation(
                                more(group(
                                    alternation(
                                        concatenation(
                                            once(byte(b'.')),
                                        concatenation(
                                            more(rule_ref("HEXDIG")),
                                        end())),
                                    end())
                                )),
                            end()),
                        alternation(
                            concatenation(
                                once(byte(b'-')),
                            concatenation(
                                more(rule_ref("HEXDIG")),
                            end())),
                        end()))
                    )),
                end()))),
            end()),
        rule(
            "prose-val",
            alternation(
                concatenation(
                    once(byte(b'<')),
                concatenation(
                    any(group(
                        alternation(
                            concatenation(
                                once(range(b' ', b'=')),
                            end()),
                        alternation(
                            concatenation(
                                once(range(b'?', b'~')),
                            end()),
                        end()))
                    )),
                concatenation(
                    once(byte(b'>')),
                end()))),
            end()),
        next)))))))))))))))))))));
    rule_list.assign_origin(0..21, "RFC2234 ABNF");
    rule_list
}
