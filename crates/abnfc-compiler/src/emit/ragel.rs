//! Ragel machine block output.
//!
//! Ragel forbids forward references, so rules are expected in dependency
//! order (see [`crate::analyze::resolve_dependencies`]). Names are case
//! sensitive in Ragel: references are printed with the casing of the rule
//! they resolve to, `-` becomes `_`, and names that clash with Ragel
//! builtins get a trailing `_`.

use std::fmt::{self, Write};

use abnfc_core::chars::{is_alpha, is_escapable, runs};
use abnfc_core::{Alternation, Element, INFINITY, Repetition, RuleSet, Text};

use super::{CommentStyle, Config, PrintInfo, write_header};

/// Builtin machines and keywords a rule must not shadow.
pub const RESERVED: &[&str] = &[
    "any", "ascii", "extend", "alpha", "digit", "alnum", "lower", "upper", "xdigit", "cntrl",
    "graph", "print", "punct", "space", "null", "empty", "zlen", "main", "core",
];

pub struct RagelEmitter<'r, 'a> {
    rules: &'r RuleSet<'a>,
    machine: &'r str,
    instantiate: bool,
}

impl<'r, 'a> RagelEmitter<'r, 'a> {
    pub fn new(rules: &'r RuleSet<'a>, config: &'r Config) -> Self {
        Self {
            rules,
            machine: &config.machine,
            instantiate: config.instantiate,
        }
    }

    pub fn emit(&self, w: &mut dyn Write, info: &PrintInfo) -> fmt::Result {
        write_header(w, info, &CommentStyle::RAGEL)?;

        w.write_str("%%{\n")?;
        writeln!(w, "\t# write your name")?;
        writeln!(w, "\tmachine {};", self.machine)?;
        w.write_char('\n')?;
        writeln!(w, "\t# generated rules, define required actions")?;
        for rule in self.rules {
            write!(w, "\t{} = ", machine_name(&rule.name))?;
            self.write_alternation(w, &rule.body)?;
            w.write_str(";\n")?;
        }
        if self.instantiate {
            w.write_str("\n\t# instantiate machine rules\n")?;
            match self.rules.last() {
                Some(last) => writeln!(w, "\tmain := {};", machine_name(&last.name))?,
                None => writeln!(w, "\t# main := <rule_name>;")?,
            }
        }
        w.write_str("}%%\n")
    }

    /// Identifier of a reference, in the casing of the rule it names.
    fn reference_name(&self, name: &Text<'_>) -> String {
        match self.rules.find_rule(name.as_bytes()) {
            Some(rule) => machine_name(&rule.name),
            None => machine_name(name),
        }
    }

    fn write_alternation(&self, w: &mut dyn Write, alternation: &Alternation<'_>) -> fmt::Result {
        let several = alternation.len() > 1;
        for (i, concatenation) in alternation.iter().enumerate() {
            if i > 0 {
                w.write_str(" | ")?;
            }
            let wrap = several && concatenation.len() > 1;
            if wrap {
                w.write_str("( ")?;
            }
            for (j, repetition) in concatenation.iter().enumerate() {
                if j > 0 {
                    w.write_char(' ')?;
                }
                self.write_repetition(w, repetition)?;
            }
            if wrap {
                w.write_str(" )")?;
            }
        }
        Ok(())
    }

    fn write_repetition(&self, w: &mut dyn Write, repetition: &Repetition<'_>) -> fmt::Result {
        let once = repetition.is_once();
        self.write_element(w, &repetition.element, !once)?;
        if repetition.is_optional() {
            w.write_char('?')
        } else if repetition.is_any() {
            w.write_char('*')
        } else if repetition.is_more() {
            w.write_char('+')
        } else if !once {
            write_bounds(w, repetition)
        } else {
            Ok(())
        }
    }

    /// `suffixed`: a repetition operator follows, so a multi-byte
    /// concatenation needs parens to stay one operand.
    fn write_element(&self, w: &mut dyn Write, element: &Element<'_>, suffixed: bool) -> fmt::Result {
        match element {
            Element::RuleRef(r) => w.write_str(&self.reference_name(&r.name)),
            Element::Group(body) => match body.single() {
                // The outer operator applies to the inner element as a whole.
                Some(inner) if suffixed && inner.is_once() => {
                    self.write_element(w, &inner.element, true)
                }
                Some(inner) if suffixed => {
                    w.write_str("( ")?;
                    self.write_repetition(w, inner)?;
                    w.write_str(" )")
                }
                _ => {
                    let parens = body.len() > 1 || body.first_len() > 1;
                    if parens {
                        w.write_str("( ")?;
                    }
                    self.write_alternation(w, body)?;
                    if parens {
                        w.write_str(" )")?;
                    }
                    Ok(())
                }
            },
            Element::Range { lo, hi } if lo == hi => write_byte(w, *lo),
            Element::Range { lo, hi } => write!(w, "0x{lo:02x}..0x{hi:02x}"),
            Element::String(bytes) => {
                let parens = suffixed && bytes.len() > 1;
                if parens {
                    w.write_char('(')?;
                }
                write_hex_run(w, bytes.as_bytes())?;
                if parens {
                    w.write_char(')')?;
                }
                Ok(())
            }
            Element::Token(bytes) => write_token(w, bytes.as_bytes(), suffixed),
            Element::Empty => Ok(()),
            // Action hooks are left to the hand-written machine.
            Element::Action(_) => Ok(()),
        }
    }
}

/// Ragel identifier for a rule name.
pub fn machine_name(name: &Text<'_>) -> String {
    let mut ident: String = name
        .as_bytes()
        .iter()
        .map(|&b| if b == b'-' { '_' } else { b as char })
        .collect();
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// `{n}`, `{min,}`, `{,max}` or `{min,max}`.
fn write_bounds(w: &mut dyn Write, repetition: &Repetition<'_>) -> fmt::Result {
    w.write_char('{')?;
    if repetition.min > 0 {
        write!(w, "{}", repetition.min)?;
    }
    if repetition.min != repetition.max {
        w.write_char(',')?;
        if repetition.max != INFINITY {
            write!(w, "{}", repetition.max)?;
        }
    }
    w.write_char('}')
}

fn write_byte(w: &mut dyn Write, b: u8) -> fmt::Result {
    if is_alpha(b) || !is_escapable(b) {
        write!(w, "0x{b:02x}")
    } else {
        w.write_char('"')?;
        write_escaped(w, b)?;
        w.write_char('"')
    }
}

fn write_escaped(w: &mut dyn Write, b: u8) -> fmt::Result {
    match b {
        0x00 => w.write_str("\\0"),
        0x07 => w.write_str("\\a"),
        0x08 => w.write_str("\\b"),
        b'\t' => w.write_str("\\t"),
        b'\n' => w.write_str("\\n"),
        0x0b => w.write_str("\\v"),
        0x0c => w.write_str("\\f"),
        b'\r' => w.write_str("\\r"),
        b'"' => w.write_str("\\\""),
        b'\\' => w.write_str("\\\\"),
        _ => w.write_char(b as char),
    }
}

/// `0x41.0x42.0x43`
fn write_hex_run(w: &mut dyn Write, bytes: &[u8]) -> fmt::Result {
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            w.write_char('.')?;
        }
        write!(w, "0x{b:02x}")?;
    }
    Ok(())
}

/// Quoted runs of escapable bytes (`i`-flagged when they hold letters) and
/// hex runs for the rest.
fn write_token(w: &mut dyn Write, bytes: &[u8], suffixed: bool) -> fmt::Result {
    let parts = runs(bytes, is_escapable);
    let dotted = matches!(parts.as_slice(), [(false, run)] if run.len() > 1);
    let parens = parts.len() > 1 || (suffixed && dotted);
    if parens {
        w.write_str("( ")?;
    }
    for (i, (quoted, run)) in parts.into_iter().enumerate() {
        if i > 0 {
            w.write_char(' ')?;
        }
        if !quoted {
            write_hex_run(w, run)?;
            continue;
        }
        w.write_char('"')?;
        for &b in run {
            write_escaped(w, b)?;
        }
        w.write_char('"')?;
        if run.iter().any(|&b| is_alpha(b)) {
            w.write_char('i')?;
        }
    }
    if parens {
        w.write_str(" )")?;
    }
    Ok(())
}
