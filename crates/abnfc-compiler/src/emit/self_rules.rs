//! Self-reconstruction output: Rust source that rebuilds the rule set
//! through `abnfc_core::build`.
//!
//! ```text
//! pub fn declare_rules(next: RuleSet<'static>) -> RuleSet<'static> {
//!     let mut rule_list =
//!         rule(
//!             "a",
//!             alternation(
//!                 concatenation(
//!                     once(rule_ref("b")),
//!                 end()),
//!             end()),
//!         next);
//!     rule_list.assign_origin(0..1, "a.abnf");
//!     rule_list
//! }
//! ```
//!
//! Every cons chain closes all of its calls on its terminator line, so the
//! closer count equals the chain length. [`crate::parser::self_rules`] reads
//! this text back.

use std::fmt::{self, Write};

use abnfc_core::chars::is_print;
use abnfc_core::{Alternation, Concatenation, Element, INFINITY, Repetition, RuleSet, Text};

use super::{CommentStyle, PrintInfo, write_header};

const INDENT: &str = "    ";

/// Name of the generated function.
pub const DECLARE_FN: &str = "declare_rules";

pub struct SelfRulesEmitter<'r, 'a> {
    rules: &'r RuleSet<'a>,
}

impl<'r, 'a> SelfRulesEmitter<'r, 'a> {
    pub fn new(rules: &'r RuleSet<'a>) -> Self {
        Self { rules }
    }

    pub fn emit(&self, w: &mut dyn Write, info: &PrintInfo) -> fmt::Result {
        write_header(w, info, &CommentStyle::SELF_RULES)?;
        w.write_char('\n')?;
        w.write_str("use abnfc_core::RuleSet;\n")?;
        w.write_str("use abnfc_core::build::*;\n")?;
        w.write_char('\n')?;
        writeln!(
            w,
            "pub fn {DECLARE_FN}(next: RuleSet<'static>) -> RuleSet<'static> {{"
        )?;

        let origins = origin_runs(self.rules);
        let binding = if origins.is_empty() { "let" } else { "let mut" };
        indent(w, 1)?;
        writeln!(w, "{binding} rule_list =")?;
        self.write_rules(w, 2)?;
        w.write_str(";\n")?;

        for (first, last, origin) in origins {
            indent(w, 1)?;
            write!(w, "rule_list.assign_origin({first}..{last}, ")?;
            write_text(w, origin)?;
            w.write_str(");\n")?;
        }

        indent(w, 1)?;
        w.write_str("rule_list\n")?;
        w.write_str("}\n")
    }

    fn write_rules(&self, w: &mut dyn Write, level: usize) -> fmt::Result {
        for rule in self.rules {
            indent(w, level)?;
            w.write_str("rule(\n")?;
            indent(w, level + 1)?;
            write_text(w, &rule.name)?;
            w.write_str(",\n")?;
            write_alternation(w, &rule.body, level + 1)?;
            w.write_str(",\n")?;
        }
        indent(w, level)?;
        w.write_str("next")?;
        close(w, self.rules.len())
    }
}

/// `(first, last, origin)` for each run of rules sharing a non-empty origin.
fn origin_runs<'r>(rules: &'r RuleSet<'_>) -> Vec<(usize, usize, &'r Text<'r>)> {
    let mut out: Vec<(usize, usize, &Text<'_>)> = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        if rule.origin.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some((_, last, origin)) if *last == i && **origin == rule.origin => *last = i + 1,
            _ => out.push((i, i + 1, &rule.origin)),
        }
    }
    out
}

fn write_alternation(w: &mut dyn Write, alternation: &Alternation<'_>, level: usize) -> fmt::Result {
    for concatenation in alternation {
        indent(w, level)?;
        w.write_str("alternation(\n")?;
        write_concatenation(w, concatenation, level + 1)?;
        w.write_str(",\n")?;
    }
    indent(w, level)?;
    w.write_str("end()")?;
    close(w, alternation.len())
}

fn write_concatenation(
    w: &mut dyn Write,
    concatenation: &Concatenation<'_>,
    level: usize,
) -> fmt::Result {
    for repetition in concatenation {
        indent(w, level)?;
        w.write_str("concatenation(\n")?;
        indent(w, level + 1)?;
        write_repetition(w, repetition, level + 1)?;
        w.write_str(",\n")?;
    }
    indent(w, level)?;
    w.write_str("end()")?;
    close(w, concatenation.len())
}

fn write_repetition(w: &mut dyn Write, repetition: &Repetition<'_>, level: usize) -> fmt::Result {
    let wrapper = if repetition.is_optional() {
        Some("optional")
    } else if repetition.is_once() {
        Some("once")
    } else if repetition.is_any() {
        Some("any")
    } else if repetition.is_more() {
        Some("more")
    } else {
        None
    };

    match wrapper {
        Some(wrapper) => {
            write!(w, "{wrapper}(")?;
            write_element(w, &repetition.element, level)?;
        }
        None => {
            w.write_str("repetition(")?;
            write_element(w, &repetition.element, level)?;
            w.write_str(", ")?;
            write_count(w, repetition.min)?;
            w.write_str(", ")?;
            write_count(w, repetition.max)?;
        }
    }
    w.write_char(')')
}

fn write_count(w: &mut dyn Write, count: u32) -> fmt::Result {
    if count == INFINITY {
        w.write_str("INFINITY")
    } else {
        write!(w, "{count}")
    }
}

fn write_element(w: &mut dyn Write, element: &Element<'_>, level: usize) -> fmt::Result {
    match element {
        Element::RuleRef(r) => {
            w.write_str("rule_ref(")?;
            write_text(w, &r.name)?;
            w.write_char(')')
        }
        Element::Range { lo, hi } if lo == hi => {
            w.write_str("byte(")?;
            write_byte(w, *lo)?;
            w.write_char(')')
        }
        Element::Range { lo, hi } => {
            w.write_str("range(")?;
            write_byte(w, *lo)?;
            w.write_str(", ")?;
            write_byte(w, *hi)?;
            w.write_char(')')
        }
        Element::String(bytes) => {
            w.write_str("string(")?;
            write_text(w, bytes)?;
            w.write_char(')')
        }
        Element::Token(bytes) => {
            w.write_str("token(")?;
            write_text(w, bytes)?;
            w.write_char(')')
        }
        Element::Group(body) => {
            w.write_str("group(\n")?;
            write_alternation(w, body, level + 1)?;
            w.write_char('\n')?;
            indent(w, level)?;
            w.write_char(')')
        }
        Element::Empty => w.write_str("empty()"),
        // A callback has no source form; it is rebuilt as a placeholder.
        Element::Action(_) => w.write_str("empty()"),
    }
}

/// `b'c'` for printable bytes and common escapes, `0xhh` otherwise.
fn write_byte(w: &mut dyn Write, b: u8) -> fmt::Result {
    match b {
        b'\'' => w.write_str("b'\\''"),
        b'\\' => w.write_str("b'\\\\'"),
        b'\r' => w.write_str("b'\\r'"),
        b'\n' => w.write_str("b'\\n'"),
        b'\t' => w.write_str("b'\\t'"),
        b'\0' => w.write_str("b'\\0'"),
        _ if is_print(b) => write!(w, "b'{}'", b as char),
        _ => write!(w, "0x{b:02x}"),
    }
}

/// `NULL` when empty, a `&str` literal when printable, a byte string
/// otherwise.
fn write_text(w: &mut dyn Write, text: &Text<'_>) -> fmt::Result {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return w.write_str("NULL");
    }
    let printable = bytes.iter().all(|&b| is_print(b));
    if !printable {
        w.write_char('b')?;
    }
    w.write_char('"')?;
    for &b in bytes {
        match b {
            b'"' => w.write_str("\\\"")?,
            b'\\' => w.write_str("\\\\")?,
            b'\r' => w.write_str("\\r")?,
            b'\n' => w.write_str("\\n")?,
            b'\t' => w.write_str("\\t")?,
            b'\0' => w.write_str("\\0")?,
            _ if is_print(b) => w.write_char(b as char)?,
            _ => write!(w, "\\x{b:02x}")?,
        }
    }
    w.write_char('"')
}

fn indent(w: &mut dyn Write, level: usize) -> fmt::Result {
    for _ in 0..level {
        w.write_str(INDENT)?;
    }
    Ok(())
}

fn close(w: &mut dyn Write, count: usize) -> fmt::Result {
    for _ in 0..count {
        w.write_char(')')?;
    }
    Ok(())
}
