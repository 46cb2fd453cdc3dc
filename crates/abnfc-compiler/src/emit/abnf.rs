//! Canonical ABNF output.
//!
//! One `name = alternatives` line per rule, names padded to a common width.
//! Grouping is count-based: an alternative with several repetitions is
//! parenthesized only inside a multi-alternative list, and a group only when
//! it holds more than one repetition in total.

use std::fmt::{self, Write};

use abnfc_core::chars::{is_alpha, is_token_char, runs};
use abnfc_core::{Alternation, Element, INFINITY, Repetition, RuleSet};

use super::{CommentStyle, PrintInfo, write_header};

pub struct AbnfEmitter<'r, 'a> {
    rules: &'r RuleSet<'a>,
}

impl<'r, 'a> AbnfEmitter<'r, 'a> {
    pub fn new(rules: &'r RuleSet<'a>) -> Self {
        Self { rules }
    }

    pub fn emit(&self, w: &mut dyn Write, info: &PrintInfo) -> fmt::Result {
        write_header(w, info, &CommentStyle::ABNF)?;

        let width = self.rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
        for rule in self.rules {
            write!(w, "{}", rule.name)?;
            for _ in rule.name.len()..width {
                w.write_char(' ')?;
            }
            w.write_str(" = ")?;
            write_alternation(w, &rule.body)?;
            w.write_char('\n')?;
        }
        Ok(())
    }
}

fn write_alternation(w: &mut dyn Write, alternation: &Alternation<'_>) -> fmt::Result {
    let several = alternation.len() > 1;
    for (i, concatenation) in alternation.iter().enumerate() {
        if i > 0 {
            w.write_str(" / ")?;
        }
        let wrap = several && concatenation.len() > 1;
        if wrap {
            w.write_str("( ")?;
        }
        for (j, repetition) in concatenation.iter().enumerate() {
            if j > 0 {
                w.write_char(' ')?;
            }
            write_repetition(w, repetition)?;
        }
        if wrap {
            w.write_str(" )")?;
        }
    }
    Ok(())
}

fn write_repetition(w: &mut dyn Write, repetition: &Repetition<'_>) -> fmt::Result {
    if repetition.is_optional() {
        w.write_str("[ ")?;
        write_element(w, &repetition.element, true, false)?;
        return w.write_str(" ]");
    }
    let prefixed = !repetition.is_once();
    if prefixed {
        if repetition.min > 0 {
            write!(w, "{}", repetition.min)?;
        }
        w.write_char('*')?;
        if repetition.max != INFINITY {
            write!(w, "{}", repetition.max)?;
        }
    }
    write_element(w, &repetition.element, false, prefixed)
}

/// `delimited`: inside `[ ]`, so a group needs no parens.
/// `prefixed`: after a repeat prefix, which must not meet a second one.
fn write_element(
    w: &mut dyn Write,
    element: &Element<'_>,
    delimited: bool,
    prefixed: bool,
) -> fmt::Result {
    match element {
        Element::RuleRef(r) => write!(w, "{}", r.name),
        Element::Group(body) => {
            let nested_prefix = prefixed && body.single().is_some_and(|inner| !inner.is_once());
            let parens =
                nested_prefix || (!delimited && (body.len() > 1 || body.first_len() > 1));
            if parens {
                w.write_str("( ")?;
            }
            write_alternation(w, body)?;
            if parens {
                w.write_str(" )")?;
            }
            Ok(())
        }
        Element::Range { lo, hi } if lo == hi => write_byte(w, *lo),
        Element::Range { lo, hi } => write!(w, "%x{lo:02x}-{hi:02x}"),
        Element::String(bytes) => write_hex_run(w, bytes.as_bytes()),
        Element::Token(bytes) => write_token(w, bytes.as_bytes()),
        Element::Empty => Ok(()),
        // Actions have no ABNF notation.
        Element::Action(_) => Ok(()),
    }
}

fn write_byte(w: &mut dyn Write, b: u8) -> fmt::Result {
    if is_alpha(b) || !is_token_char(b) {
        write!(w, "%x{b:02x}")
    } else {
        write!(w, "\"{}\"", b as char)
    }
}

/// `%x41.42.43`
fn write_hex_run(w: &mut dyn Write, bytes: &[u8]) -> fmt::Result {
    w.write_str("%x")?;
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            w.write_char('.')?;
        }
        write!(w, "{b:02x}")?;
    }
    Ok(())
}

/// Quoted runs of plain chars, hex runs for the rest.
fn write_token(w: &mut dyn Write, bytes: &[u8]) -> fmt::Result {
    let parts = runs(bytes, is_token_char);
    let parens = parts.len() > 1;
    if parens {
        w.write_str("( ")?;
    }
    for (i, (plain, run)) in parts.into_iter().enumerate() {
        if i > 0 {
            w.write_char(' ')?;
        }
        if plain {
            w.write_char('"')?;
            for &b in run {
                w.write_char(b as char)?;
            }
            w.write_char('"')?;
        } else {
            write_hex_run(w, run)?;
        }
    }
    if parens {
        w.write_str(" )")?;
    }
    Ok(())
}
