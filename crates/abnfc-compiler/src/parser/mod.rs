//! Readers that turn text into a [`RuleSet`].
//!
//! - [`parse`] reads RFC 2234 ABNF. Literal spans borrow from the source;
//!   only decoded num-val strings are owned.
//! - [`self_rules::parse_self_rules`] reads the construction-call text the
//!   self-reconstruction emitter writes.
//!
//! # Recovery Strategy
//!
//! Every problem is reported with a source range. A malformed rule is dropped
//! and parsing resumes at the next token in column 0, so one pass surfaces
//! the errors of every rule. Recursion fuel exhaustion is the only fatal
//! error and is returned immediately.

pub mod lexer;
pub mod self_rules;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod self_rules_tests;

pub use self::core::Parser;

use abnfc_core::{RuleSet, Text};

use crate::PassResult;
use lexer::lex;

/// Maximum group nesting depth.
pub const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// Main entry point. Every produced rule's origin is `origin`.
///
/// Returns Err on fuel exhaustion; all other problems are diagnostics.
pub fn parse<'src>(source: &'src str, origin: impl Into<Text<'src>>) -> PassResult<RuleSet<'src>> {
    parse_with_parser(Parser::new(source, lex(source)), origin)
}

pub fn parse_with_parser<'src>(
    mut parser: Parser<'src>,
    origin: impl Into<Text<'src>>,
) -> PassResult<RuleSet<'src>> {
    let mut rules = parser.parse_rulelist();
    let diagnostics = parser.finish()?;

    let len = rules.len();
    rules.assign_origin(0..len, origin);
    log::debug!(
        "parsed {} rules with {} diagnostics",
        len,
        diagnostics.len()
    );

    Ok((rules, diagnostics))
}
