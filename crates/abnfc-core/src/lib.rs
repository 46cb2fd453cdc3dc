//! Grammar IR for the abnfc ABNF compiler.
//!
//! - `text` - borrowed/owned byte spans
//! - `ir` - rules, alternations, concatenations, repetitions, elements
//! - `build` - prepend-style construction API used by parsers, built-in
//!   tables and generated code
//! - `chars` - byte classes shared by the parser and the emitters

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod chars;
pub mod ir;
pub mod text;

#[cfg(test)]
mod chars_tests;

pub use ir::{
    Action, ActionFn, Alternation, Concatenation, Element, INFINITY, Repetition, Rule, RuleId,
    RuleRef, RuleSet,
};
pub use text::Text;
