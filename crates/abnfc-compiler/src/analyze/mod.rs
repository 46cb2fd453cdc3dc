//! Semantic passes over a parsed rule set.
//!
//! - `validate`: structural checks and reference resolution
//! - `resolve`: dependency ordering (requires resolved references)

pub mod resolve;
pub mod validate;

#[cfg(test)]
mod resolve_tests;

pub use resolve::{dependency_order, resolve_dependencies};
pub use validate::{SymbolTable, check, symbol_table};
