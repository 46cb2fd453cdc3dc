//! abnfc compiler: ABNF parser, validator, dependency resolver and emitters.
//!
//! This crate provides the compilation pipeline for ABNF grammars:
//! - `parser` - ABNF source and self-reconstruction text to [`RuleSet`]
//! - `analyze` - validation, name resolution and dependency ordering
//! - `emit` - ABNF, Ragel and self-reconstruction output
//! - `builtin` - RFC 2234 core and ABNF meta-grammar rule tables
//! - `diagnostics` - error reporting
//! - `grammar` - high-level [`Grammar`] facade

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod builtin;
pub mod diagnostics;
pub mod emit;
pub mod grammar;
pub mod parser;

#[cfg(test)]
pub mod test_utils;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use abnfc_core::{RuleSet, Text};
pub use builtin::Builtin;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter};
pub use emit::{Config, Format};
pub use grammar::{Emitted, Grammar, GrammarBuilder};

/// Errors that stop the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// Problems in one input; `origin` is the label it was added under.
    #[error("parsing {origin} failed with {} errors", .diagnostics.error_count())]
    ParseError {
        origin: String,
        diagnostics: Diagnostics,
    },

    #[error("grammar check failed with {} errors", .0.error_count())]
    CheckError(Diagnostics),

    #[error("unknown built-in rule list `{0}`")]
    UnknownBuiltin(String),

    #[error("failed to format output")]
    Format(#[from] std::fmt::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
