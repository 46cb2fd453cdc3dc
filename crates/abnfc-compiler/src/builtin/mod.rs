//! Built-in rule tables.
//!
//! The tables are kept in self-reconstruction form (as written by
//! [`crate::emit::SelfRulesEmitter`]) and rebuilt through the construction
//! API on demand.

#[rustfmt::skip]
mod abnf_rules;
#[rustfmt::skip]
mod core_rules;


use std::fmt;
use std::str::FromStr;

use abnfc_core::RuleSet;

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// RFC 2234 appendix A core rules (`ALPHA`, `DIGIT`, `CRLF`, ...).
    Core,
    /// The RFC 2234 grammar of ABNF itself. References the core rules.
    Abnf,
}

impl Builtin {
    pub const ALL: [Builtin; 2] = [Builtin::Core, Builtin::Abnf];

    /// `core` or `abnf`, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Core => "core",
            Builtin::Abnf => "abnf",
        }
    }

    /// Origin label carried by every rule of the table.
    pub fn origin(self) -> &'static str {
        match self {
            Builtin::Core => "RFC2234 Core",
            Builtin::Abnf => "RFC2234 ABNF",
        }
    }

    /// Prepend the table onto `next`.
    pub fn declare(self, next: RuleSet<'static>) -> RuleSet<'static> {
        match self {
            Builtin::Core => core_rules::declare_rules(next),
            Builtin::Abnf => abnf_rules::declare_rules(next),
        }
    }

    pub fn rules(self) -> RuleSet<'static> {
        self.declare(RuleSet::new())
    }
}

impl FromStr for Builtin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownBuiltin(s.to_owned()))
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
