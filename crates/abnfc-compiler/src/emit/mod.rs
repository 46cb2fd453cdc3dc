//! Text emitters for a checked [`RuleSet`].
//!
//! Three independent serializers share only the header writer:
//! - [`abnf`]: canonical ABNF
//! - [`ragel`]: a Ragel machine block (expects dependency order)
//! - [`self_rules`]: construction-call text that rebuilds the IR
//!
//! Every emitter writes into a caller-supplied [`fmt::Write`] sink and does no
//! other I/O.

pub mod abnf;
pub mod ragel;
pub mod self_rules;

#[cfg(test)]
mod abnf_tests;
#[cfg(test)]
mod ragel_tests;
#[cfg(test)]
mod self_rules_tests;

use std::fmt;

use abnfc_core::RuleSet;

pub use abnf::AbnfEmitter;
pub use ragel::RagelEmitter;
pub use self_rules::SelfRulesEmitter;

/// Provenance written into the generated header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintInfo {
    /// Origins of the inputs, in command-line order.
    pub sources: Vec<String>,
    /// Name of the output destination, if any.
    pub output: Option<String>,
}

impl PrintInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, origin: impl Into<String>) -> Self {
        self.sources.push(origin.into());
        self
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.output = Some(name.into());
        self
    }
}

/// How the header is commented out in a given notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommentStyle {
    /// Written once before the header.
    pub pre: Option<&'static str>,
    /// Prefix of every header line.
    pub line: &'static str,
    /// Written once after the header.
    pub post: Option<&'static str>,
}

impl CommentStyle {
    pub const ABNF: Self = Self::line("; ");
    pub const RAGEL: Self = Self::line("# ");
    pub const SELF_RULES: Self = Self::line("// ");

    const fn line(line: &'static str) -> Self {
        Self {
            pre: None,
            line,
            post: None,
        }
    }
}

/// Write the `Generated by abnfc` header.
///
/// No timestamp is written, so output only depends on the input.
pub fn write_header(w: &mut dyn fmt::Write, info: &PrintInfo, style: &CommentStyle) -> fmt::Result {
    let lc = style.line;
    if let Some(pre) = style.pre {
        w.write_str(pre)?;
    }
    writeln!(w, "{lc}Generated by abnfc")?;
    if let Some(output) = &info.output {
        writeln!(w, "{lc}Output file: {output}")?;
    }
    if !info.sources.is_empty() {
        writeln!(w, "{lc}Sources:")?;
        for source in &info.sources {
            writeln!(w, "{lc}\t{source}")?;
        }
    }
    if let Some(post) = style.post {
        w.write_str(post)?;
    }
    Ok(())
}

/// Output notation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Abnf,
    Ragel,
    SelfRules,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Abnf, Format::Ragel, Format::SelfRules];

    /// `abnf`, `ragel` (or `rl`), `self`; case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "abnf" => Some(Format::Abnf),
            "ragel" | "rl" => Some(Format::Ragel),
            "self" => Some(Format::SelfRules),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Abnf => "abnf",
            Format::Ragel => "ragel",
            Format::SelfRules => "self",
        }
    }

    pub fn comment_style(self) -> CommentStyle {
        match self {
            Format::Abnf => CommentStyle::ABNF,
            Format::Ragel => CommentStyle::RAGEL,
            Format::SelfRules => CommentStyle::SELF_RULES,
        }
    }

    /// Whether the notation forbids forward references.
    pub fn needs_dependency_order(self) -> bool {
        self == Format::Ragel
    }

    /// Serialize `rules` in this notation.
    pub fn emit(
        self,
        w: &mut dyn fmt::Write,
        rules: &RuleSet<'_>,
        info: &PrintInfo,
        config: &Config,
    ) -> fmt::Result {
        log::debug!("emitting {} rules as {}", rules.len(), self.name());
        match self {
            Format::Abnf => AbnfEmitter::new(rules).emit(w, info),
            Format::Ragel => RagelEmitter::new(rules, config).emit(w, info),
            Format::SelfRules => SelfRulesEmitter::new(rules).emit(w, info),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emission options.
#[derive(Clone, Debug)]
pub struct Config {
    /// Emit even when the grammar has check errors.
    pub(crate) force: bool,
    /// Ragel machine name.
    pub(crate) machine: String,
    /// Instantiate the last rule as the Ragel `main` machine.
    pub(crate) instantiate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force: false,
            machine: "abnf".to_owned(),
            instantiate: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force(mut self, value: bool) -> Self {
        self.force = value;
        self
    }

    pub fn machine(mut self, name: impl Into<String>) -> Self {
        self.machine = name.into();
        self
    }

    pub fn instantiate(mut self, value: bool) -> Self {
        self.instantiate = value;
        self
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    pub fn machine_name(&self) -> &str {
        &self.machine
    }

    pub fn instantiates(&self) -> bool {
        self.instantiate
    }
}
