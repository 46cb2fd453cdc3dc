//! Pipeline facade: inputs in, checked grammar, emitted text out.
//!
//! ```ignore
//! let grammar = GrammarBuilder::new()
//!     .source(text, "http.abnf")
//!     .builtin(Builtin::Core)
//!     .check()?;
//! let emitted = grammar.emit(Format::Ragel, &Config::new(), Some("http.rl"))?;
//! ```

use abnfc_core::RuleSet;

use crate::analyze::{check, resolve_dependencies};
use crate::builtin::Builtin;
use crate::diagnostics::Diagnostics;
use crate::emit::{Config, Format, PrintInfo};
use crate::parser::lexer::lex;
use crate::parser::self_rules::parse_self_rules;
use crate::parser::{DEFAULT_RECURSION_FUEL, Parser, parse_with_parser};
use crate::{Error, Result};

enum Input<'src> {
    Source { text: &'src str, origin: String },
    SelfRules { text: &'src str, origin: String },
    Builtin(Builtin),
    Rules { rules: RuleSet<'src>, origin: String },
}

/// Collects inputs; [`GrammarBuilder::check`] merges them in the order added.
pub struct GrammarBuilder<'src> {
    inputs: Vec<Input<'src>>,
    recursion_fuel: u32,
}

impl Default for GrammarBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> GrammarBuilder<'src> {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            recursion_fuel: DEFAULT_RECURSION_FUEL,
        }
    }

    /// ABNF source text.
    pub fn source(mut self, text: &'src str, origin: impl Into<String>) -> Self {
        self.inputs.push(Input::Source {
            text,
            origin: origin.into(),
        });
        self
    }

    /// Text written by the self-reconstruction emitter. Rules keep the
    /// origins recorded in the text; unlabeled ones get `origin`.
    pub fn self_rules(mut self, text: &'src str, origin: impl Into<String>) -> Self {
        self.inputs.push(Input::SelfRules {
            text,
            origin: origin.into(),
        });
        self
    }

    pub fn builtin(mut self, builtin: Builtin) -> Self {
        self.inputs.push(Input::Builtin(builtin));
        self
    }

    /// An already built set. Unlabeled rules get `origin`.
    pub fn rules(mut self, rules: RuleSet<'src>, origin: impl Into<String>) -> Self {
        self.inputs.push(Input::Rules {
            rules,
            origin: origin.into(),
        });
        self
    }

    pub fn with_recursion_fuel(mut self, limit: u32) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Read every input and validate the merged set.
    ///
    /// The first input with parse problems stops the build with
    /// [`Error::ParseError`]. Check findings do not fail here; they are kept
    /// on the [`Grammar`].
    pub fn check(self) -> Result<Grammar<'src>> {
        let mut rules = RuleSet::new();
        let mut sources = Vec::with_capacity(self.inputs.len());

        for input in self.inputs {
            let (set, origin) = match input {
                Input::Source { text, origin } => {
                    let parser =
                        Parser::new(text, lex(text)).with_recursion_fuel(self.recursion_fuel);
                    let (set, diagnostics) = parse_with_parser(parser, origin.clone())?;
                    fail_on_errors(&origin, diagnostics)?;
                    (set, origin)
                }
                Input::SelfRules { text, origin } => {
                    let (mut set, diagnostics) = parse_self_rules(text)?;
                    fail_on_errors(&origin, diagnostics)?;
                    label_unlabeled(&mut set, &origin);
                    (set, origin)
                }
                Input::Builtin(builtin) => (builtin.rules(), builtin.origin().to_owned()),
                Input::Rules {
                    rules: mut set,
                    origin,
                } => {
                    label_unlabeled(&mut set, &origin);
                    (set, origin)
                }
            };
            log::debug!("input {origin}: {} rules", set.len());
            rules.append(set);
            sources.push(origin);
        }

        let diagnostics = check(&mut rules);
        Ok(Grammar {
            rules,
            sources,
            diagnostics,
        })
    }
}

fn fail_on_errors(origin: &str, diagnostics: Diagnostics) -> Result<()> {
    if diagnostics.has_errors() {
        return Err(Error::ParseError {
            origin: origin.to_owned(),
            diagnostics,
        });
    }
    Ok(())
}

fn label_unlabeled(rules: &mut RuleSet<'_>, origin: &str) {
    for rule in rules.iter_mut().filter(|r| r.origin.is_empty()) {
        rule.origin = origin.to_owned().into();
    }
}

/// A merged and checked rule set.
#[derive(Debug, Clone)]
pub struct Grammar<'src> {
    rules: RuleSet<'src>,
    sources: Vec<String>,
    diagnostics: Diagnostics,
}

/// Emitted text plus the findings of passes that never block emission.
#[derive(Debug, Clone)]
pub struct Emitted {
    pub text: String,
    pub diagnostics: Diagnostics,
}

impl<'src> Grammar<'src> {
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn rules(&self) -> &RuleSet<'src> {
        &self.rules
    }

    /// Origin labels of the inputs, in the order they were added.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Validator findings.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_rules(self) -> RuleSet<'src> {
        self.rules
    }

    /// Render the grammar in `format`.
    ///
    /// An invalid grammar is refused with [`Error::CheckError`] unless the
    /// config forces emission. Only the state-machine format is put in
    /// dependency order; the grammar itself is left as declared.
    pub fn emit(&self, format: Format, config: &Config, output: Option<&str>) -> Result<Emitted> {
        if !self.is_valid() && !config.is_forced() {
            return Err(Error::CheckError(self.diagnostics.clone()));
        }

        let info = PrintInfo {
            sources: self.sources.clone(),
            output: output.map(str::to_owned),
        };

        let mut diagnostics = Diagnostics::new();
        let ordered;
        let rules = if format.needs_dependency_order() {
            let mut rules = self.rules.clone();
            diagnostics = resolve_dependencies(&mut rules);
            ordered = rules;
            &ordered
        } else {
            &self.rules
        };

        let mut text = String::new();
        format.emit(&mut text, rules, &info, config)?;
        Ok(Emitted { text, diagnostics })
    }
}
