//! Reading command-line inputs and merging them into a checked grammar.

use std::fs;
use std::io::{self, Read};

use abnfc_compiler::{Builtin, Error, Grammar, GrammarBuilder};

use super::CommandError;

/// Input name that reads stdin.
pub const STDIN: &str = "-";

/// Origin label of stdin input.
pub const STDIN_ORIGIN: &str = "<stdin>";

/// How an input name is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputType {
    /// Built-in rule list if the name matches one, else a file.
    #[default]
    Auto,
    File,
    #[value(name = "self")]
    SelfRules,
    Builtin,
}

/// One input as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSpec {
    pub kind: InputType,
    pub name: String,
}

impl InputSpec {
    pub fn new(kind: InputType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

#[derive(Debug)]
pub enum Content {
    Abnf(String),
    SelfRules(String),
    Builtin(Builtin),
}

#[derive(Debug)]
pub struct LoadedInput {
    pub origin: String,
    pub content: Content,
}

impl LoadedInput {
    /// Source text, if the input has any.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Abnf(text) | Content::SelfRules(text) => Some(text),
            Content::Builtin(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error(transparent)]
    Builtin(#[from] Error),
}

pub fn load_inputs(specs: &[InputSpec]) -> Result<Vec<LoadedInput>, LoadError> {
    specs.iter().map(load_input).collect()
}

fn load_input(spec: &InputSpec) -> Result<LoadedInput, LoadError> {
    let name = spec.name.as_str();
    let builtin = match spec.kind {
        InputType::Builtin => Some(name.parse::<Builtin>()?),
        InputType::Auto => Builtin::from_name(name),
        InputType::File | InputType::SelfRules => None,
    };
    if let Some(builtin) = builtin {
        log::info!("input {name}: built-in {builtin}");
        return Ok(LoadedInput {
            origin: builtin.origin().to_owned(),
            content: Content::Builtin(builtin),
        });
    }

    let (origin, text) = read_text(name)?;
    log::info!("input {origin}: {} bytes", text.len());
    let content = match spec.kind {
        InputType::SelfRules => Content::SelfRules(text),
        _ => Content::Abnf(text),
    };
    Ok(LoadedInput { origin, content })
}

fn read_text(name: &str) -> Result<(String, String), LoadError> {
    if name == STDIN {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok((STDIN_ORIGIN.to_owned(), buf));
    }

    let text = fs::read_to_string(name).map_err(|source| LoadError::Read {
        path: name.to_owned(),
        source,
    })?;
    Ok((name.to_owned(), text))
}

/// Merge `inputs` in order and check the result.
///
/// Parse problems are rendered against the input they came from.
pub fn build_grammar(inputs: &[LoadedInput], color: bool) -> Result<Grammar<'_>, CommandError> {
    let mut builder = GrammarBuilder::new();
    for input in inputs {
        builder = match &input.content {
            Content::Abnf(text) => builder.source(text, input.origin.as_str()),
            Content::SelfRules(text) => builder.self_rules(text, input.origin.as_str()),
            Content::Builtin(builtin) => builder.builtin(*builtin),
        };
    }

    builder.check().map_err(|err| match err {
        Error::ParseError {
            origin,
            diagnostics,
        } => {
            let text = inputs
                .iter()
                .find(|input| input.origin == origin)
                .and_then(LoadedInput::text);
            let rendered = match text {
                Some(text) => diagnostics.render_source(text, Some(&origin), color),
                None => diagnostics.render(),
            };
            CommandError::Input(rendered)
        }
        err => CommandError::Input(format!("error: {err}")),
    })
}
