//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers
//! - Position-sensitive input typing (`-t` applies to the inputs after it)

use std::path::PathBuf;

use abnfc_compiler::Format;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::loader::{InputSpec, InputType, STDIN};

pub struct CompileParams {
    pub inputs: Vec<InputSpec>,
    pub format: Format,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub machine: Option<String>,
    pub instantiate: bool,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let format = m
            .get_one::<String>("format")
            .and_then(|name| Format::from_name(name))
            .unwrap_or_default();

        Self {
            inputs: input_specs(m),
            format,
            output: m.get_one::<PathBuf>("output").cloned(),
            force: m.get_flag("force"),
            machine: m.get_one::<String>("machine").cloned(),
            instantiate: m.get_flag("instantiate"),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            inputs: p.inputs,
            format: p.format,
            output: p.output,
            force: p.force,
            machine: p.machine,
            instantiate: p.instantiate,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub inputs: Vec<InputSpec>,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            inputs: input_specs(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            inputs: p.inputs,
            color: p.color.should_colorize(),
        }
    }
}

/// Pair every input with the last `-t` given before it on the command line.
///
/// No inputs means stdin, typed by the last `-t` if any.
fn input_specs(m: &ArgMatches) -> Vec<InputSpec> {
    let types: Vec<(usize, InputType)> =
        match (m.indices_of("type"), m.get_many::<InputType>("type")) {
            (Some(indices), Some(values)) => indices.zip(values.copied()).collect(),
            _ => Vec::new(),
        };

    let inputs: Vec<(usize, &String)> =
        match (m.indices_of("inputs"), m.get_many::<String>("inputs")) {
            (Some(indices), Some(values)) => indices.zip(values).collect(),
            _ => Vec::new(),
        };

    if inputs.is_empty() {
        let kind = types.last().map(|&(_, kind)| kind).unwrap_or_default();
        return vec![InputSpec::new(kind, STDIN)];
    }

    inputs
        .into_iter()
        .map(|(index, name)| {
            let kind = types
                .iter()
                .rev()
                .find(|&&(at, _)| at < index)
                .map(|&(_, kind)| kind)
                .unwrap_or_default();
            InputSpec::new(kind, name.as_str())
        })
        .collect()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
