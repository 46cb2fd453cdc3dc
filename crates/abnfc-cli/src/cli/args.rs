//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

use crate::commands::loader::InputType;

/// Grammar inputs (positional, any number).
pub fn inputs_arg() -> Arg {
    Arg::new("inputs")
        .value_name("INPUT")
        .num_args(1..)
        .action(ArgAction::Append)
        .help("Grammar files, built-in rule list names, or - for stdin")
}

/// Input type (-t/--type), applies to the inputs that follow it.
pub fn type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("TYPE")
        .num_args(1)
        .action(ArgAction::Append)
        .value_parser(value_parser!(InputType))
        .help("Type of the inputs that follow")
}

/// Output format (-f/--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .value_name("FORMAT")
        .default_value("abnf")
        .value_parser(["abnf", "ragel", "rl", "self"])
        .help("Output format")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to FILE instead of stdout")
}

/// Emit even if the grammar has errors (-F/--force).
pub fn force_arg() -> Arg {
    Arg::new("force")
        .short('F')
        .long("force")
        .action(ArgAction::SetTrue)
        .help("Emit even if the grammar does not check")
}

/// Ragel machine name (--machine).
pub fn machine_arg() -> Arg {
    Arg::new("machine")
        .long("machine")
        .value_name("NAME")
        .help("Ragel machine name [default: abnf]")
}

/// Instantiate the last rule as the Ragel main machine (--instantiate).
pub fn instantiate_arg() -> Arg {
    Arg::new("instantiate")
        .long("instantiate")
        .action(ArgAction::SetTrue)
        .help("Instantiate the last rule as the Ragel main machine")
}

/// Log verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log more (-v info, -vv debug)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}
