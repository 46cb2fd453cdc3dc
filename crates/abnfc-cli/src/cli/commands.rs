//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("abnfc")
        .about("ABNF grammar compiler")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
}

/// Check inputs and emit the merged grammar.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Check a grammar and emit it as ABNF, Ragel or rule construction code")
        .override_usage(
            "\
  abnfc compile [-t <TYPE>] <INPUT>... [-f <FORMAT>] [-o <FILE>]
  abnfc compile < grammar.abnf",
        )
        .after_help(
            r#"INPUT TYPES:
  auto     built-in rule list if the name matches one, else a file (default)
  file     ABNF source file
  self     rule construction code written by `-f self`
  builtin  built-in rule list: core, abnf

EXAMPLES:
  abnfc compile http.abnf core                # merge with the core rules
  abnfc compile -f ragel -o http.rl http.abnf core
  abnfc compile -t self rules.rs -t file x.abnf
  cat http.abnf | abnfc compile - core"#,
        )
        .arg(type_arg())
        .arg(inputs_arg())
        .arg(format_arg())
        .arg(output_arg())
        .arg(force_arg())
        .arg(machine_arg())
        .arg(instantiate_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Check inputs only.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a grammar")
        .override_usage("  abnfc check [-t <TYPE>] <INPUT>...")
        .after_help(
            r#"EXAMPLES:
  abnfc check http.abnf core          # silent when the grammar checks
  abnfc check -t builtin abnf core    # the ABNF meta-grammar"#,
        )
        .arg(type_arg())
        .arg(inputs_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}
