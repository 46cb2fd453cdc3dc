use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use abnfc_compiler::{Config, Format};

use super::loader::{InputSpec, STDIN, build_grammar, load_inputs};
use super::{CommandError, finish};

pub struct CompileArgs {
    pub inputs: Vec<InputSpec>,
    pub format: Format,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub machine: Option<String>,
    pub instantiate: bool,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    finish(execute(&args));
}

pub fn execute(args: &CompileArgs) -> Result<(), CommandError> {
    let inputs = load_inputs(&args.inputs)?;
    let grammar = build_grammar(&inputs, args.color)?;

    if !grammar.is_valid() {
        let rendered = grammar.diagnostics().render();
        if !args.force {
            return Err(CommandError::Check(rendered));
        }
        eprintln!("{rendered}");
    }

    let mut config = Config::new()
        .force(args.force)
        .instantiate(args.instantiate);
    if let Some(machine) = &args.machine {
        config = config.machine(machine.as_str());
    }

    let output = args.output.as_deref().filter(|path| *path != Path::new(STDIN));
    let output_name = output.map(|path| path.display().to_string());
    let emitted = grammar
        .emit(args.format, &config, output_name.as_deref())
        .map_err(|err| CommandError::Input(format!("error: {err}")))?;

    // Cycles never block emission.
    if !emitted.diagnostics.is_empty() {
        eprintln!("{}", emitted.diagnostics.render());
    }

    log::info!(
        "emitted {} rules as {} ({} bytes)",
        grammar.rules().len(),
        args.format,
        emitted.text.len()
    );
    write_output(output, &emitted.text)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CommandError> {
    match output {
        Some(path) => fs::write(path, text).map_err(|source| CommandError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .map_err(|source| CommandError::Write {
                path: "stdout".to_owned(),
                source,
            }),
    }
}
