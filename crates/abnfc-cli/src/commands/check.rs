use super::loader::{InputSpec, build_grammar, load_inputs};
use super::{CommandError, finish};

pub struct CheckArgs {
    pub inputs: Vec<InputSpec>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    finish(execute(&args));
}

/// Silent on success (like cargo check).
pub fn execute(args: &CheckArgs) -> Result<(), CommandError> {
    let inputs = load_inputs(&args.inputs)?;
    let grammar = build_grammar(&inputs, args.color)?;

    if !grammar.is_valid() {
        return Err(CommandError::Check(grammar.diagnostics().render()));
    }
    log::info!("{} rules check", grammar.rules().len());
    Ok(())
}
