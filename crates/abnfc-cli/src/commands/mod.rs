pub mod check;
pub mod compile;
pub mod loader;

#[cfg(test)]
mod loader_tests;

use std::io;

use loader::LoadError;

pub const EXIT_USAGE: i32 = 1;
pub const EXIT_INPUT: i32 = 2;
pub const EXIT_CHECK: i32 = 3;

/// Why a command failed. Decides the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Rendered parse diagnostics or a fatal pipeline error.
    #[error("{0}")]
    Input(String),

    /// Rendered check diagnostics.
    #[error("{0}")]
    Check(String),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Check(_) => EXIT_CHECK,
            CommandError::Load(_) | CommandError::Input(_) | CommandError::Write { .. } => {
                EXIT_INPUT
            }
        }
    }
}

/// Report a failed command on stderr and exit with its code.
pub fn finish(result: Result<(), CommandError>) {
    let Err(err) = result else {
        return;
    };

    match &err {
        CommandError::Input(rendered) | CommandError::Check(rendered) => {
            eprintln!("{}", rendered.trim_end());
        }
        CommandError::Load(_) | CommandError::Write { .. } => eprintln!("error: {err}"),
    }
    std::process::exit(err.exit_code());
}
