//! Running external commands with captured output.

use std::io::ErrorKind;
use std::process::Command;

use tracing::debug;

use crate::error::InventoryError;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion and captures its output.
///
/// Blocks until the program exits. There is no timeout.
pub trait CommandRunner {
    /// Run `program` with `args`.
    ///
    /// A program that cannot be found is reported as
    /// [`InventoryError::ToolMissing`]. A non-zero exit is not an error at
    /// this level; callers inspect [`CommandOutput::code`].
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, InventoryError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommand;

impl CommandRunner for SystemCommand {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, InventoryError> {
        debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                InventoryError::ToolMissing {
                    program: program.to_string(),
                }
            } else {
                InventoryError::Spawn {
                    program: program.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
