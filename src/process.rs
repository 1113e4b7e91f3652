//! External command execution.
//!
//! Git and the build tool are only ever reached through [`CommandRunner`], so
//! the release workflow can be driven against a recording fake in tests.

use std::path::Path;
use std::process::{Command, Output};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` with `args` inside `dir`, capturing its output.
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<Output>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<Output> {
        log::debug!("Running {} in {}", display_command(program, args), dir.display());
        Command::new(program).args(args).current_dir(dir).output()
    }
}

/// Render a command line for messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Describe a failed command from its captured output.
pub(crate) fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    }
}
