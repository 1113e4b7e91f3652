//! Command line interface for cut_release.
//!
//! Parses arguments, runs the release and maps every failure to exit code 1.

mod args;
pub mod commands;

pub use args::Args;
pub use commands::execute_command;

use clap::Parser;
use clap::error::ErrorKind;

/// Main CLI entry point, returning the process exit code
pub async fn run() -> i32 {
    run_from(std::env::args_os()).await
}

/// Run with an explicit argument list (first item is the program name)
pub async fn run_from<I, T>(argv: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => return report_parse_error(&e),
    };
    execute_command(args).await
}

/// Print a clap error and pick the exit code: help and version succeed,
/// every usage error exits 1.
fn report_parse_error(error: &clap::Error) -> i32 {
    let _ = error.print();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
