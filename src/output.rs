//! Colored terminal output for release operations
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print a symbol in `spec` followed by `message`.
    ///
    /// Write failures are ignored; progress output is best effort.
    fn emit(&self, symbol: &str, spec: &ColorSpec, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(spec);
        let _ = write!(&mut buffer, "{symbol}");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {message}");
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.emit("✓", ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.emit("⚠", ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true), message);
    }

    /// Print a progress message for a step that is starting
    pub fn progress(&self, message: &str) {
        self.emit("⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), message);
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.emit("→", ColorSpec::new().set_fg(Some(Color::Blue)), message);
        }
    }

    /// Print an error message (always shown, on stderr)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {message}").is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            eprintln!("✗ {message}");
        }
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {message}");
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        let _ = self.bufwtr.print(&buffer);
    }
}
