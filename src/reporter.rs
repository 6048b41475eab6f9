//! Leveled diagnostics for the user running the tool.
//!
//! The [`Reporter`] is the channel for messages meant for a person (the
//! project path that was picked, MSBuild's output after a failure, the
//! missing-targets error). Internal tracing for developers goes through
//! `tracing` instead and is controlled by `RUST_LOG` / `--verbose`.

use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};

/// Sink for user-facing diagnostics.
///
/// Implementations must never fail or panic: reporting happens on error paths
/// and must not replace the error being reported.
pub trait Reporter: Send + Sync {
    /// Detail only shown when the user asked for verbose output.
    fn verbose(&self, message: &str);

    /// A failure.
    fn error(&self, message: &str);
}

/// [`Reporter`] that writes to stderr.
///
/// Stdout is left to command results so it stays machine-readable. Write
/// errors (a closed pipe, a full disk) are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a reporter; `verbose` enables verbose output. Errors are always
    /// written.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self {
            verbose,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn verbose(&self, message: &str) {
        if self.verbose && !message.is_empty() {
            write_line(io::stderr().lock(), message.dimmed());
        }
    }

    fn error(&self, message: &str) {
        write_line(io::stderr().lock(), message.red().bold());
    }
}

fn write_line(mut out: impl Write, message: impl Display) {
    let _ = writeln!(out, "{message}");
}
