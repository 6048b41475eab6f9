//! user-secrets-id CLI entry point
//!
//! Parses arguments, runs the command, and turns failures into a colored
//! error with suggestions and exit code 1.

use clap::Parser;
use user_secrets_id::cli;
use user_secrets_id::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
