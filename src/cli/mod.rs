//! Command-line interface for user-secrets-id.
//!
//! # Commands
//!
//! - `id` - print the project's `UserSecretsId`
//! - `path` - print the `secrets.json` path for the project's identifier
//!
//! # Global Options
//!
//! - `-p, --project <PATH>` - project file or directory (default: current directory)
//! - `-c, --configuration <NAME>` - build configuration (default: `Debug`)
//! - `--id <ID>` - use this identifier instead of asking MSBuild
//! - `-v, --verbose` - show MSBuild output on failure and debug logs
//! - `-q, --quiet` - no logging
//! - `--json` - machine-readable output
//!
//! ```bash
//! user-secrets-id id --project src/WebApp
//! user-secrets-id path -c Release --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::reporter::ConsoleReporter;
use crate::resolver::ProjectIdResolver;
use crate::secrets_path::{parse_secrets_id, secrets_path_from_id};

/// Runtime configuration derived from the global flags.
///
/// Kept apart from [`Cli`] so logging setup can be exercised without parsing
/// arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter, `None` to disable logging.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub log_level: Option<String>,

    /// Print verbose diagnostics (MSBuild output on failure) to stderr.
    pub verbose: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing when a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    }

    /// Reporter honoring the verbosity flags.
    #[must_use]
    pub const fn reporter(&self) -> ConsoleReporter {
        ConsoleReporter::new(self.verbose)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "user-secrets-id",
    about = "Resolve the UserSecretsId of an MSBuild project",
    version,
    long_about = "Evaluates an MSBuild project with `dotnet msbuild` and prints its UserSecretsId, \
                  or the location of the matching secrets.json file."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project file, or directory containing exactly one project file
    #[arg(short, long, global = true, value_name = "PATH")]
    project: Option<String>,

    /// Build configuration to evaluate the project with
    #[arg(short, long, global = true, value_name = "NAME")]
    configuration: Option<String>,

    /// Use this identifier instead of resolving it from the project
    #[arg(long, global = true, value_name = "ID")]
    id: Option<String>,

    /// Show MSBuild output on failure and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Print the project's UserSecretsId
    Id,

    /// Print the path of the project's secrets.json
    Path,
}

/// JSON shape printed with `--json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<PathBuf>,
    user_secrets_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    secrets_path: Option<PathBuf>,
}

impl Cli {
    /// Runs the selected command.
    ///
    /// # Errors
    ///
    /// Any resolution failure; the caller turns it into a user-facing message.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            verbose: self.verbose,
        }
    }

    /// Runs the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Any resolution failure.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        let (project, id) = match self.id {
            Some(id) => (None, parse_secrets_id(&id)?),
            None => {
                let working_dir = std::env::current_dir().context("Failed to get current directory")?;
                let resolver = ProjectIdResolver::new(Arc::new(config.reporter()), working_dir)?;
                let resolved = resolver
                    .resolve_project(self.project.as_deref().unwrap_or_default(), self.configuration.as_deref())?;
                (Some(resolved.project_file), resolved.id)
            }
        };

        let secrets_path = match self.command {
            Commands::Id => None,
            Commands::Path => Some(secrets_path_from_id(&id)?),
        };

        let rendered = if self.json {
            let output = JsonOutput {
                project,
                user_secrets_id: id,
                secrets_path,
            };
            serde_json::to_string_pretty(&output)?
        } else if let Some(path) = secrets_path {
            path.display().to_string()
        } else {
            id
        };

        // Only results go to stdout; diagnostics are on stderr.
        writeln!(io::stdout().lock(), "{rendered}").context("Failed to write to stdout")?;
        Ok(())
    }
}
