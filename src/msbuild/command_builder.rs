//! Builder for `dotnet msbuild` invocations
//!
//! Every MSBuild run in the crate goes through [`MsBuildCommand`] so the
//! invocation is logged, timed and turned into errors the same way.
//!
//! ```rust,no_run
//! use user_secrets_id::msbuild::MsBuildCommand;
//!
//! # fn example() -> anyhow::Result<()> {
//! let output = MsBuildCommand::new("dotnet")
//!     .project("/src/App/App.csproj")
//!     .nologo()
//!     .target("Restore")
//!     .property("Configuration", "Release")
//!     .execute()?;
//!
//! if !output.success() {
//!     eprintln!("{}", output.stderr);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::constants::MSBUILD_VERB;
use crate::core::SecretsError;
use crate::msbuild::escape::escape_and_concatenate;

/// Fluent builder for a synchronous `<muxer> msbuild ...` invocation.
///
/// Output is always captured. The call blocks until the child exits; there is
/// no timeout.
#[derive(Debug, Clone)]
pub struct MsBuildCommand {
    /// Muxer executable (`dotnet` or a full path to it)
    program: PathBuf,

    /// Arguments after the `msbuild` verb, in order
    ///
    /// Paths are kept as-is; only [`Self::command_line`] renders them lossily.
    args: Vec<OsString>,

    /// Working directory for the child (defaults to the current directory)
    current_dir: Option<PathBuf>,

    /// Optional label for log messages
    context: Option<String>,
}

impl MsBuildCommand {
    /// Creates a builder that runs `program msbuild`.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            current_dir: None,
            context: None,
        }
    }

    /// Sets the working directory of the child process.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a raw argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds the project file to build.
    pub fn project(self, project: impl AsRef<Path>) -> Self {
        self.arg(project.as_ref().as_os_str())
    }

    /// Suppresses the MSBuild banner.
    pub fn nologo(self) -> Self {
        self.arg("/nologo")
    }

    /// Selects the target to run (`/t:<name>`).
    pub fn target(self, name: &str) -> Self {
        self.arg(format!("/t:{name}"))
    }

    /// Sets a global property (`/p:<name>=<value>`).
    ///
    /// Values are passed through untouched; the argument vector is handed to
    /// the child without going through a shell.
    pub fn property(self, name: &str, value: impl AsRef<Path>) -> Self {
        let mut arg = OsString::from(format!("/p:{name}="));
        arg.push(value.as_ref());
        self.arg(arg)
    }

    /// Sets a label included in log messages.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Every argument passed to the muxer, starting with the `msbuild` verb.
    #[must_use]
    pub fn argv(&self) -> Vec<&OsStr> {
        std::iter::once(OsStr::new(MSBUILD_VERB)).chain(self.args.iter().map(OsString::as_os_str)).collect()
    }

    /// The whole invocation escaped into a single line, for diagnostics.
    ///
    /// Non-UTF-8 bytes are replaced here only; the child gets the originals.
    #[must_use]
    pub fn command_line(&self) -> String {
        let words = std::iter::once(self.program.as_os_str()).chain(self.argv());
        escape_and_concatenate(words.map(OsStr::to_string_lossy))
    }

    /// Runs the command and waits for it to exit.
    ///
    /// A non-zero exit is not an error here; callers inspect
    /// [`MsBuildOutput::success`].
    ///
    /// # Errors
    ///
    /// [`SecretsError::MuxerLaunchFailed`] when the process cannot be started
    /// or waited on.
    pub fn execute(self) -> Result<MsBuildOutput> {
        let start = Instant::now();
        let label = self.context.as_deref().map(|ctx| format!("({ctx}) ")).unwrap_or_default();

        tracing::debug!(target: "msbuild", "{}Invoking '{}'", label, self.command_line());

        let mut cmd = Command::new(&self.program);
        cmd.args(self.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| SecretsError::MuxerLaunchFailed {
            program: self.program.display().to_string(),
            source,
        })?;

        let result = MsBuildOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        let elapsed = start.elapsed();
        if result.success() {
            tracing::debug!(target: "msbuild", "{}msbuild completed in {}ms", label, elapsed.as_millis());
        } else {
            tracing::debug!(
                target: "msbuild",
                "{}msbuild failed with exit code {:?} after {}ms",
                label,
                result.exit_code,
                elapsed.as_millis()
            );
        }

        Ok(result)
    }
}

/// Captured result of an MSBuild run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsBuildOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl MsBuildOutput {
    /// True only for an exit code of exactly zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
