//! Error handling for user-secrets-id
//!
//! Two layers, the same way the rest of the crate is written:
//! 1. [`SecretsError`] - strongly-typed failures, carried inside
//!    [`anyhow::Error`] by every fallible operation
//! 2. [`ErrorContext`] - the error plus details and a suggestion, printed by
//!    the CLI
//!
//! Callers that need to react to a specific failure downcast:
//!
//! ```rust,no_run
//! use user_secrets_id::core::SecretsError;
//!
//! fn classify(err: &anyhow::Error) -> &'static str {
//!     match err.downcast_ref::<SecretsError>() {
//!         Some(SecretsError::ProjectFailedToLoad { .. }) => "build failed",
//!         Some(SecretsError::ProjectMissingId { .. }) => "no UserSecretsId",
//!         Some(_) => "other resolver failure",
//!         None => "unexpected",
//!     }
//! }
//! ```

use colored::Colorize;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::TARGETS_FILE_NAME;

/// Failures produced while resolving a project's user secrets identifier.
///
/// Variants that concern a project carry the offending path so the CLI can
/// name it without any extra bookkeeping.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// The build-logic file was not found next to the installed tool.
    ///
    /// Reported once when the resolver is constructed and returned by every
    /// resolution attempted afterwards.
    #[error("Could not find {file_name}. The tool assets are missing from this installation")]
    TargetsFileNotFound {
        /// File name that was searched for
        file_name: String,
    },

    /// An explicit project path does not exist.
    #[error("The project file '{}' does not exist", path.display())]
    ProjectPathNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// A directory was searched and contains no MSBuild project file.
    #[error("Could not find a MSBuild project file in '{}'", directory.display())]
    NoProjectFound {
        /// Directory that was searched
        directory: PathBuf,
    },

    /// A directory was searched and contains more than one MSBuild project file.
    #[error("Multiple MSBuild project files found in '{}'", directory.display())]
    MultipleProjectsFound {
        /// Directory that was searched
        directory: PathBuf,
    },

    /// `dotnet msbuild` exited with a non-zero status.
    ///
    /// The captured output is reported at verbose level and intentionally not
    /// part of the message.
    #[error("Could not load the MSBuild project '{}'", project.display())]
    ProjectFailedToLoad {
        /// Project that failed to evaluate
        project: PathBuf,
    },

    /// `dotnet msbuild` succeeded but produced no identifier.
    #[error("Could not find the global property 'UserSecretsId' in MSBuild project '{}'", project.display())]
    ProjectMissingId {
        /// Project that lacks the property
        project: PathBuf,
    },

    /// The dotnet muxer could not be started at all.
    #[error("Failed to start '{program}'")]
    MuxerLaunchFailed {
        /// Program that was executed
        program: String,
        /// Underlying spawn failure
        #[source]
        source: std::io::Error,
    },

    /// A user secrets identifier contains a character that cannot appear in a
    /// file name.
    #[error("Invalid character '{character}' found in the user secrets ID at index '{index}'")]
    InvalidSecretsId {
        /// The rejected identifier
        id: String,
        /// First offending character
        character: char,
        /// Character index of the offending character
        index: usize,
    },

    /// A user secrets identifier is empty or only whitespace.
    #[error("The user secrets ID cannot be empty")]
    EmptySecretsId,

    /// A user secrets identifier names the current or parent directory.
    #[error("The user secrets ID '{id}' is not a valid directory name")]
    ReservedSecretsId {
        /// The rejected identifier
        id: String,
    },

    /// No home or application data directory is available for secrets storage.
    #[error("Could not determine the user secrets storage directory")]
    SecretsRootUnavailable,

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl SecretsError {
    /// Build a [`SecretsError::TargetsFileNotFound`] for the shipped targets file.
    #[must_use]
    pub fn targets_file_not_found() -> Self {
        Self::TargetsFileNotFound {
            file_name: TARGETS_FILE_NAME.to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Displayed by the CLI as:
/// 1. **error** in red
/// 2. **details** in yellow (optional)
/// 3. **suggestion** in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SecretsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SecretsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        // Last thing printed before exiting; a closed stderr is not worth a panic.
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            let _ = writeln!(stderr, "{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(stderr, "{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// [`SecretsError`] values get tailored suggestions, [`std::io::Error`] values
/// get filesystem guidance, and anything else is shown with its cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<SecretsError>() {
        Ok(secrets_error) => return create_error_context(secrets_error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(SecretsError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check the permissions of the project directory and the system temp directory")
                .with_details("Resolution writes a temporary file and reads the project directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(SecretsError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SecretsError::Other {
        message,
    })
}

/// Attach suggestions and details to a specific [`SecretsError`].
fn create_error_context(error: SecretsError) -> ErrorContext {
    match &error {
        SecretsError::TargetsFileNotFound { file_name } => {
            let details = format!(
                "{file_name} is searched for next to the executable and in a 'toolassets' directory relative to it"
            );
            ErrorContext::new(error)
                .with_suggestion("Reinstall the tool, or point USER_SECRETS_ID_ASSETS_DIR at the directory containing the targets file")
                .with_details(details)
        }

        SecretsError::ProjectPathNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the value passed to --project"),

        SecretsError::NoProjectFound { .. } => ErrorContext::new(error)
            .with_suggestion("Specify which project to use with the --project option"),

        SecretsError::MultipleProjectsFound { .. } => ErrorContext::new(error)
            .with_suggestion("Specify which project to use with the --project option"),

        SecretsError::ProjectFailedToLoad { .. } => ErrorContext::new(error)
            .with_suggestion("Run again with --verbose to see the MSBuild output")
            .with_details("dotnet msbuild exited with a non-zero status while evaluating the project"),

        SecretsError::ProjectMissingId { .. } => ErrorContext::new(error)
            .with_suggestion("Set the UserSecretsId property in the project file, or pass the identifier with --id"),

        SecretsError::MuxerLaunchFailed { source, .. } => {
            let details = format!("The operating system reported: {source}");
            ErrorContext::new(error)
                .with_suggestion("Install the .NET SDK and make sure 'dotnet' is on PATH, or set DOTNET_HOST_PATH")
                .with_details(details)
        }

        SecretsError::InvalidSecretsId { .. } => ErrorContext::new(error)
            .with_suggestion("User secrets IDs may only contain characters that are valid in file names"),

        SecretsError::EmptySecretsId | SecretsError::ReservedSecretsId { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the identifier from the project's UserSecretsId property, or omit --id to resolve it"),

        SecretsError::SecretsRootUnavailable => ErrorContext::new(error).with_suggestion(
            if cfg!(windows) {
                "Make sure the APPDATA environment variable is set"
            } else {
                "Make sure the HOME environment variable is set"
            },
        ),

        _ => ErrorContext::new(error),
    }
}
