//! Resolving a project's `UserSecretsId` through MSBuild.
//!
//! The identifier is never parsed out of the project file. Instead MSBuild
//! evaluates the project with `SecretManager.targets` injected as an
//! after-targets hook, and the hidden `_ExtractUserSecretsMetadata` target
//! writes the evaluated `$(UserSecretsId)` into a scratch file:
//!
//! ```text
//! dotnet msbuild <project> /nologo /t:_ExtractUserSecretsMetadata
//!     /p:_UserSecretsMetadataFile=<tmp> /p:Configuration=<cfg>
//!     /p:CustomAfterMicrosoftCommonTargets=<targets>
//!     /p:CustomAfterMicrosoftCommonCrossTargetingTargets=<targets>
//! ```
//!
//! Conditional properties, imported props and multi-targeting therefore all
//! behave exactly as they do during a real build.
//!
//! # Lifecycle
//!
//! 1. [`ProjectIdResolver::new`] locates the targets file once (see
//!    [`locator`]) and the dotnet muxer.
//! 2. Each [`ProjectIdResolver::resolve`] call picks the project, runs MSBuild,
//!    and reads the scratch file. The scratch file is removed on every path.
//!
//! Calls are synchronous and independent; a resolver can be shared between
//! threads.

pub mod locator;
pub mod metadata_file;

pub use locator::{InstallRoot, TargetsLocator};
pub use metadata_file::MetadataFile;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{
    AFTER_COMMON_TARGETS_PROPERTY, AFTER_CROSS_TARGETING_TARGETS_PROPERTY, CONFIGURATION_PROPERTY,
    DEFAULT_CONFIGURATION, EXTRACT_METADATA_TARGET, METADATA_FILE_PROPERTY,
};
use crate::core::SecretsError;
use crate::msbuild::{DotnetMuxer, MsBuildCommand, MsBuildProjectFinder};
use crate::reporter::Reporter;

/// A project file together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    /// Project file MSBuild evaluated
    pub project_file: PathBuf,
    /// Trimmed, non-empty `UserSecretsId`
    pub id: String,
}

/// Resolves `UserSecretsId` values for projects under a working directory.
pub struct ProjectIdResolver {
    reporter: Arc<dyn Reporter>,
    working_directory: PathBuf,
    targets_file: Option<PathBuf>,
    muxer: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl ProjectIdResolver {
    /// Resolver for the installed tool.
    ///
    /// Looks for the targets file around the running executable. A missing
    /// targets file is reported through `reporter` here, and every later
    /// [`resolve`](Self::resolve) fails with
    /// [`SecretsError::TargetsFileNotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the executable location cannot be determined.
    pub fn new(reporter: Arc<dyn Reporter>, working_directory: impl Into<PathBuf>) -> Result<Self> {
        let root = InstallRoot::current()?;
        Ok(Self::with_install_root(reporter, working_directory, &root))
    }

    /// Resolver looking under `root` for the targets file.
    pub fn with_install_root(
        reporter: Arc<dyn Reporter>,
        working_directory: impl Into<PathBuf>,
        root: &InstallRoot,
    ) -> Self {
        let targets_file = TargetsLocator::for_install_root(root).locate(reporter.as_ref());

        Self {
            reporter,
            working_directory: working_directory.into(),
            targets_file,
            muxer: DotnetMuxer::path_or_default(),
            temp_dir: None,
        }
    }

    /// Uses `muxer` instead of the discovered `dotnet`.
    pub fn with_muxer(mut self, muxer: impl Into<PathBuf>) -> Self {
        self.muxer = muxer.into();
        self
    }

    /// Creates scratch files in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// The located targets file, if any.
    #[must_use]
    pub fn targets_file(&self) -> Option<&Path> {
        self.targets_file.as_deref()
    }

    /// The `UserSecretsId` of `project`.
    ///
    /// `project` is a project file or a directory holding one; empty means the
    /// working directory. `configuration` defaults to `Debug` when `None` or
    /// empty.
    ///
    /// # Errors
    ///
    /// See [`resolve_project`](Self::resolve_project).
    pub fn resolve(&self, project: &str, configuration: Option<&str>) -> Result<String> {
        self.resolve_project(project, configuration).map(|resolved| resolved.id)
    }

    /// Like [`resolve`](Self::resolve), also returning the project file used.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::TargetsFileNotFound`] when no targets file was found
    /// - project discovery errors from [`MsBuildProjectFinder::find`]
    /// - [`SecretsError::MuxerLaunchFailed`] when `dotnet` cannot be started
    /// - [`SecretsError::ProjectFailedToLoad`] when MSBuild exits non-zero
    /// - [`SecretsError::ProjectMissingId`] when no identifier was written
    pub fn resolve_project(&self, project: &str, configuration: Option<&str>) -> Result<ResolvedProject> {
        let Some(targets_file) = self.targets_file.as_deref() else {
            return Err(SecretsError::targets_file_not_found().into());
        };

        let project_file = MsBuildProjectFinder::new(&self.working_directory).find(project)?;
        self.reporter.verbose(&format!("Project file path {}.", project_file.display()));

        let configuration = normalize_configuration(configuration);
        let metadata = MetadataFile::create(self.temp_dir.as_deref())?;

        let output = MsBuildCommand::new(&self.muxer)
            .project(&project_file)
            .nologo()
            .target(EXTRACT_METADATA_TARGET)
            .property(METADATA_FILE_PROPERTY, metadata.path())
            .property(CONFIGURATION_PROPERTY, configuration)
            .property(AFTER_COMMON_TARGETS_PROPERTY, targets_file)
            .property(AFTER_CROSS_TARGETING_TARGETS_PROPERTY, targets_file)
            .current_dir(&self.working_directory)
            .with_context("user secrets id")
            .execute()?;

        if !output.success() {
            self.reporter.verbose(&output.stdout);
            self.reporter.verbose(&output.stderr);
            return Err(SecretsError::ProjectFailedToLoad {
                project: project_file,
            }
            .into());
        }

        let Some(id) = metadata.read_id()? else {
            return Err(SecretsError::ProjectMissingId {
                project: project_file,
            }
            .into());
        };

        tracing::debug!(target: "resolver", "Resolved {} for {}", id, project_file.display());
        Ok(ResolvedProject {
            project_file,
            id,
        })
    }
}

/// `Debug` unless a non-empty configuration was given.
fn normalize_configuration(configuration: Option<&str>) -> &str {
    match configuration {
        Some(cfg) if !cfg.is_empty() => cfg,
        _ => DEFAULT_CONFIGURATION,
    }
}
