//! Picking the one MSBuild project a request refers to.
//!
//! A request names either a project file, a directory holding exactly one
//! project file, or nothing (the working directory is searched). Project files
//! are recognised by the `*.*proj` convention (`.csproj`, `.fsproj`,
//! `.vbproj`, ...); legacy `.xproj` files are ignored.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::SecretsError;

const PROJECT_FILE_PATTERN: &str = "*.*proj";
const IGNORED_EXTENSION: &str = "xproj";

/// Resolves a project locator to a single project file.
#[derive(Debug, Clone)]
pub struct MsBuildProjectFinder {
    directory: PathBuf,
}

impl MsBuildProjectFinder {
    /// Create a finder that resolves relative locators against `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Resolve `project` to one project file.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::MultipleProjectsFound`] when a searched directory
    ///   holds more than one project file
    /// - [`SecretsError::NoProjectFound`] when it holds none
    /// - [`SecretsError::ProjectPathNotFound`] when a file path does not exist
    pub fn find(&self, project: &str) -> Result<PathBuf> {
        let project_path = if project.is_empty() {
            self.directory.clone()
        } else {
            // `join` keeps absolute paths untouched.
            self.directory.join(project)
        };

        if project_path.is_dir() {
            let mut projects = find_project_files(&project_path)?;
            debug!(target: "resolver", "Found {} project file(s) in {}", projects.len(), project_path.display());

            return match projects.len() {
                0 => Err(SecretsError::NoProjectFound {
                    directory: project_path,
                }
                .into()),
                1 => Ok(projects.remove(0)),
                _ => Err(SecretsError::MultipleProjectsFound {
                    directory: project_path,
                }
                .into()),
            };
        }

        if !project_path.is_file() {
            return Err(SecretsError::ProjectPathNotFound {
                path: project_path,
            }
            .into());
        }

        Ok(project_path)
    }
}

/// Top-level entries of `directory` that look like project files.
fn find_project_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(PROJECT_FILE_PATTERN)
        .with_context(|| format!("Invalid glob pattern: {PROJECT_FILE_PATTERN}"))?;

    let mut projects = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", directory.display()))?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !pattern.matches(name) {
            continue;
        }
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(IGNORED_EXTENSION))
        {
            trace!(target: "resolver", "Skipping legacy project file {}", path.display());
            continue;
        }

        projects.push(path.to_path_buf());
    }

    Ok(projects)
}
