//! Finding `SecretManager.targets` next to the installed tool.
//!
//! Where the targets file lives depends on how the tool was distributed, so a
//! short, ordered list of directories relative to the executable is searched and
//! the first hit wins:
//!
//! | # | Directory | Layout |
//! |---|-----------|--------|
//! | 0 | `$USER_SECRETS_ID_ASSETS_DIR` | explicit override |
//! | 1 | `<base>` | targets file copied next to the executable |
//! | 2 | `<binary>` | same, after resolving symlinks |
//! | 3 | `<binary>/../../toolassets` | packaged install; `target/<profile>` in a checkout |
//! | 4 | `<binary>/toolassets` | local build output |
//! | 5 | `<base>/../../toolassets` | packaged launcher |

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{ASSETS_DIR_ENV, TARGETS_FILE_NAME, TOOL_ASSETS_DIR};
use crate::reporter::Reporter;

/// Where the running tool is installed.
///
/// Resolved once and handed to [`TargetsLocator`]; nothing downstream looks
/// at `current_exe` again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoot {
    /// Directory of the executable as it was launched
    pub base_dir: PathBuf,
    /// Directory of the executable with symlinks resolved
    pub binary_dir: PathBuf,
    /// Directory searched before any other, if configured
    pub assets_override: Option<PathBuf>,
}

impl InstallRoot {
    /// Install root with explicit directories and no override.
    pub fn new(base_dir: impl Into<PathBuf>, binary_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            binary_dir: binary_dir.into(),
            assets_override: None,
        }
    }

    /// Adds a directory searched before every other candidate.
    pub fn with_assets_override(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_override = Some(dir.into());
        self
    }

    /// Install root of the running executable.
    ///
    /// Honors `USER_SECRETS_ID_ASSETS_DIR` when it is set and not empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be determined.
    pub fn current() -> Result<Self> {
        let exe = env::current_exe().context("Failed to get current executable path")?;
        let base_dir = parent_dir(&exe);
        let binary_dir = exe.canonicalize().map(|resolved| parent_dir(&resolved)).unwrap_or_else(|_| base_dir.clone());

        let mut root = Self::new(base_dir, binary_dir);
        if let Some(dir) = env::var_os(ASSETS_DIR_ENV).filter(|dir| !dir.is_empty()) {
            root = root.with_assets_override(PathBuf::from(dir));
        }
        Ok(root)
    }

    /// Candidate directories in priority order.
    pub fn candidate_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let assets = Path::new("..").join("..").join(TOOL_ASSETS_DIR);

        self.assets_override.iter().cloned().chain([
            self.base_dir.clone(),
            self.binary_dir.clone(),
            self.binary_dir.join(&assets),
            self.binary_dir.join(TOOL_ASSETS_DIR),
            self.base_dir.join(&assets),
        ])
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Searches an ordered list of directories for a file.
#[derive(Debug, Clone)]
pub struct TargetsLocator {
    candidates: Vec<PathBuf>,
    file_name: String,
}

impl TargetsLocator {
    /// Locator for `SecretManager.targets` under the given install root.
    #[must_use]
    pub fn for_install_root(root: &InstallRoot) -> Self {
        Self::new(root.candidate_dirs().collect(), TARGETS_FILE_NAME)
    }

    /// Locator checking `candidates`, in order, for `file_name`.
    pub fn new(candidates: Vec<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            candidates,
            file_name: file_name.into(),
        }
    }

    /// First existing `<candidate>/<file_name>`.
    ///
    /// Stops at the first hit. When nothing matches, reports one error
    /// through `reporter` and returns `None`; this never fails.
    pub fn locate(&self, reporter: &dyn Reporter) -> Option<PathBuf> {
        let found = self
            .candidates
            .iter()
            .map(|dir| dir.join(&self.file_name))
            .inspect(|path| tracing::trace!(target: "resolver", "Checking {}", path.display()))
            .find(|path| path.is_file());

        match found {
            Some(path) => {
                tracing::debug!(target: "resolver", "Using build logic from {}", path.display());
                Some(path)
            }
            None => {
                reporter.error(&format!("Fatal error: could not find {}", self.file_name));
                None
            }
        }
    }
}
