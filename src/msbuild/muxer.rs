//! Locating the `dotnet` muxer.

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::DOTNET_HOST_PATH_ENV;
use crate::utils::platform::get_dotnet_command;

/// Lookup of the dotnet host executable that dispatches `msbuild`.
pub struct DotnetMuxer;

impl DotnetMuxer {
    /// Best known path of the muxer, or `None` when it has to be resolved by
    /// the operating system at spawn time.
    ///
    /// Checked in order:
    /// 1. `DOTNET_HOST_PATH`, when it names an existing file
    /// 2. the running executable, when it is itself the muxer
    /// 3. `dotnet` on `PATH`
    pub fn path() -> Option<PathBuf> {
        if let Some(host) = env::var_os(DOTNET_HOST_PATH_ENV).map(PathBuf::from) {
            if host.is_file() {
                tracing::trace!(target: "msbuild", "Using muxer from {}: {}", DOTNET_HOST_PATH_ENV, host.display());
                return Some(host);
            }
            tracing::debug!(
                target: "msbuild",
                "{} points at a missing file, ignoring: {}",
                DOTNET_HOST_PATH_ENV,
                host.display()
            );
        }

        if let Ok(current) = env::current_exe() {
            if is_muxer(&current) {
                return Some(current);
            }
        }

        which::which(get_dotnet_command()).ok()
    }

    /// [`path`](Self::path), falling back to the bare command name.
    pub fn path_or_default() -> PathBuf {
        Self::path().unwrap_or_else(|| PathBuf::from(get_dotnet_command()))
    }
}

fn is_muxer(path: &Path) -> bool {
    path.file_stem().is_some_and(|stem| stem.eq_ignore_ascii_case("dotnet"))
}
