//! Shared helpers for the integration suite
//!
//! A [`Workspace`] bundles a project directory, the installed tool assets, a
//! fake `dotnet` and a private scratch directory so each test can check that
//! no metadata file outlives a resolution.

// Not every test module uses every helper.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use user_secrets_id::resolver::{InstallRoot, ProjectIdResolver};
use user_secrets_id::test_utils::RecordingReporter;
use user_secrets_id::test_utils::fixtures::{FakeMuxer, MuxerBehavior, ProjectDir};

/// Directory holding the targets file shipped with the crate.
pub fn shipped_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("toolassets")
}

pub struct Workspace {
    pub projects: ProjectDir,
    pub assets: PathBuf,
    pub muxer: FakeMuxer,
    pub scratch: TempDir,
    pub home: TempDir,
}

impl Workspace {
    pub fn new(behavior: MuxerBehavior) -> Self {
        user_secrets_id::test_utils::init_test_logging(None);

        let projects = ProjectDir::new().unwrap();
        let assets = projects.install_assets().unwrap();
        let muxer = FakeMuxer::create(projects.tools_dir(), behavior).unwrap();

        Self {
            projects,
            assets,
            muxer,
            scratch: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    /// Resolver wired to this workspace's assets, muxer and scratch directory.
    pub fn resolver(&self, reporter: Arc<RecordingReporter>) -> ProjectIdResolver {
        let tools = self.projects.tools_dir();
        let root = InstallRoot::new(&tools, &tools).with_assets_override(&self.assets);
        ProjectIdResolver::with_install_root(reporter, self.projects.path(), &root)
            .with_muxer(self.muxer.path())
            .with_temp_dir(self.scratch.path())
    }

    /// Whether the scratch directory holds no files.
    pub fn scratch_is_empty(&self) -> bool {
        fs::read_dir(self.scratch.path()).unwrap().next().is_none()
    }

    /// `user-secrets-id` binary pointed at this workspace.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("user-secrets-id").unwrap();
        cmd.current_dir(self.projects.path())
            .env("USER_SECRETS_ID_ASSETS_DIR", &self.assets)
            .env("DOTNET_HOST_PATH", self.muxer.path())
            .env("HOME", self.home.path())
            .env("TMPDIR", self.scratch.path())
            .env_remove("RUST_LOG");
        cmd
    }
}
