//! On-disk fixtures: project directories, tool assets and fake muxers.
//!
//! A [`FakeMuxer`] is a small `sh` script standing in for `dotnet`. It records
//! every argument vector it receives and then acts out a [`MuxerBehavior`]
//! against the file named by `/p:_UserSecretsMetadataFile=`. Fake muxers only
//! run on unix.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{METADATA_FILE_PROPERTY, TARGETS_FILE_NAME, TOOL_ASSETS_DIR};

/// Build logic shipped with the crate.
pub const TARGETS_CONTENT: &str = include_str!("../../toolassets/SecretManager.targets");

const END_OF_INVOCATION: &str = "--end--";

/// Minimal SDK-style project declaring a `UserSecretsId`.
pub fn sdk_project(user_secrets_id: &str) -> String {
    format!(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <UserSecretsId>{user_secrets_id}</UserSecretsId>
  </PropertyGroup>
</Project>
"#
    )
}

/// A temporary workspace with separate `work/` and `tools/` directories.
///
/// Projects are created in `work/`; assets and fake muxers go in `tools/` so
/// they never show up during project discovery.
pub struct ProjectDir {
    temp: TempDir,
}

impl ProjectDir {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        fs::create_dir_all(temp.path().join("work"))?;
        fs::create_dir_all(temp.path().join("tools"))?;
        Ok(Self {
            temp,
        })
    }

    /// Working directory holding the projects.
    pub fn path(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Directory for tool assets and fake muxers.
    pub fn tools_dir(&self) -> PathBuf {
        self.temp.path().join("tools")
    }

    /// Writes an SDK project at `work/<relative>` and returns its path.
    pub fn add_project(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, sdk_project("fixture-secrets-id"))
            .with_context(|| format!("Failed to write project: {}", path.display()))?;
        Ok(path)
    }

    /// Installs the targets file into `tools/toolassets/` and returns that
    /// directory.
    pub fn install_assets(&self) -> Result<PathBuf> {
        let dir = self.tools_dir().join(TOOL_ASSETS_DIR);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(TARGETS_FILE_NAME), TARGETS_CONTENT)?;
        Ok(dir)
    }
}

/// What a [`FakeMuxer`] does after recording its arguments.
#[derive(Debug, Clone)]
pub enum MuxerBehavior {
    /// Writes the given text verbatim to the metadata file and exits 0.
    WriteId(String),
    /// Writes the project file name without extension and exits 0.
    EchoProjectName,
    /// Writes a decoy id, prints both streams and exits with `code`.
    Fail {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// Exits 0 without touching the metadata file.
    WriteNothing,
}

impl MuxerBehavior {
    fn script_body(&self) -> String {
        match self {
            Self::WriteId(id) => format!("printf '%s' {} > \"$out\"\nexit 0\n", sh_quote(id)),
            Self::EchoProjectName => "name=$(basename \"$2\")\nprintf '%s\\n' \"${name%.*}\" > \"$out\"\nexit 0\n".to_string(),
            Self::Fail {
                code,
                stdout,
                stderr,
            } => format!(
                "printf '%s\\n' 'decoy-id' > \"$out\"\nprintf '%s\\n' {}\nprintf '%s\\n' {} >&2\nexit {}\n",
                sh_quote(stdout),
                sh_quote(stderr),
                code
            ),
            Self::WriteNothing => "exit 0\n".to_string(),
        }
    }
}

fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Executable script impersonating the `dotnet` muxer.
#[derive(Debug, Clone)]
pub struct FakeMuxer {
    path: PathBuf,
    log: PathBuf,
}

impl FakeMuxer {
    /// Writes `fake-dotnet` (and its log) into `dir`.
    pub fn create(dir: impl AsRef<Path>, behavior: MuxerBehavior) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join("fake-dotnet");
        let log = dir.join("fake-dotnet.log");
        fs::write(&log, "")?;

        let script = format!(
            "#!/bin/sh\nout=''\nfor arg in \"$@\"; do\n  case \"$arg\" in\n    /p:{prop}=*) out=\"${{arg#/p:{prop}=}}\" ;;\n  esac\ndone\nprintf '%s\\n' \"$@\" '{end}' >> {log}\n{body}",
            prop = METADATA_FILE_PROPERTY,
            end = END_OF_INVOCATION,
            log = sh_quote(&log.display().to_string()),
            body = behavior.script_body(),
        );
        fs::write(&path, script).with_context(|| format!("Failed to write fake muxer: {}", path.display()))?;
        make_executable(&path)?;

        Ok(Self {
            path,
            log,
        })
    }

    /// Path to pass as the muxer.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Argument vectors of every run so far, oldest first.
    pub fn invocations(&self) -> Result<Vec<Vec<String>>> {
        let log = fs::read_to_string(&self.log)?;
        let mut invocations = Vec::new();
        let mut current = Vec::new();
        for line in log.lines() {
            if line == END_OF_INVOCATION {
                invocations.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        Ok(invocations)
    }

    /// Metadata file each run was asked to write.
    pub fn metadata_paths(&self) -> Result<Vec<PathBuf>> {
        let prefix = format!("/p:{METADATA_FILE_PROPERTY}=");
        Ok(self
            .invocations()?
            .iter()
            .filter_map(|args| args.iter().find_map(|arg| arg.strip_prefix(&prefix)))
            .map(PathBuf::from)
            .collect())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
