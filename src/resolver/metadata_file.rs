//! Scratch file the extraction target writes the identifier into.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempPath;

use crate::constants::METADATA_FILE_PREFIX;

/// Uniquely named temporary file, deleted when dropped.
///
/// The file is created empty so the name is reserved before MSBuild runs.
/// Deletion failures on drop are swallowed.
#[derive(Debug)]
pub struct MetadataFile {
    path: TempPath,
}

impl MetadataFile {
    /// Creates the file in `dir`, or in the system temp directory when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(METADATA_FILE_PREFIX).suffix(".txt");

        let file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("Failed to create temporary metadata file")?;

        let path = file.into_temp_path();
        tracing::trace!(target: "resolver", "Metadata file: {}", path.display());
        Ok(Self {
            path,
        })
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Trimmed file contents, or `None` if the file is empty or gone.
    ///
    /// Invalid UTF-8 sequences become U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns an error for read failures other than a missing file.
    pub fn read_id(&self) -> Result<Option<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read metadata file: {}", self.path.display()));
            }
        };

        let contents = String::from_utf8_lossy(&bytes);
        let id = contents.trim();
        Ok((!id.is_empty()).then(|| id.to_string()))
    }
}
