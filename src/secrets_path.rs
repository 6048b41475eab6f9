//! Where a user secrets identifier's `secrets.json` lives.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::constants::SECRETS_FILE_NAME;
use crate::core::SecretsError;
use crate::utils::platform::{find_invalid_file_name_char, user_secrets_root};

/// Trims a user-supplied identifier and checks it names a single directory.
///
/// # Errors
///
/// - [`SecretsError::EmptySecretsId`] if nothing is left after trimming
/// - [`SecretsError::ReservedSecretsId`] for `.` and `..`
/// - [`SecretsError::InvalidSecretsId`] for characters invalid in file names
pub fn parse_secrets_id(raw: &str) -> Result<String> {
    let id = raw.trim();
    validate_id(id)?;
    Ok(id.to_string())
}

/// Path of the `secrets.json` file for `id` under the per-user secrets root.
///
/// # Errors
///
/// - the validation errors of [`parse_secrets_id`], without trimming
/// - [`SecretsError::SecretsRootUnavailable`] if no home (or `APPDATA`)
///   directory can be determined
pub fn secrets_path_from_id(id: &str) -> Result<PathBuf> {
    validate_id(id)?;
    let root = user_secrets_root().ok_or(SecretsError::SecretsRootUnavailable)?;
    Ok(secrets_path_in(&root, id))
}

/// `<root>/<id>/secrets.json`, without validation.
#[must_use]
pub fn secrets_path_in(root: &Path, id: &str) -> PathBuf {
    root.join(id).join(SECRETS_FILE_NAME)
}

fn validate_id(id: &str) -> Result<(), SecretsError> {
    if id.trim().is_empty() {
        return Err(SecretsError::EmptySecretsId);
    }
    if id == "." || id == ".." {
        return Err(SecretsError::ReservedSecretsId {
            id: id.to_string(),
        });
    }
    match find_invalid_file_name_char(id) {
        Some((index, character)) => Err(SecretsError::InvalidSecretsId {
            id: id.to_string(),
            character,
            index,
        }),
        None => Ok(()),
    }
}
