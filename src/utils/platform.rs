//! Platform-specific helpers
//!
//! | Concern | Windows | Unix-like |
//! |---------|---------|-----------|
//! | dotnet command | `dotnet.exe` | `dotnet` |
//! | secrets root | `%APPDATA%\Microsoft\UserSecrets` | `~/.microsoft/usersecrets` |
//! | invalid file name chars | `<>:"/\|?*` and control chars | `/` and NUL |

use std::path::PathBuf;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the dotnet muxer command name for the current platform.
///
/// Used as the last resort when the muxer cannot be located on disk; the
/// operating system then resolves it through `PATH` at spawn time.
#[must_use]
pub const fn get_dotnet_command() -> &'static str {
    if is_windows() {
        "dotnet.exe"
    } else {
        "dotnet"
    }
}

/// Directory under which every project's secrets directory lives.
///
/// Returns `None` when neither the roaming application data directory
/// (Windows) nor the home directory (elsewhere) can be determined.
#[must_use]
pub fn user_secrets_root() -> Option<PathBuf> {
    if is_windows() {
        dirs::config_dir().map(|appdata| appdata.join("Microsoft").join("UserSecrets"))
    } else {
        dirs::home_dir().map(|home| home.join(".microsoft").join("usersecrets"))
    }
}

/// Whether `c` may not appear in a file name on this platform.
#[must_use]
pub fn is_invalid_file_name_char(c: char) -> bool {
    if is_windows() {
        matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (c as u32) < 32
    } else {
        matches!(c, '/' | '\0')
    }
}

/// Finds the first character of `name` that cannot appear in a file name.
///
/// The returned index counts characters, not bytes.
#[must_use]
pub fn find_invalid_file_name_char(name: &str) -> Option<(usize, char)> {
    name.chars().enumerate().find(|(_, c)| is_invalid_file_name_char(*c))
}
