//! Cross-platform utilities
//!
//! - [`platform`] - command names, secrets storage root and file name rules

pub mod platform;

pub use platform::{get_dotnet_command, is_windows, user_secrets_root};
