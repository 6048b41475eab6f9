//! Core error types shared by every module.
//!
//! - [`SecretsError`] - typed failures carried inside [`anyhow::Error`]
//! - [`ErrorContext`] - error plus suggestion and details for CLI display
//! - [`user_friendly_error`] - maps any error to an [`ErrorContext`]

pub mod error;

pub use error::{ErrorContext, SecretsError, user_friendly_error};
