//! user-secrets-id - resolve the `UserSecretsId` of an MSBuild project
//!
//! .NET projects keep development secrets outside the source tree, in a
//! per-user `secrets.json` keyed by the project's `UserSecretsId` property.
//! Reading that property correctly means evaluating the project the way a
//! build would (imports, conditions, multi-targeting), so this crate asks
//! `dotnet msbuild` to do it rather than parsing XML.
//!
//! # Core Modules
//!
//! - [`resolver`] - locating `SecretManager.targets` and extracting the identifier
//! - [`msbuild`] - the `dotnet msbuild` invocation, muxer lookup, project discovery
//! - [`secrets_path`] - mapping an identifier to its `secrets.json`
//! - [`reporter`] - user-facing diagnostics
//! - [`core`] - error types and user-friendly error conversion
//! - [`cli`] - the `user-secrets-id` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use user_secrets_id::reporter::ConsoleReporter;
//! use user_secrets_id::resolver::ProjectIdResolver;
//!
//! # fn example() -> anyhow::Result<()> {
//! let reporter = Arc::new(ConsoleReporter::new(true));
//! let resolver = ProjectIdResolver::new(reporter, std::env::current_dir()?)?;
//!
//! let id = resolver.resolve("src/WebApp", Some("Release"))?;
//! println!("{id}");
//! # Ok(())
//! # }
//! ```
//!
//! # Environment
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `DOTNET_HOST_PATH` | muxer used to run MSBuild |
//! | `USER_SECRETS_ID_ASSETS_DIR` | directory searched first for `SecretManager.targets` |
//! | `RUST_LOG` | tracing filter, overrides `--verbose` / `--quiet` |

pub mod cli;
pub mod constants;
pub mod core;
pub mod msbuild;
pub mod reporter;
pub mod resolver;
pub mod secrets_path;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
