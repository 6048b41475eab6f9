//! Plumbing around the external `dotnet msbuild` toolchain
//!
//! - [`command_builder`] - building and running an MSBuild invocation
//! - [`escape`] - single-line rendering of an argument vector
//! - [`muxer`] - locating the `dotnet` executable
//! - [`project_finder`] - choosing the project file a request refers to

pub mod command_builder;
pub mod escape;
pub mod muxer;
pub mod project_finder;

pub use command_builder::{MsBuildCommand, MsBuildOutput};
pub use escape::escape_and_concatenate;
pub use muxer::DotnetMuxer;
pub use project_finder::MsBuildProjectFinder;
