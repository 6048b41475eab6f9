//! Names shared between the resolver, the MSBuild invocation and the CLI.
//!
//! Most of these are contracts with `toolassets/SecretManager.targets`: the
//! target and property names here must match the ones the targets file
//! declares, otherwise `dotnet msbuild` succeeds without writing anything and
//! resolution fails with a missing-identifier error.

/// Configuration passed to MSBuild when the caller does not choose one.
pub const DEFAULT_CONFIGURATION: &str = "Debug";

/// File name of the build-logic file injected into the project evaluation.
pub const TARGETS_FILE_NAME: &str = "SecretManager.targets";

/// Directory that holds the build-logic file in packaged and local layouts.
pub const TOOL_ASSETS_DIR: &str = "toolassets";

/// Hidden target defined by the build-logic file.
pub const EXTRACT_METADATA_TARGET: &str = "_ExtractUserSecretsMetadata";

/// Property naming the file the extraction target writes the identifier to.
pub const METADATA_FILE_PROPERTY: &str = "_UserSecretsMetadataFile";

/// Standard MSBuild configuration property.
pub const CONFIGURATION_PROPERTY: &str = "Configuration";

/// Hook evaluated after the common targets of single-targeting projects.
pub const AFTER_COMMON_TARGETS_PROPERTY: &str = "CustomAfterMicrosoftCommonTargets";

/// Hook evaluated after the cross-targeting targets of multi-targeting projects.
pub const AFTER_CROSS_TARGETING_TARGETS_PROPERTY: &str =
    "CustomAfterMicrosoftCommonCrossTargetingTargets";

/// Verb passed to the dotnet muxer.
pub const MSBUILD_VERB: &str = "msbuild";

/// Set by the dotnet host when it launches tools; points at the muxer.
pub const DOTNET_HOST_PATH_ENV: &str = "DOTNET_HOST_PATH";

/// Optional directory searched first for the build-logic file.
pub const ASSETS_DIR_ENV: &str = "USER_SECRETS_ID_ASSETS_DIR";

/// Name of the secrets file stored under the per-id directory.
pub const SECRETS_FILE_NAME: &str = "secrets.json";

/// Prefix of the temporary files handed to the extraction target.
pub const METADATA_FILE_PREFIX: &str = "usersecrets-";
