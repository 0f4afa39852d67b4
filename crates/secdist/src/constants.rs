//! Centralized constants for the secdist workspace.
//!
//! Environment variable names live here so the library and the CLI agree on them.

// =============================================================================
// Option Environment Variables
// =============================================================================

/// Path of the secdist file.
pub const ENV_CONFIG_PATH: &str = "SECDIST_CONFIG_PATH";

/// Whether a missing or unreadable secdist file is tolerated.
pub const ENV_MISSING_OK: &str = "SECDIST_MISSING_OK";

/// Name of the environment variable holding the secrets document to merge in.
pub const ENV_ENVIRONMENT_SECRETS_KEY: &str = "SECDIST_ENVIRONMENT_SECRETS_KEY";

/// Syntax of the secdist file (`json` or `yaml`).
pub const ENV_FORMAT: &str = "SECDIST_FORMAT";

/// Set to `true` or `1` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
