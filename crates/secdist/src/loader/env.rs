//! Environment variable parsing for secdist options.
//!
//! Responsibilities:
//! - Read and parse `SECDIST_*` environment variables.
//! - Apply their values to a `SecdistOptions` instance.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Reading the environment-supplied secdist document (see source.rs).
//! - .env file loading (handled by `SecdistOptions::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return `SecdistError::InvalidValue`.

use std::path::PathBuf;

use super::options::SecdistOptions;
use super::source::DocumentFormat;
use crate::constants::{
    ENV_CONFIG_PATH, ENV_ENVIRONMENT_SECRETS_KEY, ENV_FORMAT, ENV_MISSING_OK,
};
use crate::error::SecdistError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a boolean flag the way shell users write them.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Apply environment variable configuration to the options.
///
/// Values found in the environment replace the current ones.
pub fn apply_env(options: &mut SecdistOptions) -> Result<(), SecdistError> {
    if let Some(path) = env_var_or_none(ENV_CONFIG_PATH) {
        options.set_path(Some(PathBuf::from(path)));
    }
    if let Some(missing_ok) = env_var_or_none(ENV_MISSING_OK) {
        let value = parse_flag(&missing_ok).ok_or_else(|| SecdistError::InvalidValue {
            var: ENV_MISSING_OK.to_string(),
            message: "must be true or false".to_string(),
        })?;
        options.set_missing_ok(value);
    }
    if let Some(key) = env_var_or_none(ENV_ENVIRONMENT_SECRETS_KEY) {
        options.set_environment_secrets_key(Some(key));
    }
    if let Some(format) = env_var_or_none(ENV_FORMAT) {
        let value = format
            .parse::<DocumentFormat>()
            .map_err(|message| SecdistError::InvalidValue {
                var: ENV_FORMAT.to_string(),
                message,
            })?;
        options.set_format(value);
    }
    Ok(())
}
