//! Secdist option resolution for the CLI.
//!
//! Responsibilities:
//! - Combine `SECDIST_*` environment variables with command-line flags.
//!
//! Invariants:
//! - Precedence: CLI flags > environment variables > defaults.
//! - Blank flag values are ignored so the environment value still applies.

use secdist::{DocumentFormat, SecdistError, SecdistOptions};

use crate::args::Cli;

pub(crate) fn resolve_options(cli: &Cli) -> Result<SecdistOptions, SecdistError> {
    let mut options = SecdistOptions::new().from_env()?;

    if let Some(path) = cli
        .config_path
        .as_ref()
        .filter(|path| !path.to_string_lossy().trim().is_empty())
    {
        options = options.with_path(path.clone());
    }
    if let Some(missing_ok) = cli.missing_ok {
        options = options.with_missing_ok(missing_ok);
    }
    if let Some(key) = cli.env_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        options = options.with_environment_secrets_key(key);
    }
    if let Some(format) = &cli.format {
        let format = format
            .parse::<DocumentFormat>()
            .map_err(|message| SecdistError::InvalidValue {
                var: "--format".to_string(),
                message,
            })?;
        options = options.with_format(format);
    }

    tracing::debug!(
        path = ?options.path(),
        missing_ok = options.missing_ok(),
        environment_secrets_key = ?options.environment_secrets_key(),
        format = %options.format(),
        "Resolved secdist options"
    );
    Ok(options)
}
