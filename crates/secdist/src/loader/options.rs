//! Secdist construction options.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SecdistOptions` describing where the document comes from.
//! - Support loading options from environment variables and direct builder methods.
//! - Resolve the final merged document.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - File and environment document parsing (delegated to source.rs).
//!
//! Invariants / Assumptions:
//! - `from_env()` replaces builder values set before it with any environment values present.
//! - Builder methods applied after `from_env()` take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::env::{apply_env, env_var_or_none, parse_flag};
use super::merge::merge_documents;
use super::source::{DocumentFormat, read_env_document, read_file_document};
use crate::constants::ENV_DOTENV_DISABLED;
use crate::error::SecdistError;

/// Where the secdist document comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecdistOptions {
    path: Option<PathBuf>,
    missing_ok: bool,
    environment_secrets_key: Option<String>,
    format: DocumentFormat,
}

impl SecdistOptions {
    /// Create options with no file, `missing_ok` unset and no environment document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        env_var_or_none(ENV_DOTENV_DISABLED)
            .and_then(|value| parse_flag(&value))
            .unwrap_or(false)
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`SecdistError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`SecdistError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, SecdistError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(SecdistError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(SecdistError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(SecdistError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read options from `SECDIST_*` environment variables.
    ///
    /// Variables that are set replace the current values; unset or blank
    /// variables leave them untouched.
    pub fn from_env(mut self) -> Result<Self, SecdistError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the secdist file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Tolerate a missing, unreadable or unparsable file by starting from `{}`.
    pub fn with_missing_ok(mut self, missing_ok: bool) -> Self {
        self.missing_ok = missing_ok;
        self
    }

    /// Merge the JSON document stored in environment variable `key` over the file.
    pub fn with_environment_secrets_key(mut self, key: impl Into<String>) -> Self {
        self.environment_secrets_key = Some(key.into());
        self
    }

    /// Set the file syntax.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn missing_ok(&self) -> bool {
        self.missing_ok
    }

    pub fn environment_secrets_key(&self) -> Option<&str> {
        self.environment_secrets_key.as_deref()
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub(crate) fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    pub(crate) fn set_missing_ok(&mut self, missing_ok: bool) {
        self.missing_ok = missing_ok;
    }

    pub(crate) fn set_environment_secrets_key(&mut self, key: Option<String>) {
        self.environment_secrets_key = key;
    }

    pub(crate) fn set_format(&mut self, format: DocumentFormat) {
        self.format = format;
    }

    /// Resolve the merged secdist document.
    ///
    /// The file document (or `{}` under `missing_ok`) is loaded first; if an
    /// environment secrets key is set and the variable holds a document, it is
    /// merged over the file with [`merge_documents`].
    pub fn load_document(&self) -> Result<Value, SecdistError> {
        let file_doc = read_file_document(self.path(), self.missing_ok, self.format)?;

        let Some(key) = self.environment_secrets_key() else {
            return Ok(file_doc);
        };
        match read_env_document(key)? {
            Some(env_doc) => Ok(merge_documents(file_doc, env_doc)),
            None => Ok(file_doc),
        }
    }
}
