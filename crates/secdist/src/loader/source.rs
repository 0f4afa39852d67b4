//! Reading the file and environment documents.
//!
//! Responsibilities:
//! - Read and parse the secdist file, applying the `missing_ok` policy.
//! - Read and parse the environment-supplied document.
//! - Normalize document roots (`null` becomes `{}`, other non-objects are rejected).
//!
//! Does NOT handle:
//! - Combining the two documents (see merge.rs).
//! - Running section factories (see config.rs).
//!
//! Invariants:
//! - With `missing_ok`, any failure to read or parse the file yields `{}` and a warning.
//! - Parse errors report positions only; document content never reaches an error or a log.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::env::env_var_or_none;
use crate::error::{DocumentParseError, SecdistError};

/// Syntax of the secdist file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    fn parse(self, content: &str) -> Result<Value, DocumentParseError> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| DocumentParseError {
                format: self.as_str(),
                line: e.line(),
                column: e.column(),
            }),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| {
                let (line, column) = e
                    .location()
                    .map_or((0, 0), |location| (location.line(), location.column()));
                DocumentParseError {
                    format: self.as_str(),
                    line,
                    column,
                }
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown document format '{other}' (expected json or yaml)")),
        }
    }
}

pub(crate) fn empty_document() -> Value {
    Value::Object(Map::new())
}

/// Load the file document.
///
/// `None` or an empty path is only accepted with `missing_ok`.
pub(crate) fn read_file_document(
    path: Option<&Path>,
    missing_ok: bool,
    format: DocumentFormat,
) -> Result<Value, SecdistError> {
    let path = match path.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => path,
        None if missing_ok => {
            tracing::debug!("No secdist config path set, starting from an empty document");
            return Ok(empty_document());
        }
        None => return Err(SecdistError::MissingPath),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if missing_ok => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "Failed to read secdist config, booting without it"
            );
            return Ok(empty_document());
        }
        Err(source) => {
            return Err(SecdistError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let doc = match format.parse(&content) {
        Ok(doc) => doc,
        Err(error) if missing_ok => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "Failed to parse secdist config, booting without it"
            );
            return Ok(empty_document());
        }
        Err(source) => {
            return Err(SecdistError::Parse {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    tracing::debug!(path = %path.display(), format = %format, "Loaded secdist config file");
    ensure_object(doc, || path.display().to_string())
}

/// Load the document stored in environment variable `key`.
///
/// Returns `None` when the variable is unset, empty, or whitespace-only.
pub(crate) fn read_env_document(key: &str) -> Result<Option<Value>, SecdistError> {
    let Some(raw) = env_var_or_none(key) else {
        tracing::debug!(key, "Secdist environment document not set");
        return Ok(None);
    };

    let doc: Value = serde_json::from_str(&raw).map_err(|e| SecdistError::EnvParse {
        key: key.to_string(),
        line: e.line(),
        column: e.column(),
    })?;

    tracing::debug!(key, "Loaded secdist document from environment");
    ensure_object(doc, || format!("environment variable {key}")).map(Some)
}

fn ensure_object(doc: Value, origin: impl FnOnce() -> String) -> Result<Value, SecdistError> {
    match doc {
        Value::Object(_) => Ok(doc),
        Value::Null => Ok(empty_document()),
        _ => Err(SecdistError::NotAnObject { origin: origin() }),
    }
}
