//! Error types for building a secdist config.
//!
//! Responsibilities:
//! - Define error variants for document loading and section construction failures.
//!
//! Does NOT handle:
//! - Errors raised inside a section factory (see `SectionError` in section.rs).
//! - Unregistered or mismatched typed access; those are programming errors and panic.
//!
//! Invariants:
//! - All error variants include context for debugging (paths, variable names, section names).
//! - No variant includes raw document or environment content, to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::section::SectionError;

/// Errors that can occur while loading the secdist document or building the config.
#[derive(Error, Debug)]
pub enum SecdistError {
    #[error("Secdist config path is empty and missing_ok is not set")]
    MissingPath,

    #[error("Cannot load secdist config. File '{path}' doesn't exist or is unreachable")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SAFETY: the source error carries only a line and column, never the
    /// offending content.
    #[error("Failed to parse secdist config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentParseError,
    },

    #[error("Secdist document from {origin} is not a JSON object")]
    NotAnObject { origin: String },

    /// The environment variable was set but does not hold a JSON document.
    ///
    /// SAFETY: only the variable name and the parse position are reported.
    #[error("Failed to parse secdist document from environment variable {key} at line {line}, column {column}")]
    EnvParse {
        key: String,
        line: usize,
        column: usize,
    },

    #[error("Secdist section '{section}' (slot {slot}) rejected the document")]
    MalformedSection {
        section: &'static str,
        slot: usize,
        #[source]
        source: SectionError,
    },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

/// Position-only description of a document syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {format} syntax at line {line}, column {column}")]
pub struct DocumentParseError {
    pub format: &'static str,
    pub line: usize,
    pub column: usize,
}

impl SecdistError {
    /// Whether the error comes from the source document rather than a section factory.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPath
                | Self::SourceUnavailable { .. }
                | Self::Parse { .. }
                | Self::NotAnObject { .. }
                | Self::EnvParse { .. }
        )
    }
}
