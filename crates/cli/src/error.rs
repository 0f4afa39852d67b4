//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `SecdistError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.

use secdist::SecdistError;

/// Structured exit codes for the secdist CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Source unavailable - the secdist file is missing or unreadable and
    /// `missing_ok` is not set.
    SourceUnavailable = 2,

    /// Malformed document - the file or environment document does not parse,
    /// or its root is not an object.
    MalformedDocument = 3,

    /// Malformed section - a registered section rejected the document.
    MalformedSection = 4,

    /// Invalid option - a `SECDIST_*` variable or flag has an unusable value.
    InvalidOption = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&SecdistError> for ExitCode {
    fn from(err: &SecdistError) -> Self {
        match err {
            SecdistError::MissingPath | SecdistError::SourceUnavailable { .. } => {
                ExitCode::SourceUnavailable
            }

            SecdistError::Parse { .. }
            | SecdistError::NotAnObject { .. }
            | SecdistError::EnvParse { .. } => ExitCode::MalformedDocument,

            SecdistError::MalformedSection { .. } => ExitCode::MalformedSection,

            SecdistError::InvalidValue { .. } => ExitCode::InvalidOption,

            SecdistError::DotenvParse { .. }
            | SecdistError::DotenvIo { .. }
            | SecdistError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no SecdistError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<SecdistError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
