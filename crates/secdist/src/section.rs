//! The "parseable section" capability.
//!
//! Responsibilities:
//! - Define the `Section` trait every credentials section implements.
//! - Define `SectionError`, the error a section factory reports for a malformed document.
//! - Provide key-extraction helpers for the common "one top-level key per section" shape.
//!
//! Does NOT handle:
//! - Registration or slot assignment (see `registry.rs`).
//! - Loading or merging the source document (see `loader`).
//!
//! Invariants:
//! - A section is built from the whole document; it decides which keys it reads.
//! - `SectionError` messages name keys, never values, so secrets cannot leak into logs.

use std::any::Any;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A credentials section that can be constructed from the secdist document.
///
/// Implement this for every type that should be retrievable from a
/// [`SecdistConfig`](crate::SecdistConfig), then either call
/// [`register`](crate::register) during startup or invoke
/// [`register_section!`](crate::register_section) next to the type.
///
/// ```rust
/// use secdist::{Section, SectionError, optional_key};
/// use serde_json::Value;
///
/// struct ApiKeys(Vec<String>);
///
/// impl Section for ApiKeys {
///     const NAME: &'static str = "api-keys";
///
///     fn from_document(doc: &Value) -> Result<Self, SectionError> {
///         Ok(Self(optional_key(doc, "api-keys")?.unwrap_or_default()))
///     }
/// }
/// ```
pub trait Section: Any + Send + Sync + Sized {
    /// Human-readable name used in logs and error messages.
    const NAME: &'static str;

    /// Build the section from the merged document.
    fn from_document(doc: &Value) -> Result<Self, SectionError>;
}

/// Errors a section factory reports when the document does not fit its shape.
///
/// `Debug` is written by hand so the serde cause of `InvalidValue` is never printed.
#[derive(Error)]
pub enum SectionError {
    #[error("document root is not a JSON object")]
    NotAnObject,

    #[error("missing required key '{key}'")]
    MissingKey { key: String },

    /// `cause` may quote the offending value, so it is neither part of the
    /// message nor exposed as the error source.
    #[error("invalid value for key '{key}'")]
    InvalidValue {
        key: String,
        cause: serde_json::Error,
    },

    #[error("{message}")]
    Invalid { message: String },
}

impl fmt::Debug for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("NotAnObject"),
            Self::MissingKey { key } => f.debug_struct("MissingKey").field("key", key).finish(),
            Self::InvalidValue { key, .. } => f
                .debug_struct("InvalidValue")
                .field("key", key)
                .finish_non_exhaustive(),
            Self::Invalid { message } => {
                f.debug_struct("Invalid").field("message", message).finish()
            }
        }
    }
}

impl SectionError {
    /// Shorthand for a free-form validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Deserialize the top-level `key` of `doc`, failing if it is absent.
pub fn required_key<T: DeserializeOwned>(doc: &Value, key: &str) -> Result<T, SectionError> {
    optional_key(doc, key)?.ok_or_else(|| SectionError::MissingKey {
        key: key.to_string(),
    })
}

/// Deserialize the top-level `key` of `doc`, returning `None` if it is absent.
///
/// An explicit `null` counts as absent.
pub fn optional_key<T: DeserializeOwned>(doc: &Value, key: &str) -> Result<Option<T>, SectionError> {
    let object = doc.as_object().ok_or(SectionError::NotAnObject)?;
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|cause| SectionError::InvalidValue {
                key: key.to_string(),
                cause,
            }),
    }
}
