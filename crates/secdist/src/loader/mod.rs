//! Secdist document loader.
//!
//! Responsibilities:
//! - Describe the document source with the builder-pattern `SecdistOptions`.
//! - Load the file document, honoring `missing_ok`.
//! - Merge an environment-supplied document over the file document.
//!
//! Does NOT handle:
//! - Running section factories (see `config.rs`).
//! - Secret rotation; the document is read once per build.
//!
//! Invariants / Assumptions:
//! - The environment document takes precedence over the file document.
//! - Documents are JSON objects; a `null` root is read as `{}`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod env;
mod merge;
mod options;
mod source;

#[cfg(test)]
mod tests;

pub use env::env_var_or_none;
pub use merge::merge_documents;
pub use options::SecdistOptions;
pub use source::DocumentFormat;
