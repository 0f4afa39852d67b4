//! Tests for the secdist document loader.
//!
//! Responsibilities:
//! - Test file loading and the `missing_ok` policy.
//! - Test environment document merging and `SECDIST_*` option parsing.
//! - Test `.env` loading behavior.
//!
//! Does NOT handle:
//! - Merge semantics in isolation (tested in merge.rs and the proptest suite).
//! - Section construction (tested in config.rs).
//!
//! Invariants:
//! - Tests touching the environment or cwd use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod dotenv_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_document(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
