//! Shared test utilities for secdist CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `SECDIST_*` variables from the host are cleared.

use assert_cmd::Command;

/// Returns a hermetic `secdist` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `SECDIST_*` env vars are cleared to ensure no leakage from the host.
pub fn secdist_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("secdist");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("SECDIST_CONFIG_PATH")
        .env_remove("SECDIST_MISSING_OK")
        .env_remove("SECDIST_ENVIRONMENT_SECRETS_KEY")
        .env_remove("SECDIST_FORMAT");

    cmd
}
