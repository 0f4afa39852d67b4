//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test that missing `.env` files are silently ignored.
//! - Test that invalid `.env` files return errors without leaking secrets.
//! - Test that `DOTENV_DISABLED=1`/`true` skips dotenv loading.
//!
//! Invariants / Assumptions:
//! - Tests are `#[serial]` and hold `env_lock()`; they change the process cwd.
//! - Error messages must never contain secret values from `.env` files.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::env_lock;
use crate::error::SecdistError;
use crate::loader::SecdistOptions;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

const INVALID_DOTENV: &str = "INVALID_LINE_WITHOUT_EQUALS";

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    temp_env::with_var("DOTENV_DISABLED", None::<&str>, || {
        assert!(
            SecdistOptions::new().load_dotenv().is_ok(),
            "Missing .env file should be silently ignored"
        );
    });
}

#[test]
#[serial]
fn test_valid_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "_SECDIST_DOTENV_PROBE=1\n").unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("_SECDIST_DOTENV_PROBE", None::<&str>),
        ],
        || {
            assert!(SecdistOptions::new().load_dotenv().is_ok());
            assert_eq!(std::env::var("_SECDIST_DOTENV_PROBE").as_deref(), Ok("1"));
        },
    );
}

#[test]
#[serial]
fn test_invalid_dotenv_returns_parse_error_without_secret() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    let secret_value = "supersecret_token_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("_SECDIST_DOTENV_SECRET={secret_value}\n{INVALID_DOTENV}"),
    )
    .unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("_SECDIST_DOTENV_SECRET", None::<&str>),
        ],
        || match SecdistOptions::new().load_dotenv() {
            Err(e @ SecdistError::DotenvParse { .. }) => {
                let message = e.to_string();
                assert!(!message.contains(secret_value), "leaked secret: {message}");
                assert!(message.contains("DOTENV_DISABLED"));
            }
            Err(other) => panic!("Invalid .env should return DotenvParse error, got {other}"),
            Ok(_) => panic!("Invalid .env should return DotenvParse error, got Ok"),
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), INVALID_DOTENV).unwrap();

    for value in ["1", "true"] {
        temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            assert!(
                SecdistOptions::new().load_dotenv().is_ok(),
                "DOTENV_DISABLED={value} should skip .env loading"
            );
        });
    }
}

#[test]
#[serial]
fn test_dotenv_disabled_false_still_loads() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), INVALID_DOTENV).unwrap();

    temp_env::with_var("DOTENV_DISABLED", Some("false"), || {
        assert!(matches!(
            SecdistOptions::new().load_dotenv(),
            Err(SecdistError::DotenvParse { .. })
        ));
    });
}
