//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not resolve secdist options (see `options` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "secdist")]
#[command(about = "Validate secdist credential documents against registered sections", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  secdist --config /etc/app/secdist.json check\n  secdist --missing-ok --env-key APP_SECRETS check -o json\n  secdist sections\n\nEnvironment:\n  SECDIST_CONFIG_PATH, SECDIST_MISSING_OK, SECDIST_ENVIRONMENT_SECRETS_KEY,\n  SECDIST_FORMAT and DOTENV_DISABLED are honored; flags take precedence.\n"
)]
pub struct Cli {
    /// Path to the secdist document.
    ///
    /// Can also be set via SECDIST_CONFIG_PATH environment variable.
    #[arg(short, long = "config", global = true, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Start from an empty document if the file is missing or unreadable.
    ///
    /// `--missing-ok` alone means true; `--missing-ok=false` overrides
    /// SECDIST_MISSING_OK=true.
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub missing_ok: Option<bool>,

    /// Name of the environment variable holding a JSON document to merge over the file
    #[arg(long, global = true, value_name = "VAR")]
    pub env_key: Option<String>,

    /// Syntax of the secdist file (json, yaml)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every registered section from the document and report the result
    Check,

    /// List registered sections without loading any document
    Sections,
}
