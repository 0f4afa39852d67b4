//! secdist CLI - validate secdist documents against the registered sections.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Initialize logging on stderr.
//! - Run the selected command and translate failures into structured exit codes.
//!
//! Does NOT handle:
//! - Document loading or section construction (see the `secdist` crate).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide `SECDIST_*` values.
//! - Stdout carries command output only; logs and errors go to stderr.

mod args;
mod commands;
mod dispatch;
mod error;
mod options;
mod output;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use secdist::{SecdistOptions, UserPasswords};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so SECDIST_* values can come from it
    if let Err(e) = SecdistOptions::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Built-in sections also self-register at link time; this keeps them
    // present even when the linker drops the submission.
    secdist::register::<UserPasswords>();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
