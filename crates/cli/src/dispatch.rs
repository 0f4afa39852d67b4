//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::options::resolve_options;
use crate::output::OutputFormat;

pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let format = OutputFormat::from_str(&cli.output)?;

    match cli.command {
        Commands::Check => {
            let options = resolve_options(&cli)?;
            commands::check::run(&options, format)?;
        }
        Commands::Sections => {
            commands::sections::run(format)?;
        }
    }

    Ok(())
}
