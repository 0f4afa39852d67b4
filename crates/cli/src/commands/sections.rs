//! Sections command: list every section registered in this binary.

use anyhow::Result;
use std::io::Write;

use secdist::{RegisteredSection, Registry};

use crate::output::OutputFormat;

pub fn run(format: OutputFormat) -> Result<()> {
    let entries = Registry::global().entries();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let json: Vec<_> = entries
                .iter()
                .map(|entry| serde_json::json!({"slot": entry.index, "name": entry.name}))
                .collect();
            serde_json::to_writer_pretty(&mut out, &json)?;
            writeln!(out)?;
        }
        OutputFormat::Table => write_table(&entries, &mut out)?,
    }
    Ok(())
}

fn write_table(entries: &[RegisteredSection], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{:<6}SECTION", "SLOT")?;
    for entry in entries {
        writeln!(out, "{:<6}{}", entry.index, entry.name)?;
    }
    Ok(())
}
