//! Check command: build the secdist config and report what was loaded.
//!
//! Responsibilities:
//! - Resolve the document and run every registered section factory against it.
//! - Report populated sections and a redacted summary of the document source.
//!
//! Does NOT handle:
//! - Printing secret values; only usernames and counts are reported.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use tracing::info;

use secdist::{SecdistConfig, SecdistOptions, UserPasswords};

use crate::output::OutputFormat;

/// Result of a successful check.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: Option<String>,
    pub missing_ok: bool,
    pub environment_secrets_key: Option<String>,
    pub format: String,
    pub sections: Vec<SectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub slot: usize,
    pub name: &'static str,
}

impl CheckReport {
    pub fn new(options: &SecdistOptions, config: &SecdistConfig) -> Self {
        Self {
            path: options.path().map(|path| path.display().to_string()),
            missing_ok: options.missing_ok(),
            environment_secrets_key: options.environment_secrets_key().map(str::to_string),
            format: options.format().to_string(),
            sections: config
                .sections()
                .map(|(slot, name)| SectionSummary { slot, name })
                .collect(),
            users: config
                .try_get::<UserPasswords>()
                .map(|passwords| passwords.usernames().map(str::to_string).collect()),
        }
    }

    fn write_table(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Secdist config OK ({} sections)", self.sections.len())?;
        writeln!(
            out,
            "Source: {}{}",
            self.path.as_deref().unwrap_or("<none>"),
            if self.missing_ok { " (missing ok)" } else { "" }
        )?;
        if let Some(key) = &self.environment_secrets_key {
            writeln!(out, "Environment document: ${key}")?;
        }
        writeln!(out)?;
        writeln!(out, "{:<6}SECTION", "SLOT")?;
        for section in &self.sections {
            writeln!(out, "{:<6}{}", section.slot, section.name)?;
        }
        if let Some(users) = &self.users {
            writeln!(out)?;
            writeln!(out, "Users: {}", users.len())?;
            for user in users {
                writeln!(out, "  {user}")?;
            }
        }
        Ok(())
    }
}

pub fn run(options: &SecdistOptions, format: OutputFormat) -> Result<()> {
    info!("Checking secdist config");

    let config = SecdistConfig::load(options).context("Failed to build secdist config")?;
    let report = CheckReport::new(options, &config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => report.write_table(&mut out)?,
    }
    Ok(())
}
