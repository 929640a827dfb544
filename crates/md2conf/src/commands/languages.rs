//! `md2conf languages` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use md2conf_config::Config;
use md2conf_confluence::{LanguageMap, SyntaxName};

use super::language_map;
use crate::error::CliError;

/// Arguments for the languages command.
#[derive(Args)]
pub(crate) struct LanguagesArgs {
    /// Path to configuration file (default: auto-discover md2conf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only list the canonical syntax names.
    #[arg(long)]
    canonical: bool,
}

impl LanguagesArgs {
    /// Execute the languages command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let mut stdout = io::stdout().lock();
        if self.canonical {
            write_canonical(&mut stdout)?;
        } else {
            let config = Config::load(self.config.as_deref(), None)?;
            write_aliases(&mut stdout, &language_map(&config)?)?;
        }
        stdout.flush()?;
        Ok(())
    }
}

/// Write one `alias -> canonical` line per alias, sorted by alias.
fn write_aliases(out: &mut impl Write, languages: &LanguageMap) -> io::Result<()> {
    let aliases = languages.aliases();
    let width = aliases.iter().map(|(alias, _)| alias.len()).max().unwrap_or(0);
    for (alias, name) in aliases {
        writeln!(out, "{alias:<width$} -> {name}")?;
    }
    Ok(())
}

fn write_canonical(out: &mut impl Write) -> io::Result<()> {
    for name in SyntaxName::ALL {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
