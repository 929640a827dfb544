//! CLI error types.

use std::path::PathBuf;

use md2conf_config::ConfigError;
use md2conf_confluence::LanguageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Invalid code alias: {0}")]
    Language(#[from] LanguageError),

    #[error("Cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
