//! CLI command implementations.

pub(crate) mod languages;
pub(crate) mod render;

pub(crate) use languages::LanguagesArgs;
pub(crate) use render::RenderArgs;

use md2conf_config::Config;
use md2conf_confluence::LanguageMap;

use crate::error::CliError;

/// Build the alias table from built-ins plus `[code.aliases]`.
pub(crate) fn language_map(config: &Config) -> Result<LanguageMap, CliError> {
    let map = LanguageMap::with_aliases(&config.code.aliases)?;
    tracing::debug!(custom = config.code.aliases.len(), "Loaded code aliases");
    Ok(map)
}
