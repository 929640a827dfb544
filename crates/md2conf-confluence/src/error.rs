//! Error types for Confluence rendering.

/// Error building a [`LanguageMap`](crate::LanguageMap) from user aliases.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LanguageError {
    /// Alias target is not one of the canonical syntax names.
    #[error("alias {alias:?} targets unknown syntax {target:?}")]
    UnknownSyntax {
        /// Alias as written in configuration.
        alias: String,
        /// Requested canonical name.
        target: String,
    },

    /// Alias key is the empty string.
    #[error("language alias cannot be empty")]
    EmptyAlias,
}
