//! Confluence storage-format rendering for md2conf.
//!
//! Builds on the hook-based renderer from `md2conf-renderer`:
//!
//! - [`CodeMacroHook`] turns code blocks into the `code` structured macro
//!   with a normalized language parameter
//! - [`ExternalLinkHook`] opens non-relative links in a new tab
//! - [`normalize_language`] and [`LanguageMap`] map fence languages to the
//!   names the Confluence highlighter understands
//!
//! Everything else is rendered as plain HTML by `pulldown-cmark`.
//!
//! # Example
//!
//! ```
//! let html = md2conf_confluence::convert("```sh\nls\n```");
//! assert!(html.contains(r#"<ac:parameter ac:name="language">bash</ac:parameter>"#));
//! ```

mod code_macro;
mod error;
mod language;
mod links;

pub use code_macro::{CodeMacroHook, escape_cdata, write_code_macro};
pub use error::LanguageError;
pub use language::{LanguageMap, SyntaxName, builtin_aliases, normalize_language};
pub use links::ExternalLinkHook;
pub use md2conf_renderer::Extensions;

use md2conf_renderer::MarkdownRenderer;

/// Built-in sample document: a heading, a paragraph and an Erlang code block.
pub const SAMPLE_DOCUMENT: &str = "# Heading\nParagraph text\n\n```erlang\ncode block\n```";

/// Options for building a storage-format renderer.
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Parser extensions.
    pub extensions: Extensions,
    /// Generate `id` attributes for headings.
    pub heading_ids: bool,
    /// Add `target="_blank"` to non-relative links.
    pub external_links_new_tab: bool,
    /// Language aliases for the code macro.
    pub languages: LanguageMap,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            extensions: Extensions::default(),
            heading_ids: true,
            external_links_new_tab: true,
            languages: LanguageMap::new(),
        }
    }
}

/// Build a renderer producing Confluence storage format.
#[must_use]
pub fn storage_format_renderer(options: ConverterOptions) -> MarkdownRenderer {
    let renderer = MarkdownRenderer::new()
        .with_extensions(options.extensions)
        .with_heading_ids(options.heading_ids)
        .with_hook(CodeMacroHook::new(options.languages));

    if options.external_links_new_tab {
        renderer.with_hook(ExternalLinkHook)
    } else {
        renderer
    }
}

/// Convert Markdown to Confluence storage format with default options.
#[must_use]
pub fn convert(markdown: &str) -> String {
    storage_format_renderer(ConverterOptions::default()).render(markdown)
}
