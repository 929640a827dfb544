//! Markdown syntax extensions enabled on the parser.

use pulldown_cmark::Options;

/// Parser extension toggles.
///
/// The default set mirrors what wiki authors expect from "common" Markdown:
/// tables, strikethrough, task lists, explicit heading attributes, definition
/// lists and smart punctuation. Footnotes are opt-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Extensions {
    /// GitHub-style pipe tables.
    pub tables: bool,
    /// `~~deleted~~` text.
    pub strikethrough: bool,
    /// `- [ ]` / `- [x]` list items.
    pub tasklists: bool,
    /// `[^1]` footnote references and definitions.
    pub footnotes: bool,
    /// Curly quotes, en/em dashes and ellipses.
    pub smart_punctuation: bool,
    /// `# Heading {#id .class}` attribute blocks.
    pub heading_attributes: bool,
    /// `Term\n: Definition` lists.
    pub definition_lists: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: false,
            smart_punctuation: true,
            heading_attributes: true,
            definition_lists: true,
        }
    }
}

impl Extensions {
    /// Plain CommonMark with every extension disabled.
    #[must_use]
    pub fn none() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            tasklists: false,
            footnotes: false,
            smart_punctuation: false,
            heading_attributes: false,
            definition_lists: false,
        }
    }

    /// Convert to `pulldown-cmark` parser options.
    #[must_use]
    pub fn to_options(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options.set(Options::ENABLE_HEADING_ATTRIBUTES, self.heading_attributes);
        options.set(Options::ENABLE_DEFINITION_LIST, self.definition_lists);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Extensions::default().to_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_SMART_PUNCTUATION));
        assert!(options.contains(Options::ENABLE_HEADING_ATTRIBUTES));
        assert!(options.contains(Options::ENABLE_DEFINITION_LIST));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));
    }

    #[test]
    fn test_none_is_empty() {
        assert_eq!(Extensions::none().to_options(), Options::empty());
    }

    #[test]
    fn test_footnotes_opt_in() {
        let extensions = Extensions {
            footnotes: true,
            ..Extensions::none()
        };
        assert_eq!(extensions.to_options(), Options::ENABLE_FOOTNOTES);
    }
}
