//! Code block nodes rebuilt from the parser's event stream.
//!
//! `pulldown-cmark` reports a code block as a start tag, a run of text events
//! and an end tag. The renderer collects that run into a single [`CodeBlock`]
//! so hooks see the whole block at once, the way a tree-based engine would
//! hand over a leaf node.

use std::collections::HashMap;

/// A fenced or indented code block.
///
/// Owned by the renderer for the duration of one hook call; hooks only read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    info: String,
    language: String,
    attrs: HashMap<String, String>,
    literal: String,
}

impl CodeBlock {
    /// Build a code block from its fence info string and raw content.
    ///
    /// The final line terminator of `content` is dropped: the parser always
    /// ends fenced content with a newline, which is not part of the code.
    #[must_use]
    pub fn new(info: &str, content: &str) -> Self {
        let (language, attrs) = parse_fence_info(info);
        let literal = content
            .strip_suffix("\r\n")
            .or_else(|| content.strip_suffix('\n'))
            .unwrap_or(content);

        Self {
            info: info.to_owned(),
            language,
            attrs,
            literal: literal.to_owned(),
        }
    }

    /// Full fence info string as written after the opening fence.
    ///
    /// Empty for indented code blocks and bare fences.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// First word of the info string (e.g. `rust` for `rust title=main.rs`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Attributes parsed from the info string (`key=value` pairs).
    #[must_use]
    pub fn attrs(&self) -> &HashMap<String, String> {
        &self.attrs
    }

    /// Look up a single fence attribute.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Raw code text, without the trailing line terminator.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
#[must_use]
pub fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            // Strip quotes if present
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, attrs) = parse_fence_info("rust");
        assert_eq!(lang, "rust");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_with_attrs() {
        let (lang, attrs) = parse_fence_info("erlang title=Demo linenumbers=true");
        assert_eq!(lang, "erlang");
        assert_eq!(attrs.get("title"), Some(&"Demo".to_owned()));
        assert_eq!(attrs.get("linenumbers"), Some(&"true".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_quoted_values() {
        let (lang, attrs) = parse_fence_info("sql title='Report'");
        assert_eq!(lang, "sql");
        assert_eq!(attrs.get("title"), Some(&"Report".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_ignores_bare_words() {
        let (lang, attrs) = parse_fence_info("plain text");
        assert_eq!(lang, "plain");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_empty() {
        let (lang, attrs) = parse_fence_info("   ");
        assert_eq!(lang, "");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_code_block_strips_final_newline_only() {
        let block = CodeBlock::new("erlang", "code block\n");
        assert_eq!(block.literal(), "code block");

        let block = CodeBlock::new("erlang", "line one\n\n");
        assert_eq!(block.literal(), "line one\n");

        let block = CodeBlock::new("", "crlf\r\n");
        assert_eq!(block.literal(), "crlf");
    }

    #[test]
    fn test_code_block_accessors() {
        let block = CodeBlock::new("python title=main.py", "print(1)\n");
        assert_eq!(block.info(), "python title=main.py");
        assert_eq!(block.language(), "python");
        assert_eq!(block.attr("title"), Some("main.py"));
        assert_eq!(block.attr("theme"), None);
        assert_eq!(block.attrs().len(), 1);
    }

    #[test]
    fn test_code_block_without_info() {
        let block = CodeBlock::new("", "indented\n");
        assert_eq!(block.info(), "");
        assert_eq!(block.language(), "");
        assert_eq!(block.literal(), "indented");
    }
}
