//! Confluence code macro for code blocks.
//!
//! Replaces the default `<pre><code>` rendering with the storage-format
//! `code` structured macro:
//!
//! ```text
//! <ac:structured-macro ac:name="code" ac:schema-version="1">
//! <ac:parameter ac:name="language">erl</ac:parameter>
//! <ac:plain-text-body><![CDATA[code block]]></ac:plain-text-body>
//! </ac:structured-macro>
//! ```

use std::borrow::Cow;

use md2conf_renderer::{
    CodeBlock, Direction, HookOutcome, Node, NodeKind, RenderHook, WalkStatus, escape_html,
};

use crate::language::{LanguageMap, SyntaxName};

/// Fence attributes forwarded as macro parameters, in output order.
const OPTIONAL_PARAMETERS: [&str; 5] = ["title", "theme", "linenumbers", "firstline", "collapse"];

/// Render hook emitting the Confluence code macro for every code block.
#[derive(Debug, Clone, Default)]
pub struct CodeMacroHook {
    languages: LanguageMap,
}

impl CodeMacroHook {
    /// Create a hook using the given language aliases.
    #[must_use]
    pub fn new(languages: LanguageMap) -> Self {
        Self { languages }
    }
}

impl RenderHook for CodeMacroHook {
    fn handles(&self, kind: NodeKind) -> bool {
        kind == NodeKind::CodeBlock
    }

    fn render(
        &mut self,
        node: &Node<'_, '_>,
        direction: Direction,
        out: &mut String,
    ) -> HookOutcome {
        let Node::CodeBlock(block) = node else {
            return HookOutcome::Fallback;
        };

        // The macro is self-contained; nothing to close on exit.
        if direction.is_entering() {
            let language = self.languages.resolve_block(block);
            tracing::debug!(
                info = block.info(),
                language = language.as_str(),
                "Rendering code macro"
            );
            write_code_macro(language, block, out);
        }

        HookOutcome::Handled(WalkStatus::SkipChildren)
    }
}

/// Write the code macro for a block with an already resolved language.
pub fn write_code_macro(language: SyntaxName, block: &CodeBlock, out: &mut String) {
    out.push_str(r#"<ac:structured-macro ac:name="code" ac:schema-version="1">"#);
    out.push('\n');
    push_parameter("language", language.as_str(), out);

    for name in OPTIONAL_PARAMETERS {
        if let Some(value) = block.attr(name) {
            push_parameter(name, value, out);
        }
    }
    for key in block.attrs().keys() {
        if !OPTIONAL_PARAMETERS.contains(&key.as_str()) {
            tracing::debug!(attribute = %key, "Ignoring unsupported code fence attribute");
        }
    }

    // CDATA content is not escaped
    out.push_str("<ac:plain-text-body><![CDATA[");
    out.push_str(&escape_cdata(block.literal()));
    out.push_str("]]></ac:plain-text-body>");
    out.push('\n');
    out.push_str("</ac:structured-macro>");
}

fn push_parameter(name: &str, value: &str, out: &mut String) {
    out.push_str(r#"<ac:parameter ac:name=""#);
    out.push_str(name);
    out.push_str(r#"">"#);
    out.push_str(&escape_html(value));
    out.push_str("</ac:parameter>");
    out.push('\n');
}

/// Make text safe for a CDATA section.
///
/// A literal `]]>` would end the section early, so it is split across two
/// sections: `]]` closes the first, `>` opens the second.
#[must_use]
pub fn escape_cdata(text: &str) -> Cow<'_, str> {
    if text.contains("]]>") {
        Cow::Owned(text.replace("]]>", "]]]]><![CDATA[>"))
    } else {
        Cow::Borrowed(text)
    }
}
