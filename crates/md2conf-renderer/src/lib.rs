//! Markdown renderer with per-node render hooks.
//!
//! This crate wraps `pulldown-cmark` and adds the extension point its HTML
//! renderer lacks: a [`RenderHook`] can claim any node during traversal and
//! write its own markup, while every declined node is rendered by
//! [`pulldown_cmark::html::push_html`] unchanged.
//!
//! # Architecture
//!
//! - [`HeadingIds`] assigns slug IDs to headings before traversal.
//! - [`MarkdownRenderer`] walks the event stream, rebuilds code blocks into
//!   [`CodeBlock`] nodes and offers each node to the registered hooks.
//! - Hook output is spliced back into the event stream as raw HTML, so the
//!   default renderer still owns whitespace and ordering.
//!
//! For Confluence storage format, use the `md2conf-confluence` crate.
//!
//! # Example
//!
//! ```
//! use md2conf_renderer::MarkdownRenderer;
//!
//! let html = MarkdownRenderer::new().render("# Hello\n\n**Bold** text");
//! assert_eq!(html, "<h1 id=\"hello\">Hello</h1>\n<p><strong>Bold</strong> text</p>\n");
//! ```

mod code_block;
mod extensions;
mod heading_ids;
mod hook;
mod renderer;
mod util;

pub use code_block::{CodeBlock, parse_fence_info};
pub use extensions::Extensions;
pub use heading_ids::{HeadingIds, slugify};
pub use hook::{Direction, HookOutcome, Node, NodeKind, RenderHook, WalkStatus};
pub use renderer::MarkdownRenderer;
pub use util::escape_html;
