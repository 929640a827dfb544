//! Markdown renderer with pluggable render hooks.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd, html};

use crate::code_block::CodeBlock;
use crate::extensions::Extensions;
use crate::heading_ids::HeadingIds;
use crate::hook::{Direction, HookOutcome, Node, RenderHook, WalkStatus};

/// Markdown renderer with per-node hooks.
///
/// Parses with `pulldown-cmark`, optionally assigns heading IDs, then walks
/// the event stream once. Each node is offered to the registered hooks; nodes
/// no hook claims are passed through to [`html::push_html`].
///
/// # Render Hooks
///
/// Hooks are added via [`with_hook`](Self::with_hook) and consulted in order;
/// the first returning [`HookOutcome::Handled`] wins.
pub struct MarkdownRenderer {
    /// Parser extensions.
    extensions: Extensions,
    /// Whether to generate heading IDs.
    heading_ids: bool,
    /// Registered render hooks.
    hooks: Vec<Box<dyn RenderHook>>,
}

/// Open container on the walk stack.
struct Frame<'a> {
    tag: Tag<'a>,
    /// Index of the hook that claimed this node, if any.
    owner: Option<usize>,
}

impl MarkdownRenderer {
    /// Create a renderer with default extensions and heading IDs enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: Extensions::default(),
            heading_ids: true,
            hooks: Vec::new(),
        }
    }

    /// Set parser extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Enable or disable automatic heading IDs.
    #[must_use]
    pub fn with_heading_ids(mut self, enabled: bool) -> Self {
        self.heading_ids = enabled;
        self
    }

    /// Add a render hook.
    ///
    /// Hooks are checked in order when a node is encountered.
    /// The first hook returning a `Handled` outcome wins.
    #[must_use]
    pub fn with_hook<H: RenderHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Render a Markdown document to HTML.
    pub fn render(&mut self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.extensions.to_options());
        let events = if self.heading_ids {
            self.walk(HeadingIds::new(parser))
        } else {
            self.walk(parser)
        };

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        output
    }

    /// Walk the event stream, replacing claimed nodes with hook output.
    fn walk<'a, I>(&mut self, mut events: I) -> Vec<Event<'a>>
    where
        I: Iterator<Item = Event<'a>>,
    {
        let mut out = Vec::new();
        let mut stack: Vec<Frame<'a>> = Vec::new();
        // Nesting depth inside a node whose children are being skipped.
        let mut skip_depth = 0usize;

        while let Some(event) = events.next() {
            if skip_depth > 0 {
                match event {
                    Event::Start(_) => skip_depth += 1,
                    Event::End(_) if skip_depth > 1 => skip_depth -= 1,
                    Event::End(tag_end) => {
                        skip_depth = 0;
                        self.close(&mut stack, tag_end, &mut out);
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    self.code_block(kind, &mut events, &mut out);
                }
                Event::Start(tag) => {
                    let mut buffer = String::new();
                    let claimed = self.offer(&Node::Container(&tag), &mut buffer);
                    match claimed {
                        Some((index, status)) => {
                            push_raw(&mut out, buffer);
                            if status == WalkStatus::SkipChildren {
                                skip_depth = 1;
                            }
                            stack.push(Frame {
                                tag,
                                owner: Some(index),
                            });
                        }
                        None => {
                            out.push(Event::Start(tag.clone()));
                            stack.push(Frame { tag, owner: None });
                        }
                    }
                }
                Event::End(tag_end) => self.close(&mut stack, tag_end, &mut out),
                event => out.push(event),
            }
        }

        out
    }

    /// Collect a code block's content and render it through the hooks.
    fn code_block<'a, I>(
        &mut self,
        kind: CodeBlockKind<'a>,
        events: &mut I,
        out: &mut Vec<Event<'a>>,
    ) where
        I: Iterator<Item = Event<'a>>,
    {
        let mut texts: Vec<CowStr<'a>> = Vec::new();
        for event in events.by_ref() {
            match event {
                Event::End(TagEnd::CodeBlock) => break,
                Event::Text(text) => texts.push(text),
                _ => {}
            }
        }

        let info: &str = match &kind {
            CodeBlockKind::Fenced(info) => info,
            CodeBlockKind::Indented => "",
        };
        let content: String = texts.iter().map(|text| &**text).collect();
        let block = CodeBlock::new(info, &content);
        let node = Node::CodeBlock(&block);

        let mut buffer = String::new();
        if let Some((index, _)) = self.offer(&node, &mut buffer) {
            self.hooks[index].render(&node, Direction::Exiting, &mut buffer);
            push_raw(out, buffer);
            return;
        }

        tracing::trace!(language = block.language(), "Code block left to default renderer");
        out.push(Event::Start(Tag::CodeBlock(kind)));
        out.extend(texts.into_iter().map(Event::Text));
        out.push(Event::End(TagEnd::CodeBlock));
    }

    /// Offer a node's entry visit to the hooks.
    ///
    /// Returns the index of the claiming hook and its walk status.
    fn offer(
        &mut self,
        node: &Node<'_, '_>,
        buffer: &mut String,
    ) -> Option<(usize, WalkStatus)> {
        let kind = node.kind();
        for (index, hook) in self.hooks.iter_mut().enumerate() {
            if !hook.handles(kind) {
                continue;
            }
            match hook.render(node, Direction::Entering, buffer) {
                HookOutcome::Handled(status) => {
                    tracing::debug!(?kind, hook = index, ?status, "Node handled by render hook");
                    return Some((index, status));
                }
                HookOutcome::Fallback => buffer.clear(),
            }
        }
        None
    }

    /// Close the innermost open container.
    fn close<'a>(
        &mut self,
        stack: &mut Vec<Frame<'a>>,
        tag_end: TagEnd,
        out: &mut Vec<Event<'a>>,
    ) {
        match stack.pop() {
            Some(Frame {
                tag,
                owner: Some(index),
            }) => {
                let mut buffer = String::new();
                self.hooks[index].render(&Node::Container(&tag), Direction::Exiting, &mut buffer);
                push_raw(out, buffer);
            }
            Some(Frame { owner: None, .. }) | None => out.push(Event::End(tag_end)),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Append hook output as a raw HTML event.
fn push_raw<'a>(out: &mut Vec<Event<'a>>, html: String) {
    if !html.is_empty() {
        out.push(Event::Html(CowStr::from(html)));
    }
}
