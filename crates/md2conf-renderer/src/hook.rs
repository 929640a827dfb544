//! Render hook trait for per-node output overrides.
//!
//! A hook is asked about every node the renderer walks. It either declines
//! ([`HookOutcome::Fallback`]), leaving the node to the default HTML renderer,
//! or claims it ([`HookOutcome::Handled`]) and writes its own markup.

use pulldown_cmark::Tag;

use crate::code_block::CodeBlock;

/// Traversal direction for a node visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Descending into the node, before its children.
    Entering,
    /// Leaving the node, after its children.
    Exiting,
}

impl Direction {
    /// Whether this is the descent visit.
    #[must_use]
    pub fn is_entering(self) -> bool {
        self == Self::Entering
    }
}

/// What the renderer should do with a handled node's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// Render the children with the default renderer, then visit the node
    /// again on exit.
    GoToNext,
    /// Drop the children; the hook's output replaces the whole node.
    SkipChildren,
}

/// Hook decision for a node visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    /// Not handled; use default rendering.
    Fallback,
    /// Handled by the hook; continue as directed.
    Handled(WalkStatus),
}

/// Coarse node classification used by [`RenderHook::handles`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CodeBlock,
    Heading,
    Paragraph,
    BlockQuote,
    List,
    Item,
    Table,
    Link,
    Image,
    /// Inline formatting: emphasis, strong, strikethrough, super/subscript.
    Inline,
    /// Anything else (HTML blocks, footnotes, definition lists, metadata).
    Other,
}

impl NodeKind {
    /// Classify a container tag.
    #[must_use]
    pub fn of_tag(tag: &Tag<'_>) -> Self {
        match tag {
            Tag::CodeBlock(_) => Self::CodeBlock,
            Tag::Heading { .. } => Self::Heading,
            Tag::Paragraph => Self::Paragraph,
            Tag::BlockQuote(_) => Self::BlockQuote,
            Tag::List(_) => Self::List,
            Tag::Item => Self::Item,
            Tag::Table(_) | Tag::TableHead | Tag::TableRow | Tag::TableCell => Self::Table,
            Tag::Link { .. } => Self::Link,
            Tag::Image { .. } => Self::Image,
            Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript => Self::Inline,
            Tag::HtmlBlock
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => Self::Other,
        }
    }
}

/// A node offered to a hook.
#[derive(Debug)]
pub enum Node<'n, 'a> {
    /// A complete code block (leaf node, content already collected).
    CodeBlock(&'n CodeBlock),
    /// Any other container node, identified by its start tag.
    Container(&'n Tag<'a>),
}

impl Node<'_, '_> {
    /// Classify this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::CodeBlock(_) => NodeKind::CodeBlock,
            Self::Container(tag) => NodeKind::of_tag(tag),
        }
    }
}

/// Per-node rendering override.
///
/// Hooks are consulted in registration order. The first hook that returns
/// [`HookOutcome::Handled`] on [`Direction::Entering`] owns the node and is
/// the only one called again on [`Direction::Exiting`].
pub trait RenderHook {
    /// Whether this hook wants to see nodes of the given kind at all.
    fn handles(&self, kind: NodeKind) -> bool;

    /// Render a node visit into `out`.
    ///
    /// Returning [`HookOutcome::Fallback`] on entry leaves the node to the
    /// next hook or the default renderer; anything written to `out` in that
    /// case is discarded. The return value of the exit visit is ignored.
    fn render(&mut self, node: &Node<'_, '_>, direction: Direction, out: &mut String)
    -> HookOutcome;
}
