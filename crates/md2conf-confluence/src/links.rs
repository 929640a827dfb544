//! External links open in a new tab.

use md2conf_renderer::{Direction, HookOutcome, Node, NodeKind, RenderHook, WalkStatus};
use pulldown_cmark::{LinkType, Tag};
use pulldown_cmark_escape::{escape_href, escape_html};

/// Render hook adding `target="_blank"` to every non-relative link.
///
/// Anchors (`#top`), root-relative paths (`/docs`) and `./`/`../` paths fall
/// back to default rendering. Anything else, bare file names and `mailto:`
/// included, opens in a new tab. The `href` and `title` are escaped exactly as
/// `pulldown_cmark::html` escapes them, and the link text is still rendered by
/// the default renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalLinkHook;

impl RenderHook for ExternalLinkHook {
    fn handles(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Link
    }

    fn render(
        &mut self,
        node: &Node<'_, '_>,
        direction: Direction,
        out: &mut String,
    ) -> HookOutcome {
        let Node::Container(Tag::Link {
            link_type,
            dest_url,
            title,
            ..
        }) = node
        else {
            return HookOutcome::Fallback;
        };
        let is_email = *link_type == LinkType::Email;
        if !is_email && is_relative(dest_url) {
            return HookOutcome::Fallback;
        }

        if direction.is_entering() {
            out.push_str(r#"<a href=""#);
            if is_email {
                out.push_str("mailto:");
            }
            // Writing into a String cannot fail.
            let _ = escape_href(&mut *out, dest_url);
            out.push('"');
            if !title.is_empty() {
                out.push_str(r#" title=""#);
                let _ = escape_html(&mut *out, title);
                out.push('"');
            }
            out.push_str(r#" target="_blank">"#);
        } else {
            out.push_str("</a>");
        }

        HookOutcome::Handled(WalkStatus::GoToNext)
    }
}

/// Whether a link destination points inside the current site.
fn is_relative(url: &str) -> bool {
    url.is_empty()
        || url.starts_with('#')
        || (url.starts_with('/') && !url.starts_with("//"))
        || url.starts_with("./")
        || url.starts_with("../")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::CowStr;

    use super::*;

    fn link(dest: &'static str, title: &'static str) -> Tag<'static> {
        Tag::Link {
            link_type: LinkType::Inline,
            dest_url: CowStr::Borrowed(dest),
            title: CowStr::Borrowed(title),
            id: CowStr::Borrowed(""),
        }
    }

    fn render(tag: &Tag<'_>, direction: Direction) -> (HookOutcome, String) {
        let mut out = String::new();
        let outcome = ExternalLinkHook.render(&Node::Container(tag), direction, &mut out);
        (outcome, out)
    }

    #[test]
    fn test_external_link() {
        let tag = link("https://example.com/?a=1&b=2", "");
        let (outcome, out) = render(&tag, Direction::Entering);
        assert_eq!(outcome, HookOutcome::Handled(WalkStatus::GoToNext));
        assert_eq!(
            out,
            r#"<a href="https://example.com/?a=1&amp;b=2" target="_blank">"#
        );

        let (_, out) = render(&tag, Direction::Exiting);
        assert_eq!(out, "</a>");
    }

    #[test]
    fn test_external_link_with_title() {
        let tag = link("http://example.com", "Example \"site\"");
        let (_, out) = render(&tag, Direction::Entering);
        assert_eq!(
            out,
            r#"<a href="http://example.com" title="Example &quot;site&quot;" target="_blank">"#
        );
    }

    #[test]
    fn test_non_http_absolute_links_open_in_new_tab() {
        for (dest, href) in [
            ("mailto:someone@example.com", "mailto:someone@example.com"),
            ("ftp://files.example.com/a.zip", "ftp://files.example.com/a.zip"),
            ("//cdn.example.com/x.js", "//cdn.example.com/x.js"),
            ("page.md", "page.md"),
        ] {
            let (outcome, out) = render(&link(dest, ""), Direction::Entering);
            assert_eq!(outcome, HookOutcome::Handled(WalkStatus::GoToNext), "dest {dest}");
            assert_eq!(out, format!(r#"<a href="{href}" target="_blank">"#));
        }
    }

    #[test]
    fn test_email_autolink_gets_mailto() {
        let tag = Tag::Link {
            link_type: LinkType::Email,
            dest_url: CowStr::Borrowed("someone@example.com"),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        };
        let (_, out) = render(&tag, Direction::Entering);
        assert_eq!(out, r#"<a href="mailto:someone@example.com" target="_blank">"#);
    }

    #[test]
    fn test_href_is_percent_encoded() {
        let (_, out) = render(&link("https://example.com/a b/ä", ""), Direction::Entering);
        assert_eq!(
            out,
            r#"<a href="https://example.com/a%20b/%C3%A4" target="_blank">"#
        );
    }

    #[test]
    fn test_relative_link_falls_back() {
        for dest in ["./page.md", "../up.md", "#anchor", "/root", "/", ""] {
            let (outcome, out) = render(&link(dest, ""), Direction::Entering);
            assert_eq!(outcome, HookOutcome::Fallback, "dest {dest}");
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_only_links_are_handled() {
        assert!(ExternalLinkHook.handles(NodeKind::Link));
        assert!(!ExternalLinkHook.handles(NodeKind::CodeBlock));
        assert!(!ExternalLinkHook.handles(NodeKind::Image));
    }
}
