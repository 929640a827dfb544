//! Automatic heading IDs.
//!
//! `pulldown-cmark` only renders an `id` attribute when the source spells it
//! out (`# Title {#id}`). [`HeadingIds`] fills in the rest by slugifying the
//! heading text before the events reach the renderer.

use std::collections::{HashMap, HashSet, VecDeque};
use std::vec;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

/// Event adapter that assigns a unique slug ID to every heading without one.
///
/// Duplicate slugs get a numeric suffix (`faq`, `faq-1`, `faq-2`). Explicit
/// IDs are kept as written and reserved up front, so a generated ID never
/// repeats one, even when the explicit heading comes later in the document.
pub struct HeadingIds<'a> {
    inner: vec::IntoIter<Event<'a>>,
    /// Events of the heading currently being replayed.
    pending: VecDeque<Event<'a>>,
    /// IDs already in use, explicit ones included.
    taken: HashSet<String>,
    /// Next suffix to try per base slug.
    id_counts: HashMap<String, usize>,
}

impl<'a> HeadingIds<'a> {
    /// Wrap an event stream.
    ///
    /// The stream is buffered once to collect explicit heading IDs.
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let events: Vec<Event<'a>> = events.into_iter().collect();
        let taken = events
            .iter()
            .filter_map(|event| match event {
                Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
                _ => None,
            })
            .collect();

        Self {
            inner: events.into_iter(),
            pending: VecDeque::new(),
            taken,
            id_counts: HashMap::new(),
        }
    }

    /// Generate a unique ID for a heading, or `None` if the text has no slug.
    fn generate_id(&mut self, text: &str) -> Option<String> {
        let base_id = slugify(text);
        if base_id.is_empty() {
            return None;
        }
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = loop {
            let candidate = match *count {
                0 => base_id.clone(),
                n => format!("{base_id}-{n}"),
            };
            *count += 1;
            if !self.taken.contains(&candidate) {
                break candidate;
            }
        };
        self.taken.insert(id.clone());
        Some(id)
    }

    /// Buffer the rest of the current heading and return its plain text.
    fn buffer_heading(&mut self) -> String {
        let mut text = String::new();
        for event in self.inner.by_ref() {
            let is_end = matches!(event, Event::End(TagEnd::Heading(_)));
            if let Event::Text(content) | Event::Code(content) = &event {
                text.push_str(content);
            }
            self.pending.push_back(event);
            if is_end {
                break;
            }
        }
        text
    }
}

impl<'a> Iterator for HeadingIds<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                let text = self.buffer_heading();
                let id = self.generate_id(&text).map(CowStr::from);
                tracing::trace!(?level, id = ?id.as_deref(), "Assigned heading ID");
                Some(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }))
            }
            event => Some(event),
        }
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    // Remove trailing dash if present
    if result.ends_with('-') {
        result.pop();
    }

    result
}
