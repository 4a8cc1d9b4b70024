//! Node payloads for the document tree
//!
//! Elements carry a tag, an optional heading level and an ordered set of
//! inline marks. Together the heading level and the marks form the element's
//! style-token set.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::StyleToken;

/// Heading level of an element (headings are mutually exclusive per node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    pub fn tag_name(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
        }
    }

    pub fn token(self) -> StyleToken {
        match self {
            HeadingLevel::H1 => StyleToken::Heading1,
            HeadingLevel::H2 => StyleToken::Heading2,
        }
    }
}

/// Inline, freely combinable style marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InlineMark {
    Bold,
    Italic,
}

impl InlineMark {
    pub fn token(self) -> StyleToken {
        match self {
            InlineMark::Bold => StyleToken::Bold,
            InlineMark::Italic => StyleToken::Italic,
        }
    }
}

/// Ordered set of inline marks
///
/// Insertion order is kept so rendered class lists stay stable across edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSet {
    marks: Vec<InlineMark>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn contains(&self, mark: InlineMark) -> bool {
        self.marks.contains(&mark)
    }

    /// Add a mark; returns false if it was already present
    pub fn insert(&mut self, mark: InlineMark) -> bool {
        if self.contains(mark) {
            return false;
        }
        self.marks.push(mark);
        true
    }

    /// Remove a mark; returns false if it was not present
    pub fn remove(&mut self, mark: InlineMark) -> bool {
        let before = self.marks.len();
        self.marks.retain(|m| *m != mark);
        self.marks.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = InlineMark> + '_ {
        self.marks.iter().copied()
    }
}

impl FromIterator<InlineMark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = InlineMark>>(iter: I) -> Self {
        let mut set = MarkSet::new();
        for mark in iter {
            set.insert(mark);
        }
        set
    }
}

/// Element tag identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Heading(HeadingLevel),
    /// Generic inline wrap
    Span,
    /// Generic block
    Div,
    Paragraph,
    LineBreak,
    Other(String),
}

impl Tag {
    /// Parse a tag name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Tag::Heading(HeadingLevel::H1),
            "h2" => Tag::Heading(HeadingLevel::H2),
            "span" => Tag::Span,
            "div" => Tag::Div,
            "p" => Tag::Paragraph,
            "br" => Tag::LineBreak,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Heading(level) => level.tag_name(),
            Tag::Span => "span",
            Tag::Div => "div",
            Tag::Paragraph => "p",
            Tag::LineBreak => "br",
            Tag::Other(name) => name,
        }
    }

    /// Synthetic wrap tags created by the wrapper (`span`, `h1`, `h2`)
    pub fn is_wrap(&self) -> bool {
        matches!(self, Tag::Span | Tag::Heading(_))
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, Tag::LineBreak)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Tag::Div | Tag::Paragraph)
    }

    /// Whether a style-less element with this tag may be collapsed to text
    pub fn is_flattenable(&self) -> bool {
        !self.is_line_break() && !self.is_block()
    }

    /// Void elements never have children
    pub fn is_void(&self) -> bool {
        self.is_line_break()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element payload: tag plus style tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: Tag,
    pub heading: Option<HeadingLevel>,
    pub marks: MarkSet,
}

impl Element {
    /// Create an element with no style tokens
    ///
    /// Heading tags imply their heading level.
    pub fn new(tag: Tag) -> Self {
        let heading = match tag {
            Tag::Heading(level) => Some(level),
            _ => None,
        };
        Self {
            tag,
            heading,
            marks: MarkSet::new(),
        }
    }

    /// Create the element the wrapper uses for a token
    pub fn for_token(token: StyleToken) -> Self {
        match token.heading_level() {
            Some(level) => Element::new(Tag::Heading(level)),
            None => {
                let mut element = Element::new(Tag::Span);
                element.add_token(token);
                element
            }
        }
    }

    pub fn has_token(&self, token: StyleToken) -> bool {
        match (token.heading_level(), token.mark()) {
            (Some(level), _) => self.heading == Some(level),
            (None, Some(mark)) => self.marks.contains(mark),
            (None, None) => false,
        }
    }

    /// Add a token; a heading token replaces any other heading level
    pub fn add_token(&mut self, token: StyleToken) {
        if let Some(level) = token.heading_level() {
            self.set_heading(level);
        } else if let Some(mark) = token.mark() {
            self.marks.insert(mark);
        }
    }

    /// Remove a token; returns false if the element did not carry it
    pub fn remove_token(&mut self, token: StyleToken) -> bool {
        if !self.has_token(token) {
            return false;
        }
        match token.mark() {
            Some(mark) => self.marks.remove(mark),
            None => {
                self.clear_heading();
                true
            }
        }
    }

    /// Atomically replace the heading level
    ///
    /// Synthetic wraps are retagged to the matching heading tag.
    pub fn set_heading(&mut self, level: HeadingLevel) {
        self.heading = Some(level);
        if self.tag.is_wrap() {
            self.tag = Tag::Heading(level);
        }
    }

    /// Drop the heading level; a heading tag falls back to a generic wrap
    pub fn clear_heading(&mut self) {
        self.heading = None;
        if matches!(self.tag, Tag::Heading(_)) {
            self.tag = Tag::Span;
        }
    }

    /// True when the style-token set is empty
    pub fn is_unstyled(&self) -> bool {
        self.heading.is_none() && self.marks.is_empty()
    }

    /// All tokens, heading first
    pub fn tokens(&self) -> Vec<StyleToken> {
        self.heading
            .map(HeadingLevel::token)
            .into_iter()
            .chain(self.marks.iter().map(InlineMark::token))
            .collect()
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_set_is_ordered_and_unique() {
        let mut set = MarkSet::new();
        assert!(set.insert(InlineMark::Italic));
        assert!(set.insert(InlineMark::Bold));
        assert!(!set.insert(InlineMark::Italic));

        let marks: Vec<_> = set.iter().collect();
        assert_eq!(marks, vec![InlineMark::Italic, InlineMark::Bold]);

        assert!(set.remove(InlineMark::Italic));
        assert!(!set.remove(InlineMark::Italic));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_heading_replaces_level_and_retags_wrap() {
        let mut element = Element::for_token(StyleToken::Bold);
        assert_eq!(element.tag, Tag::Span);

        element.add_token(StyleToken::Heading1);
        assert_eq!(element.tag, Tag::Heading(HeadingLevel::H1));

        element.add_token(StyleToken::Heading2);
        assert_eq!(element.heading, Some(HeadingLevel::H2));
        assert_eq!(element.tag, Tag::Heading(HeadingLevel::H2));
        assert!(element.has_token(StyleToken::Bold));
        assert!(!element.has_token(StyleToken::Heading1));

        assert!(element.remove_token(StyleToken::Heading2));
        assert_eq!(element.tag, Tag::Span);
        assert_eq!(element.tokens(), vec![StyleToken::Bold]);
    }

    #[test]
    fn test_heading_on_block_keeps_tag() {
        let mut element = Element::new(Tag::Paragraph);
        element.set_heading(HeadingLevel::H1);
        assert_eq!(element.tag, Tag::Paragraph);
        assert!(element.has_token(StyleToken::Heading1));
    }

    #[test]
    fn test_flattenable_tags() {
        assert!(Tag::Span.is_flattenable());
        assert!(Tag::Heading(HeadingLevel::H2).is_flattenable());
        assert!(!Tag::LineBreak.is_flattenable());
        assert!(!Tag::Div.is_flattenable());
        assert_eq!(Tag::from_name("EM"), Tag::Other("em".to_string()));
    }
}
