//! Selection resolution across platform sources
//!
//! A host can expose its selection through several APIs of different age.
//! The resolver asks them in priority order and takes the answer of the
//! first one that is available at all, even if that answer is "nothing
//! selected". No source mutates anything.

use super::Selection;

/// Platform selection APIs, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionSourceKind {
    /// Selection owned by the window
    Window,
    /// Selection owned by the document
    Document,
    /// Legacy text-range selection
    LegacyTextRange,
}

/// One way of reading the current selection
pub trait SelectionSource {
    fn kind(&self) -> SelectionSourceKind;

    /// Whether the platform exposes this API at all
    fn is_available(&self) -> bool;

    /// The current selection, if this source has a usable one
    fn current_selection(&self) -> Option<Selection>;
}

/// Picks the current selection from the highest-priority available source
#[derive(Default)]
pub struct SelectionResolver<'a> {
    sources: Vec<&'a dyn SelectionSource>,
}

impl<'a> SelectionResolver<'a> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register a source; registration order does not matter
    pub fn with_source(mut self, source: &'a dyn SelectionSource) -> Self {
        self.sources.push(source);
        self.sources.sort_by_key(|s| s.kind());
        self
    }

    /// The current selection, or None if no source exposes one
    pub fn resolve(&self) -> Option<Selection> {
        let Some(source) = self.sources.iter().find(|s| s.is_available()) else {
            log::debug!("no selection source available");
            return None;
        };

        let selection = source.current_selection();
        log::debug!(
            "resolved selection from {:?}: {}",
            source.kind(),
            if selection.is_some() { "present" } else { "none" }
        );
        selection
    }
}

/// A source holding a fixed answer (headless hosts and tests)
#[derive(Debug, Clone)]
pub struct FixedSelection {
    pub kind: SelectionSourceKind,
    pub available: bool,
    pub selection: Option<Selection>,
}

impl FixedSelection {
    pub fn new(kind: SelectionSourceKind, selection: Option<Selection>) -> Self {
        Self {
            kind,
            available: true,
            selection,
        }
    }

    pub fn unavailable(kind: SelectionSourceKind) -> Self {
        Self {
            kind,
            available: false,
            selection: None,
        }
    }
}

impl SelectionSource for FixedSelection {
    fn kind(&self) -> SelectionSourceKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn current_selection(&self) -> Option<Selection> {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentTree;
    use crate::selection::BoundaryPoint;

    fn caret_at(offset: usize) -> Selection {
        let tree = DocumentTree::default();
        Selection::caret(BoundaryPoint::new(tree.root(), offset))
    }

    #[test]
    fn test_priority_ignores_registration_order() {
        let legacy = FixedSelection::new(SelectionSourceKind::LegacyTextRange, Some(caret_at(2)));
        let window = FixedSelection::new(SelectionSourceKind::Window, Some(caret_at(0)));
        let document = FixedSelection::new(SelectionSourceKind::Document, Some(caret_at(1)));

        let resolver = SelectionResolver::new()
            .with_source(&legacy)
            .with_source(&document)
            .with_source(&window);

        assert_eq!(resolver.resolve(), Some(caret_at(0)));
    }

    #[test]
    fn test_falls_through_unavailable_sources() {
        let window = FixedSelection::unavailable(SelectionSourceKind::Window);
        let document = FixedSelection::new(SelectionSourceKind::Document, Some(caret_at(1)));

        let resolver = SelectionResolver::new().with_source(&window).with_source(&document);
        assert_eq!(resolver.resolve(), Some(caret_at(1)));
    }

    #[test]
    fn test_available_source_without_selection_wins() {
        let window = FixedSelection::new(SelectionSourceKind::Window, None);
        let document = FixedSelection::new(SelectionSourceKind::Document, Some(caret_at(1)));

        let resolver = SelectionResolver::new().with_source(&document).with_source(&window);
        assert_eq!(resolver.resolve(), None);
    }

    #[test]
    fn test_no_sources() {
        assert_eq!(SelectionResolver::new().resolve(), None);
    }
}
