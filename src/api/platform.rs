//! Bridge between the browser DOM and the document tree
//!
//! The edit area's DOM is captured into a [`DocumentTree`] before every
//! operation, remembering which DOM node became which tree node so the
//! platform selection can be translated. After the operation the edit area
//! is re-rendered from the tree, which makes DOM child indices equal tree
//! child indices again; the selection is restored by path.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::clipboard::{CascadeStyleResolver, ComputedStyle, StyleProperty, StyleResolver};
use crate::config::ClassNames;
use crate::errors::{EditorError, Result};
use crate::models::{DocumentTree, Element, NodeId, Tag};
use crate::selection::{BoundaryPoint, Selection, SelectionSource, SelectionSourceKind};
use crate::utils::{char_to_utf16_offset, utf16_to_char_offset};

use super::helpers::platform_error;

// ============================================================================
// DOM capture
// ============================================================================

/// DOM nodes paired with the tree nodes captured from them
pub struct DomMap {
    nodes: Vec<(web_sys::Node, NodeId)>,
}

impl DomMap {
    fn dom_node(&self, id: NodeId) -> Option<&web_sys::Node> {
        self.nodes
            .iter()
            .find(|(_, candidate)| *candidate == id)
            .map(|(node, _)| node)
    }

    fn tree_node(&self, dom: &web_sys::Node) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(candidate, _)| candidate.is_same_node(Some(dom)))
            .map(|(_, id)| *id)
    }

    /// Translate a DOM boundary (UTF-16 offsets) into a tree boundary
    pub fn point_from_dom(
        &self,
        tree: &DocumentTree,
        dom: &web_sys::Node,
        offset: u32,
    ) -> Option<BoundaryPoint> {
        let id = self.tree_node(dom)?;
        let offset = offset as usize;

        let offset = match tree.text(id) {
            Some(text) => utf16_to_char_offset(text, offset),
            // Skipped DOM children (comments, ...) have no tree counterpart
            None => {
                let children = dom.child_nodes();
                (0..offset.min(children.length() as usize))
                    .filter_map(|i| children.item(i as u32))
                    .filter(is_captured)
                    .count()
            }
        };
        Some(BoundaryPoint::new(id, offset))
    }

    /// Translate a platform selection; None if it lies outside the edit area
    pub fn selection_from_dom(
        &self,
        tree: &DocumentTree,
        selection: &web_sys::Selection,
    ) -> Option<Selection> {
        let anchor = self.point_from_dom(tree, &selection.anchor_node()?, selection.anchor_offset())?;
        let focus = self.point_from_dom(tree, &selection.focus_node()?, selection.focus_offset())?;
        Some(Selection::new(anchor, focus))
    }
}

fn is_captured(node: &web_sys::Node) -> bool {
    matches!(
        node.node_type(),
        web_sys::Node::ELEMENT_NODE | web_sys::Node::TEXT_NODE
    )
}

/// Read the edit area's DOM into a tree rooted at the edit area itself
pub fn capture(edit_area: &web_sys::HtmlElement, classes: &ClassNames) -> (DocumentTree, DomMap) {
    let area: &web_sys::Node = edit_area.as_ref();
    let tag = Tag::from_name(&edit_area.tag_name());
    let mut tree = DocumentTree::new(tag);
    let root = tree.root();
    let mut map = DomMap {
        nodes: vec![(area.clone(), root)],
    };

    capture_children(&mut tree, &mut map, area, root, classes);
    log::debug!("captured {} DOM node(s)", map.nodes.len());
    (tree, map)
}

fn capture_children(
    tree: &mut DocumentTree,
    map: &mut DomMap,
    dom: &web_sys::Node,
    parent: NodeId,
    classes: &ClassNames,
) {
    let children = dom.child_nodes();
    for index in 0..children.length() {
        let Some(child) = children.item(index) else {
            continue;
        };

        let id = match child.node_type() {
            web_sys::Node::TEXT_NODE => tree.create_text(child.node_value().unwrap_or_default()),
            web_sys::Node::ELEMENT_NODE => {
                let Some(element) = child.dyn_ref::<web_sys::Element>() else {
                    continue;
                };
                tree.create_element(element_from_dom(element, classes))
            }
            _ => continue,
        };

        tree.append_child(parent, id);
        map.nodes.push((child.clone(), id));
        if tree.is_element(id) {
            capture_children(tree, map, &child, id, classes);
        }
    }
}

fn element_from_dom(dom: &web_sys::Element, classes: &ClassNames) -> Element {
    let mut element = Element::new(Tag::from_name(&dom.tag_name()));
    for class in dom.class_name().split_whitespace() {
        match classes.token_for(class) {
            Some(token) => element.add_token(token),
            None => log::debug!("ignoring unknown class '{}'", class),
        }
    }
    element
}

// ============================================================================
// Selection restore
// ============================================================================

/// DOM position for a tree boundary, valid right after a re-render
pub fn dom_point(
    edit_area: &web_sys::HtmlElement,
    tree: &DocumentTree,
    point: BoundaryPoint,
) -> Option<(web_sys::Node, u32)> {
    let area: &web_sys::Node = edit_area.as_ref();
    let mut dom = area.clone();
    for index in tree.path(point.node) {
        dom = dom.child_nodes().item(index as u32)?;
    }

    let offset = match tree.text(point.node) {
        Some(text) => char_to_utf16_offset(text, point.offset),
        None => point.offset,
    };
    Some((dom, offset as u32))
}

/// Point the platform selection at `selection`
pub fn restore_selection(
    edit_area: &web_sys::HtmlElement,
    tree: &DocumentTree,
    selection: &Selection,
) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| EditorError::Platform("no window".to_string()))?;
    let platform = window
        .get_selection()
        .map_err(|e| platform_error("getSelection", e))?
        .ok_or(EditorError::NoSelection)?;

    let (anchor, anchor_offset) = dom_point(edit_area, tree, selection.anchor)
        .ok_or(EditorError::NodeNotFound(selection.anchor.node))?;
    let (focus, focus_offset) = dom_point(edit_area, tree, selection.focus)
        .ok_or(EditorError::NodeNotFound(selection.focus.node))?;

    platform
        .set_base_and_extent(&anchor, anchor_offset, &focus, focus_offset)
        .map_err(|e| platform_error("setBaseAndExtent", e))
}

// ============================================================================
// Selection sources
// ============================================================================

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// `window.getSelection()`
pub struct WindowSelectionSource<'a> {
    pub tree: &'a DocumentTree,
    pub map: &'a DomMap,
}

impl SelectionSource for WindowSelectionSource<'_> {
    fn kind(&self) -> SelectionSourceKind {
        SelectionSourceKind::Window
    }

    fn is_available(&self) -> bool {
        web_sys::window().is_some_and(|w| has_property(w.as_ref(), "getSelection"))
    }

    fn current_selection(&self) -> Option<Selection> {
        let platform = web_sys::window()?.get_selection().ok()??;
        self.map.selection_from_dom(self.tree, &platform)
    }
}

/// `document.getSelection()`
pub struct DocumentSelectionSource<'a> {
    pub tree: &'a DocumentTree,
    pub map: &'a DomMap,
}

impl SelectionSource for DocumentSelectionSource<'_> {
    fn kind(&self) -> SelectionSourceKind {
        SelectionSourceKind::Document
    }

    fn is_available(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .is_some_and(|d| has_property(d.as_ref(), "getSelection"))
    }

    fn current_selection(&self) -> Option<Selection> {
        let platform = web_sys::window()?.document()?.get_selection().ok()??;
        self.map.selection_from_dom(self.tree, &platform)
    }
}

/// Legacy `document.selection` text ranges
///
/// These carry no boundary nodes, so a usable selection can never be read
/// from them. When this is the best source the platform offers, styling is a
/// no-op.
pub struct LegacyTextRangeSource;

impl SelectionSource for LegacyTextRangeSource {
    fn kind(&self) -> SelectionSourceKind {
        SelectionSourceKind::LegacyTextRange
    }

    fn is_available(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .is_some_and(|d| has_property(d.as_ref(), "selection"))
    }

    fn current_selection(&self) -> Option<Selection> {
        log::warn!("legacy text-range selection cannot be mapped onto the document");
        None
    }
}

// ============================================================================
// Rendered styles
// ============================================================================

/// Styles as the browser currently renders the captured DOM
///
/// Nodes without a DOM counterpart (or a window to ask) fall back to the
/// stylesheet cascade, property by property.
pub struct DomStyleResolver<'a> {
    map: &'a DomMap,
    fallback: CascadeStyleResolver,
}

impl<'a> DomStyleResolver<'a> {
    pub fn new(map: &'a DomMap, fallback: CascadeStyleResolver) -> Self {
        Self { map, fallback }
    }

    fn rendered(&self, node: NodeId) -> Option<web_sys::CssStyleDeclaration> {
        let element = self.map.dom_node(node)?.dyn_ref::<web_sys::Element>()?;
        web_sys::window()?.get_computed_style(element).ok()?
    }
}

impl StyleResolver for DomStyleResolver<'_> {
    fn computed_style(&self, tree: &DocumentTree, node: NodeId) -> ComputedStyle {
        let mut style = self.fallback.computed_style(tree, node);
        let Some(rendered) = self.rendered(node) else {
            log::debug!("no rendered style for {}, using stylesheet", node);
            return style;
        };

        for property in StyleProperty::ALL {
            match rendered.get_property_value(property.css_name()) {
                Ok(value) if !value.is_empty() => style.set(property, value),
                _ => log::debug!("{} has no rendered {}", node, property),
            }
        }
        style
    }
}
