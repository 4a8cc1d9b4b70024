//! Markup loader
//!
//! Reads the edit area's markup (`<div>hello <span class="bold-text">x</span></div>`)
//! into a [`DocumentTree`]. The reader is lenient the way browser markup
//! needs: `<br>` does not have to be closed, mismatched end tags close the
//! nearest matching open element, and `&nbsp;` is accepted.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::config::ClassNames;
use crate::errors::{EditorError, Result};
use crate::models::{DocumentTree, Element, NodeId, Tag};

impl DocumentTree {
    /// Build a tree from markup
    ///
    /// A single top-level element becomes the root; anything else is placed
    /// under a fresh `div` root.
    pub fn from_markup(markup: &str, classes: &ClassNames) -> Result<Self> {
        let mut tree = DocumentTree::default();
        let scratch = tree.root();
        let top_level = parse_fragment_into(&mut tree, scratch, markup, classes)?;

        let elements: Vec<NodeId> = top_level
            .iter()
            .copied()
            .filter(|node| !tree.text(*node).is_some_and(|t| t.trim().is_empty()))
            .collect();
        if let [single] = elements.as_slice() {
            if tree.is_element(*single) && !tree.element(*single).is_some_and(|e| e.tag.is_void()) {
                tree.set_root(*single);
            }
        }

        let root = tree.root();
        tree.normalize_text(root, &mut []);
        log::debug!("parsed markup into {} node(s)", tree.attached_count());
        Ok(tree)
    }
}

/// Parse `markup` and append the resulting nodes to `parent`
///
/// Returns the top-level nodes that were appended.
pub fn parse_fragment_into(
    tree: &mut DocumentTree,
    parent: NodeId,
    markup: &str,
    classes: &ClassNames,
) -> Result<Vec<NodeId>> {
    let mut reader = Reader::from_str(markup);
    reader.trim_text(false);
    reader.check_end_names(false);

    let mut stack: Vec<NodeId> = vec![parent];
    let mut top_level = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            EditorError::Markup(format!("{} at position {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(ref e) => {
                let element = element_from_start(e, classes)?;
                let is_void = element.tag.is_void();
                let node = tree.create_element(element);
                attach(tree, &stack, &mut top_level, node);
                if !is_void {
                    stack.push(node);
                }
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e, classes)?;
                let node = tree.create_element(element);
                attach(tree, &stack, &mut top_level, node);
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                close_element(tree, &mut stack, &name);
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape_with(resolve_entity)
                    .map_err(|e| EditorError::Markup(e.to_string()))?;
                push_text(tree, &stack, &mut top_level, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(tree, &stack, &mut top_level, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        log::warn!("markup ended with {} unclosed element(s)", stack.len() - 1);
    }
    Ok(top_level)
}

fn element_from_start(start: &BytesStart<'_>, classes: &ClassNames) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(Tag::from_name(&name));

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| EditorError::Markup(e.to_string()))?;
        if attribute.key.as_ref() != b"class" {
            continue;
        }
        let value = attribute
            .unescape_value()
            .map_err(|e| EditorError::Markup(e.to_string()))?;
        for class in value.split_whitespace() {
            match classes.token_for(class) {
                Some(token) => element.add_token(token),
                None => log::warn!("ignoring unknown class '{}' on <{}>", class, name),
            }
        }
    }

    Ok(element)
}

fn attach(tree: &mut DocumentTree, stack: &[NodeId], top_level: &mut Vec<NodeId>, node: NodeId) {
    let Some(parent) = stack.last().copied() else {
        return;
    };
    tree.append_child(parent, node);
    if stack.len() == 1 {
        top_level.push(node);
    }
}

fn push_text(tree: &mut DocumentTree, stack: &[NodeId], top_level: &mut Vec<NodeId>, text: &str) {
    if text.is_empty() {
        return;
    }
    let node = tree.create_text(text);
    attach(tree, stack, top_level, node);
}

/// Close the innermost open element named `name`, if any
fn close_element(tree: &DocumentTree, stack: &mut Vec<NodeId>, name: &str) {
    let position = stack
        .iter()
        .skip(1)
        .rposition(|node| tree.element(*node).is_some_and(|e| e.tag.name() == name));
    match position {
        Some(index) => stack.truncate(index + 1),
        None => log::debug!("ignoring stray end tag </{}>", name),
    }
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "nbsp" => Some("\u{a0}"),
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        _ => None,
    }
}
