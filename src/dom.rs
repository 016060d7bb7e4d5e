//! DOM adapter.
//!
//! Parsing and CSS matching are delegated to `dom_query`. Matched nodes are
//! then copied into the owned [`tree`](crate::tree) representation that the
//! extractor and the title resolver walk.

use dom_query::{Document, Matcher, NodeId, NodeRef};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::tree::{Element, Node};

/// Nesting depth below a root beyond which markup is flattened to its text.
pub const MAX_TREE_DEPTH: usize = 256;

/// Parse an HTML string into a document.
///
/// Parsing never fails: malformed markup is repaired by html5ever's
/// error-tolerant tree builder.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Compile a selector group such as `.a, .b`.
pub fn compile_selector(group: &str) -> Result<Matcher> {
    if group.trim().is_empty() {
        return Err(Error::InvalidSelector(group.to_string()));
    }
    Matcher::new(group).map_err(|_| Error::InvalidSelector(group.to_string()))
}

/// Elements matching `matcher`, in document order, copied out of `doc`.
///
/// A match nested inside another match is dropped; its content is already
/// covered by the outer root.
#[must_use]
pub fn select_roots(doc: &Document, matcher: &Matcher) -> Vec<Element> {
    let selection = doc.select_matcher(matcher);
    let nodes = selection.nodes();
    let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();

    nodes
        .iter()
        .filter(|node| {
            let nested = has_ancestor_in(node, &ids);
            if nested {
                debug!("skipping selector root nested inside another root");
            }
            !nested
        })
        .map(materialize)
        .collect()
}

/// The `<html>` element of a parsed document.
#[must_use]
pub fn document_element(doc: &Document) -> Option<Element> {
    doc.select("html").nodes().first().map(materialize)
}

fn has_ancestor_in(node: &NodeRef, ids: &[NodeId]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if ids.contains(&parent.id) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Copy an element node and its descendants into an owned [`Element`].
#[must_use]
pub fn materialize(node: &NodeRef) -> Element {
    materialize_at(node, 0)
}

fn materialize_at(node: &NodeRef, depth: usize) -> Element {
    let tag = node.node_name().map(|t| t.to_string()).unwrap_or_default();
    let attrs = node
        .attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect();
    let mut el = Element {
        attrs,
        ..Element::new(&tag)
    };

    if depth >= MAX_TREE_DEPTH {
        warn!(tag = %el.tag, depth, "tree depth limit reached, flattening descendants to text");
        let text = node.text();
        if !text.is_empty() {
            el.children.push(Node::Text(text.to_string()));
        }
        return el;
    }

    for child in node.children() {
        if child.is_element() {
            el.children.push(Node::Element(materialize_at(&child, depth + 1)));
        } else if child.is_text() {
            el.children.push(Node::Text(child.text().to_string()));
        }
    }
    el
}
