//! Owned element tree.
//!
//! Scan roots are copied out of the parsed `dom_query` document into this
//! small tree so the extractor can walk materialized child lists by index.
//! Only elements and text survive the copy; comments, doctypes and
//! processing instructions are dropped.

/// A node in the owned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// The element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Text nodes consisting only of HTML whitespace.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(t) if is_blank(t))
    }
}

/// An element with a lowercase tag name, attributes in source order and its
/// child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Case-insensitive tag comparison.
    #[inline]
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// First attribute with the given name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Direct element children, skipping text.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        push_text(self, &mut out);
        out
    }
}

fn push_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(inner) => push_text(inner, out),
        }
    }
}

/// Whether `s` holds nothing but HTML whitespace (space, tab, LF, FF, CR).
///
/// U+00A0 is not whitespace here: `&nbsp;` is content.
#[inline]
#[must_use]
pub fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_whitespace())
}

/// Index of the next child after `from` that is not whitespace-only text.
#[must_use]
pub fn next_significant(children: &[Node], from: usize) -> Option<usize> {
    (from..children.len()).find(|&i| !children[i].is_blank_text())
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
