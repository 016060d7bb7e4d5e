//! Tag vocabularies used by the extractor and the serializer.
//!
//! Each list is provided both as an array (for iteration, ordering) and as a
//! `HashSet` (for O(1) lookup).

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists ===

/// Tags eligible to become a standalone content block.
pub static ALLOWED_TAGS: [&str; 10] = [
    "p", "blockquote", "ul", "ol", "li", "h2", "h3", "h4", "h5", "h6",
];

/// Heading tags searched on an embed's target page, highest rank first.
pub static HEADING_RANK: [&str; 5] = ["h2", "h3", "h4", "h5", "h6"];

/// Elements never recursed into when looking for blocks.
///
/// Their children are either raw text (`script`, `style`), inert
/// (`template`, `noscript`) or foreign content (`svg`, `math`).
pub static NON_CONTAINER_TAGS: [&str; 9] = [
    "script", "style", "noscript", "template", "iframe", "svg", "math", "head", "title",
];

/// Elements with no closing tag.
pub static VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are serialized verbatim.
pub static RAW_TEXT_ELEMENTS: [&str; 7] = [
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Void elements that carry no content by themselves.
pub static SEPARATOR_ELEMENTS: [&str; 3] = ["br", "hr", "wbr"];

/// Elements that display something even without text.
pub static EMBEDDED_CONTENT_TAGS: [&str; 7] = [
    "iframe", "video", "audio", "object", "picture", "canvas", "svg",
];

// === Tag Sets ===

/// `ALLOWED_TAGS` as a `HashSet`
pub static ALLOWED_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ALLOWED_TAGS.into_iter().collect());

/// `NON_CONTAINER_TAGS` as a `HashSet`
pub static NON_CONTAINER_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NON_CONTAINER_TAGS.into_iter().collect());

/// `VOID_ELEMENTS` as a `HashSet`
pub static VOID_ELEMENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOID_ELEMENTS.into_iter().collect());

/// `RAW_TEXT_ELEMENTS` as a `HashSet`
pub static RAW_TEXT_ELEMENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| RAW_TEXT_ELEMENTS.into_iter().collect());

// === Helper Functions ===

/// Check if tag can stand alone as a content block
#[inline]
#[must_use]
pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAG_SET.contains(tag)
}

/// Check if tag is a structural container worth recursing into
#[inline]
#[must_use]
pub fn is_container_tag(tag: &str) -> bool {
    !is_allowed_tag(tag) && !NON_CONTAINER_TAG_SET.contains(tag) && !is_void_element(tag)
}

/// Check if tag is a void element
#[inline]
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENT_SET.contains(tag)
}

/// Check if tag's text children are raw text
#[inline]
#[must_use]
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENT_SET.contains(tag)
}

/// Check if a void element is a pure separator (`br`, `hr`, `wbr`)
#[inline]
#[must_use]
pub fn is_separator_element(tag: &str) -> bool {
    SEPARATOR_ELEMENTS.contains(&tag)
}

/// Check if tag is embedded media that counts as content on its own
#[inline]
#[must_use]
pub fn is_embedded_content(tag: &str) -> bool {
    EMBEDDED_CONTENT_TAGS.contains(&tag)
}
