//! Block extraction.
//!
//! Each scan root is walked child by child. An `<iframe>` whose next
//! non-blank sibling is a `<script>` becomes an embed block; an element from
//! the allowed set becomes a content block, after any iframe+script pairs
//! among its descendants have been cut out of it; any other container is
//! walked recursively and its blocks spliced in place.

use tracing::debug;
use url::Url;

use crate::dom;
use crate::error::Result;
use crate::fragment::{self, Token};
use crate::options::Options;
use crate::result::Block;
use crate::tags;
use crate::tree::{self, Element, Node};
use crate::url_utils;

/// Blocks found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Number of selector roots scanned.
    pub roots: usize,
    /// Blocks of all roots, concatenated in document order.
    pub blocks: Vec<Block>,
}

/// Extract blocks from an HTML document.
///
/// `base` is the URL the document was fetched from; relative iframe sources
/// are resolved against it. Without a base only absolute sources produce a
/// `source_url`.
///
/// # Errors
///
/// `Error::InvalidSelector` if `options.selectors` does not form a valid
/// selector group. Markup problems never produce an error.
///
/// # Example
///
/// ```rust
/// use rs_embed_blocks::{extract_blocks, BlockKind, Options};
///
/// let html = r#"<div class="ResponsivePage-content">
///   <p>Intro</p>
///   <iframe src="https://widgets.example.com/poll/7"></iframe>
///   <script src="https://widgets.example.com/embed.js"></script>
///   <p>Outro</p>
/// </div>"#;
///
/// let extraction = extract_blocks(html, &Options::default(), None)?;
/// let kinds: Vec<_> = extraction.blocks.iter().map(|b| b.kind).collect();
/// assert_eq!(kinds, [BlockKind::Content, BlockKind::Embed, BlockKind::Content]);
/// # Ok::<(), rs_embed_blocks::Error>(())
/// ```
pub fn extract_blocks(html: &str, options: &Options, base: Option<&Url>) -> Result<Extraction> {
    let matcher = dom::compile_selector(&options.selector_group())?;
    let doc = dom::parse(html);
    let roots = dom::select_roots(&doc, &matcher);

    let mut blocks: Vec<Block> = roots
        .iter()
        .flat_map(|root| blocks_from_root(root, base))
        .collect();

    if options.merge_adjacent_content {
        blocks = merge_adjacent_content(blocks);
    }

    debug!(roots = roots.len(), blocks = blocks.len(), "extraction finished");
    Ok(Extraction {
        roots: roots.len(),
        blocks,
    })
}

/// Blocks at or beneath a single root, in document order.
#[must_use]
pub fn blocks_from_root(root: &Element, base: Option<&Url>) -> Vec<Block> {
    BlockExtractor { base }.walk(root)
}

struct BlockExtractor<'a> {
    base: Option<&'a Url>,
}

/// Output of flattening a candidate element: markup tokens interleaved with
/// the embeds cut out of it.
enum Piece {
    Token(Token),
    Embed(Block),
}

impl BlockExtractor<'_> {
    fn walk(&self, root: &Element) -> Vec<Block> {
        let children = &root.children;
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < children.len() {
            let Some(el) = children[i].as_element() else {
                i += 1;
                continue;
            };

            if let Some((script_at, script)) = paired_script(children, i) {
                blocks.push(self.embed(el, script));
                i = script_at + 1;
                continue;
            }

            if tags::is_allowed_tag(&el.tag) {
                blocks.extend(self.split_candidate(el));
            } else if tags::is_container_tag(&el.tag) {
                blocks.extend(self.walk(el));
            }
            i += 1;
        }

        blocks
    }

    /// Emit a content element, cutting out every iframe+script pair among
    /// its descendants. The pieces before, between and after the pairs keep
    /// the element's own tag and attributes.
    fn split_candidate(&self, el: &Element) -> Vec<Block> {
        let mut pieces = Vec::new();
        self.flatten_children(&el.children, tags::is_raw_text_element(&el.tag), &mut pieces);

        if !pieces.iter().any(|p| matches!(p, Piece::Embed(_))) {
            return vec![Block::content(fragment::outer_html(el))];
        }

        let mut blocks = Vec::new();
        let mut segment = Vec::new();
        for piece in pieces {
            match piece {
                Piece::Token(token) => segment.push(token),
                Piece::Embed(embed) => {
                    push_fragment(el, std::mem::take(&mut segment), &mut blocks);
                    blocks.push(embed);
                }
            }
        }
        push_fragment(el, segment, &mut blocks);
        blocks
    }

    fn flatten_children(&self, children: &[Node], raw: bool, out: &mut Vec<Piece>) {
        let mut i = 0;
        while i < children.len() {
            match &children[i] {
                Node::Element(child) => {
                    if let Some((script_at, script)) = paired_script(children, i) {
                        out.push(Piece::Embed(self.embed(child, script)));
                        i = script_at + 1;
                        continue;
                    }
                    self.flatten_element(child, out);
                }
                Node::Text(t) if raw => out.push(Piece::Token(Token::Raw(t.clone()))),
                Node::Text(t) => out.push(Piece::Token(Token::Text(t.clone()))),
            }
            i += 1;
        }
    }

    fn flatten_element(&self, el: &Element, out: &mut Vec<Piece>) {
        if tags::is_void_element(&el.tag) {
            let mut tokens = Vec::with_capacity(1);
            fragment::push_element(el, &mut tokens);
            out.extend(tokens.into_iter().map(Piece::Token));
            return;
        }
        out.push(Piece::Token(Token::open(el)));
        self.flatten_children(&el.children, tags::is_raw_text_element(&el.tag), out);
        out.push(Piece::Token(Token::close(el)));
    }

    fn embed(&self, iframe: &Element, script: &Element) -> Block {
        let html = format!(
            "{}\n{}",
            fragment::outer_html(iframe),
            fragment::outer_html(script)
        );
        let source_url = ["src", "data-src"]
            .iter()
            .filter_map(|name| iframe.attr(name))
            .find_map(|src| url_utils::resolve_src(src, self.base));

        match &source_url {
            Some(url) => debug!(%url, "embed found"),
            None => debug!(src = ?iframe.attr("src"), "embed found without a usable source"),
        }
        Block::embed(html, source_url)
    }
}

/// The script completing an iframe+script pair that starts at `i`, with its
/// index. Whitespace-only text between the two is skipped; anything else
/// breaks the pair.
fn paired_script(children: &[Node], i: usize) -> Option<(usize, &Element)> {
    let iframe = children.get(i)?.as_element()?;
    if !iframe.is("iframe") {
        return None;
    }
    let next = tree::next_significant(children, i + 1)?;
    let script = children[next].as_element().filter(|el| el.is("script"))?;
    Some((next, script))
}

/// Repair a cut segment and emit it wrapped in the candidate's own tag, if
/// anything visible is left.
fn push_fragment(wrapper: &Element, segment: Vec<Token>, blocks: &mut Vec<Block>) {
    let inner = fragment::balance(segment);
    if !fragment::has_content(&inner) {
        debug!(tag = %wrapper.tag, "dropping empty fragment");
        return;
    }

    let mut tokens = Vec::with_capacity(inner.len() + 2);
    tokens.push(Token::open(wrapper));
    tokens.extend(inner);
    tokens.push(Token::close(wrapper));
    blocks.push(Block::content(fragment::render(&tokens)));
}

/// Concatenate runs of consecutive content blocks.
#[must_use]
pub fn merge_adjacent_content(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last) if !last.is_embed() && !block.is_embed() => last.html.push_str(&block.html),
            _ => merged.push(block),
        }
    }
    merged
}
