//! Embed title resolution.
//!
//! An embed's title is the first heading on the page its iframe points to.
//! Headings are ranked `h2` > `h3` > ... > `h6` and searched level by level
//! from the document element down, so a shallow `h4` beats a deeply nested
//! `h2`, and within one level an `h2` beats an earlier `h3`.
//!
//! Resolution never fails the request: any problem leaves the title empty.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use url::Url;

use crate::dom;
use crate::fetch::Fetch;
use crate::result::Block;
use crate::tags::HEADING_RANK;
use crate::tree::{collapse_whitespace, Element};

/// First ranked heading in an HTML document.
#[must_use]
pub fn first_heading(html: &str) -> Option<String> {
    let doc = dom::parse(html);
    let root = dom::document_element(&doc)?;
    ranked_heading(&root)
}

/// First ranked heading at or below `root`, breadth first.
///
/// Headings whose text is empty after whitespace collapsing are passed over.
#[must_use]
pub fn ranked_heading(root: &Element) -> Option<String> {
    let mut level: Vec<&Element> = vec![root];

    while !level.is_empty() {
        for tag in HEADING_RANK {
            let found = level
                .iter()
                .filter(|el| el.is(tag))
                .map(|el| collapse_whitespace(&el.text_content()))
                .find(|text| !text.is_empty());
            if found.is_some() {
                return found;
            }
        }
        level = level
            .iter()
            .copied()
            .flat_map(Element::element_children)
            .collect();
    }

    None
}

/// Fetch `url` and return its first ranked heading.
pub async fn resolve_title<F: Fetch + ?Sized>(fetcher: &F, url: &Url) -> Option<String> {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(err) => {
            warn!(%url, error = %err, "could not fetch embed target");
            return None;
        }
    };

    if !page.is_html() {
        debug!(%url, content_type = ?page.content_type, "embed target is not HTML");
        return None;
    }

    let title = first_heading(&page.body);
    if title.is_none() {
        debug!(%url, "embed target has no heading");
    }
    title
}

/// Resolve titles for every embed in `blocks` that has a `source_url`.
///
/// At most `concurrency` fetches run at once (`0` counts as `1`). Results are
/// applied by position, so block order is never affected.
pub async fn resolve_titles<F: Fetch + ?Sized>(fetcher: &F, blocks: &mut [Block], concurrency: usize) {
    let targets: Vec<(usize, Url)> = blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| block.is_embed())
        .filter_map(|(i, block)| block.source_url.clone().map(|url| (i, url)))
        .collect();

    if targets.is_empty() {
        return;
    }
    debug!(embeds = targets.len(), concurrency, "resolving embed titles");

    let titles: Vec<(usize, Option<String>)> = stream::iter(targets)
        .map(|(i, url)| async move { (i, resolve_title(fetcher, &url).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    for (i, title) in titles {
        blocks[i].title = title;
    }
}
