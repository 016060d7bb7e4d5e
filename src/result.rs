//! Result types for extraction output.
//!
//! This module defines the ordered block list produced by the extractor and
//! the report handed to the renderers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Classification of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Paragraph, list, list item, heading or blockquote markup.
    Content,
    /// An `<iframe>` immediately followed by a `<script>`.
    Embed,
}

/// One unit of extracted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,

    /// Serialized markup of the block.
    ///
    /// For embeds this is the iframe and the script joined by a newline.
    pub html: String,

    /// First heading of the embed's target page, when it could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Absolute http(s) URL of the iframe target.
    ///
    /// Always `None` for content blocks. `None` for an embed whose iframe
    /// declares no usable `src`/`data-src`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<Url>,
}

impl Block {
    #[must_use]
    pub fn content(html: String) -> Self {
        Self {
            kind: BlockKind::Content,
            html,
            title: None,
            source_url: None,
        }
    }

    #[must_use]
    pub fn embed(html: String, source_url: Option<Url>) -> Self {
        Self {
            kind: BlockKind::Embed,
            html,
            title: None,
            source_url,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_embed(&self) -> bool {
        self.kind == BlockKind::Embed
    }
}

/// Per-kind block counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub content_blocks: usize,
    pub embed_blocks: usize,
    /// Embeds whose title was resolved.
    pub titled_embeds: usize,
}

impl Summary {
    #[must_use]
    pub fn of(blocks: &[Block]) -> Self {
        blocks.iter().fold(Self::default(), |mut acc, block| {
            match block.kind {
                BlockKind::Content => acc.content_blocks += 1,
                BlockKind::Embed => {
                    acc.embed_blocks += 1;
                    if block.title.is_some() {
                        acc.titled_embeds += 1;
                    }
                }
            }
            acc
        })
    }
}

/// Everything produced for one scraped page.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    /// The normalized URL that was requested.
    pub url: Url,

    /// Where the request ended up after redirects. Relative iframe sources
    /// are resolved against this.
    pub final_url: Url,

    pub fetched_at: DateTime<Utc>,

    /// Number of selector roots found on the page (nested matches excluded).
    pub roots_matched: usize,

    pub summary: Summary,

    pub blocks: Vec<Block>,

    /// Decoded page markup.
    #[serde(skip)]
    pub source_html: String,
}
