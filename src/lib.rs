//! # rs-embed-blocks
//!
//! Extract readable content blocks and interactive embeds from web pages.
//!
//! A page is fetched, the elements matching the configured root selectors
//! are walked in document order, and every paragraph, list, heading or
//! blockquote becomes a content block. An `<iframe>` immediately followed
//! by a `<script>` is an embed: it is cut out of whatever content element
//! holds it and emitted as its own block, titled with the first heading of
//! the page the iframe points to.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_embed_blocks::{extract_blocks, BlockKind, Options};
//!
//! let html = r#"<div class="RichTextArticleBody">
//!   <p>Before<iframe src="https://embed.example.com/1"></iframe><script>boot()</script>after</p>
//! </div>"#;
//!
//! let extraction = extract_blocks(html, &Options::default(), None)?;
//! assert_eq!(extraction.blocks.len(), 3);
//! assert_eq!(extraction.blocks[0].html, "<p>Before</p>");
//! assert_eq!(extraction.blocks[1].kind, BlockKind::Embed);
//! assert_eq!(extraction.blocks[2].html, "<p>after</p>");
//! # Ok::<(), rs_embed_blocks::Error>(())
//! ```
//!
//! Fetching and title resolution are async:
//!
//! ```rust,no_run
//! # async fn run() -> rs_embed_blocks::Result<()> {
//! let report = rs_embed_blocks::scrape("example.com/story", &Default::default()).await?;
//! println!("{} embeds", report.summary.embed_blocks);
//! # Ok(())
//! # }
//! ```

mod error;
mod extract;
mod options;
mod result;
mod scrape;

/// Parsing and selector matching over `dom_query`.
pub mod dom;

/// Owned element tree the extractor walks.
pub mod tree;

/// Token streams, fragment repair and serialization.
pub mod fragment;

/// Tag vocabularies.
pub mod tags;

/// URL normalization and iframe source resolution.
pub mod url_utils;

/// Character encoding detection and decoding.
pub mod encoding;

/// Page fetching.
pub mod fetch;

/// Embed title resolution.
pub mod title;

/// Text, JSON and HTML presentation.
pub mod render;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{blocks_from_root, extract_blocks, merge_adjacent_content, Extraction};
pub use fetch::{Fetch, FetchedPage, HttpFetcher};
pub use options::{Options, DEFAULT_SELECTORS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use result::{Block, BlockKind, ScrapeReport, Summary};
pub use scrape::Scraper;

/// Scrape one page over HTTP with `options`.
///
/// Shorthand for building a [`Scraper`] and calling [`Scraper::scrape`].
#[allow(clippy::missing_errors_doc)]
pub async fn scrape(url: &str, options: &Options) -> Result<ScrapeReport> {
    Scraper::new(options.clone())?.scrape(url).await
}
