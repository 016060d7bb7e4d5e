//! Request orchestration: URL in, `ScrapeReport` out.

use chrono::Utc;
use tracing::{debug, info};

use crate::dom;
use crate::error::Result;
use crate::extract::extract_blocks;
use crate::fetch::{Fetch, HttpFetcher};
use crate::options::Options;
use crate::result::{ScrapeReport, Summary};
use crate::title;
use crate::url_utils;

/// Runs one scrape per call against a [`Fetch`] implementation.
///
/// The same fetcher serves the page fetch and every title fetch.
///
/// # Example
///
/// ```rust,no_run
/// use rs_embed_blocks::{Options, Scraper};
///
/// # async fn run() -> rs_embed_blocks::Result<()> {
/// let scraper = Scraper::new(Options::default())?;
/// let report = scraper.scrape("example.com/story").await?;
/// for block in &report.blocks {
///     println!("{:?} {:?}", block.kind, block.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Scraper<F = HttpFetcher> {
    fetcher: F,
    options: Options,
}

impl Scraper<HttpFetcher> {
    /// Scraper over HTTP, configured from `options`.
    ///
    /// # Errors
    ///
    /// `Error::Client` if the HTTP client cannot be built.
    pub fn new(options: Options) -> Result<Self> {
        let fetcher = HttpFetcher::new(&options)?;
        Ok(Self { fetcher, options })
    }
}

impl<F: Fetch> Scraper<F> {
    /// Scraper over any fetcher. Timeout and User-Agent in `options` are the
    /// fetcher's business and are not applied here.
    pub fn with_fetcher(fetcher: F, options: Options) -> Self {
        Self { fetcher, options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch `input`, extract its blocks and resolve embed titles.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidUrl` if `input` cannot be normalized; nothing is
    ///   fetched.
    /// - `Error::InvalidSelector` if the configured selectors are invalid;
    ///   nothing is fetched.
    /// - `Error::Fetch` / `Error::Status` if the page itself cannot be
    ///   retrieved.
    ///
    /// Title failures are never errors.
    pub async fn scrape(&self, input: &str) -> Result<ScrapeReport> {
        let url = url_utils::normalize_input_url(input)?;
        dom::compile_selector(&self.options.selector_group())?;

        info!(%url, "scraping");
        let page = self.fetcher.fetch(&url).await?;
        let fetched_at = Utc::now();
        if page.url != url {
            debug!(from = %url, to = %page.url, "followed redirect");
        }

        let extraction = extract_blocks(&page.body, &self.options, Some(&page.url))?;
        let mut blocks = extraction.blocks;

        if self.options.resolve_titles {
            title::resolve_titles(&self.fetcher, &mut blocks, self.options.title_concurrency).await;
        }

        let summary = Summary::of(&blocks);
        info!(
            %url,
            roots = extraction.roots,
            content = summary.content_blocks,
            embeds = summary.embed_blocks,
            titled = summary.titled_embeds,
            "scrape finished"
        );

        Ok(ScrapeReport {
            url,
            final_url: page.url,
            fetched_at,
            roots_matched: extraction.roots,
            summary,
            blocks,
            source_html: page.body,
        })
    }
}
