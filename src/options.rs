//! Configuration options for block extraction and page fetching.
//!
//! The `Options` struct controls which elements are scanned, how the pages
//! are fetched, and how embed titles are resolved.

use std::time::Duration;

/// Root selectors used when none are configured.
///
/// Joined as alternatives; every element matching either class becomes a
/// scan root.
pub const DEFAULT_SELECTORS: [&str; 2] = [".ResponsivePage-content", ".RichTextArticleBody"];

/// Browser-like identity sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Bound on every HTTP operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration options for scraping.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_embed_blocks::Options;
///
/// let options = Options {
///     selectors: vec!["article".to_string()],
///     merge_adjacent_content: true,
///     ..Options::default()
/// };
/// assert_eq!(options.title_concurrency, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// CSS selectors identifying scan roots, in priority-free order.
    ///
    /// They are joined as alternatives (`a, b`), so roots come back in
    /// document order regardless of which selector matched them.
    ///
    /// Default: `[".ResponsivePage-content", ".RichTextArticleBody"]`
    pub selectors: Vec<String>,

    /// Concatenate runs of consecutive content blocks into one block.
    ///
    /// Embed blocks still split runs apart.
    ///
    /// Default: `false`
    pub merge_adjacent_content: bool,

    /// Fetch each embed's `source_url` and use its first heading as title.
    ///
    /// Default: `true`
    pub resolve_titles: bool,

    /// How many title fetches may be in flight at once.
    ///
    /// `1` resolves titles one after another. Values above `1` only change
    /// timing; block order is always discovery order. `0` is treated as `1`.
    ///
    /// Default: `1`
    pub title_concurrency: usize,

    /// Timeout applied to the page fetch and every title fetch.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// User-Agent header sent with every request.
    ///
    /// Default: a desktop Chrome identity string
    pub user_agent: String,
}

impl Options {
    /// The configured selectors joined into a single selector group.
    #[must_use]
    pub fn selector_group(&self) -> String {
        self.selectors
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_SELECTORS.iter().map(ToString::to_string).collect(),
            merge_adjacent_content: false,
            resolve_titles: true,
            title_concurrency: 1,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
