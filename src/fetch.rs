//! Page fetching.
//!
//! [`Fetch`] is the seam between scraping logic and the network. The
//! production implementation, [`HttpFetcher`], issues a single GET per call
//! with the configured timeout and User-Agent, follows redirects, rejects
//! non-2xx answers and decodes the body to UTF-8. It never retries.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::encoding;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::url_utils;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    /// The `Content-Type` response header, if any.
    pub content_type: Option<String>,
    /// Decoded body.
    pub body: String,
}

impl FetchedPage {
    /// Whether the body should be parsed as HTML.
    ///
    /// A missing or empty `Content-Type` is given the benefit of the doubt.
    #[must_use]
    pub fn is_html(&self) -> bool {
        let Some(content_type) = self.content_type.as_deref() else {
            return true;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml"
    }
}

/// Retrieves pages by URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and return its decoded body.
    ///
    /// # Errors
    ///
    /// `Error::InvalidUrl` for non-http(s) URLs, `Error::Fetch` for network
    /// failures and timeouts, `Error::Status` for non-2xx responses.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// [`Fetch`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client using `options.timeout` and `options.user_agent`.
    pub fn new(options: &Options) -> Result<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        url_utils::ensure_fetchable(url)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;
        debug!(%final_url, bytes = bytes.len(), status = status.as_u16(), "fetched");

        Ok(FetchedPage {
            url: final_url,
            body: encoding::decode_body(&bytes, content_type.as_deref()),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(content_type: Option<&str>) -> FetchedPage {
        FetchedPage {
            url: Url::parse("https://example.com/").unwrap(),
            content_type: content_type.map(str::to_string),
            body: String::new(),
        }
    }

    #[test]
    fn test_is_html() {
        assert!(page(None).is_html());
        assert!(page(Some("text/html")).is_html());
        assert!(page(Some("Text/HTML; charset=utf-8")).is_html());
        assert!(page(Some("application/xhtml+xml")).is_html());
        assert!(!page(Some("application/json")).is_html());
        assert!(!page(Some("image/png")).is_html());
    }

    #[test]
    fn test_client_builds_with_defaults() {
        assert!(HttpFetcher::new(&Options::default()).is_ok());
    }

    #[test]
    fn test_invalid_user_agent_is_a_client_error() {
        let options = Options {
            user_agent: "bad\nagent".to_string(),
            ..Options::default()
        };
        assert!(matches!(HttpFetcher::new(&options), Err(Error::Client(_))));
    }

    #[tokio::test]
    async fn test_non_web_scheme_rejected_before_request() {
        let fetcher = HttpFetcher::new(&Options::default()).unwrap();
        let url = Url::parse("file:///etc/hosts").unwrap();
        assert!(matches!(
            fetcher.fetch(&url).await,
            Err(Error::InvalidUrl { .. })
        ));
    }
}
