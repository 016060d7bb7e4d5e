//! Error types for rs-embed-blocks.
//!
//! Only whole-request failures live here. Problems that are local to one
//! embed (its title page could not be fetched, it has no heading) never
//! become an `Error`; the block is kept and its title stays empty.

/// Error type for scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The submitted URL is malformed, lacks a host, or uses a scheme other
    /// than http/https. Raised before any network call.
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    /// A configured root selector could not be parsed as CSS.
    #[error("invalid selector {0:?}")]
    InvalidSelector(String),

    /// The HTTP client could not be built (TLS backend, bad header value).
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Network error or timeout while fetching a page.
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl Error {
    /// Whether the failure was the request timing out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Fetch { source, .. } if source.is_timeout())
    }

    pub(crate) fn invalid_url(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_message_names_input_and_reason() {
        let err = Error::invalid_url("ftp://x", "unsupported scheme \"ftp\"");
        assert_eq!(
            err.to_string(),
            "invalid URL \"ftp://x\": unsupported scheme \"ftp\""
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn status_message() {
        let err = Error::Status {
            url: "https://example.com/".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "request to https://example.com/ returned HTTP 404");
    }
}
