//! URL utility functions.
//!
//! Normalization of user-submitted page URLs, resolution of iframe sources
//! against the page they were found on, and the http/https gate applied
//! before any request goes out.

use url::Url;

use crate::error::{Error, Result};

/// Check whether a parsed URL can be fetched: http or https with a host.
pub fn ensure_fetchable(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::invalid_url(
                url.as_str(),
                format!("unsupported scheme {other:?}"),
            ))
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::invalid_url(url.as_str(), "missing host"));
    }
    Ok(())
}

/// Normalize a URL typed by a user.
///
/// Surrounding whitespace is trimmed and `https://` is assumed when no
/// scheme is given, so `example.com/page` becomes
/// `https://example.com/page`.
///
/// # Errors
///
/// `Error::InvalidUrl` for empty input, unparseable input, a scheme other
/// than http/https, or a missing host.
pub fn normalize_input_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_url(input, "empty URL"));
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.trim_start_matches('/'))
    };

    let url = Url::parse(&candidate).map_err(|e| Error::invalid_url(input, e.to_string()))?;
    ensure_fetchable(&url).map_err(|_| {
        Error::invalid_url(input, "the URL needs an http(s) scheme and a hostname")
    })?;
    Ok(url)
}

/// `scheme:` prefix per RFC 3986, excluding `host:port` forms like
/// `example.com:8080`.
fn has_scheme(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return false;
    }
    // "localhost:8080/x" parses as scheme "localhost"; a leading digit after
    // the colon means a port.
    !rest.starts_with(|c: char| c.is_ascii_digit())
}

/// Resolve an iframe `src` value to an absolute http(s) URL.
///
/// Protocol-relative (`//host/path`) and relative references are resolved
/// against `base`. Without a base only absolute references resolve.
/// `about:`, `javascript:`, `data:` and other non-web schemes yield `None`.
#[must_use]
pub fn resolve_src(src: &str, base: Option<&Url>) -> Option<Url> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    let resolved = match Url::parse(src) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base.join(src).ok()?,
            None if src.starts_with("//") => Url::parse(&format!("https:{src}")).ok()?,
            None => return None,
        },
        Err(_) => return None,
    };

    ensure_fetchable(&resolved).ok()?;
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://news.example.com/2024/story.html").unwrap()
    }

    #[test]
    fn test_normalize_adds_https_scheme() {
        let url = normalize_input_url("  example.com/page ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_keeps_http() {
        let url = normalize_input_url("http://example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn test_normalize_host_with_port() {
        let url = normalize_input_url("localhost:8080/x").unwrap();
        assert_eq!(url.as_str(), "https://localhost:8080/x");
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(
            normalize_input_url("   "),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_normalize_rejects_other_schemes() {
        assert!(normalize_input_url("ftp://example.com/file").is_err());
        assert!(normalize_input_url("mailto:someone@example.com").is_err());
        assert!(normalize_input_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_input_url("http://").is_err());
        assert!(normalize_input_url("https://exa mple.com").is_err());
    }

    #[test]
    fn test_resolve_relative_src() {
        let url = resolve_src("/embeds/chart.html", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://news.example.com/embeds/chart.html");

        let url = resolve_src("chart.html?id=3", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://news.example.com/2024/chart.html?id=3");
    }

    #[test]
    fn test_resolve_protocol_relative_src() {
        let url = resolve_src("//player.example.org/v/1", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://player.example.org/v/1");

        let url = resolve_src("//player.example.org/v/1", None).unwrap();
        assert_eq!(url.as_str(), "https://player.example.org/v/1");
    }

    #[test]
    fn test_resolve_absolute_src_ignores_base() {
        let url = resolve_src(" https://other.example.net/w ", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://other.example.net/w");
    }

    #[test]
    fn test_resolve_rejects_non_web_sources() {
        assert!(resolve_src("about:blank", Some(&base())).is_none());
        assert!(resolve_src("javascript:void(0)", Some(&base())).is_none());
        assert!(resolve_src("", Some(&base())).is_none());
        assert!(resolve_src("relative.html", None).is_none());
    }
}
