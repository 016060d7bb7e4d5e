//! Response body decoding.
//!
//! Fetched pages arrive as bytes. The charset is taken, in order, from a
//! byte-order mark, the `Content-Type` response header, an in-document
//! `<meta>` declaration, and finally defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Only the head of the document is searched for `<meta>` declarations.
const META_SCAN_LIMIT: usize = 1024;

/// `<meta charset="...">` and `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// `charset=` parameter of a media type, quoted or bare.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*"?([^";\s]+)"?"#).expect("valid regex")
});

/// Pick the encoding for a response body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(body) {
        return encoding;
    }

    if let Some(encoding) = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(META_SCAN_LIMIT)]);
    if let Some(encoding) = meta_charset(&head).and_then(|label| Encoding::for_label(label.as_bytes())) {
        return encoding;
    }

    UTF_8
}

/// Extract the `charset` parameter from a `Content-Type` value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn meta_charset(head: &str) -> Option<String> {
    META_CHARSET_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode a response body to UTF-8.
///
/// Invalid sequences become U+FFFD rather than errors. A BOM, when present,
/// is stripped.
///
/// # Examples
///
/// ```
/// use rs_embed_blocks::encoding::decode_body;
///
/// let body = b"<p>Caf\xE9</p>";
/// assert_eq!(decode_body(body, Some("text/html; charset=ISO-8859-1")), "<p>Café</p>");
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    let (decoded, _had_errors) = encoding.decode_with_bom_removal(body);
    decoded.into_owned()
}
