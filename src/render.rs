//! Presentation of scrape results.
//!
//! Three formats: a plain-text listing for terminals, pretty JSON, and a
//! self-contained HTML page with the requested URL, the summary, each block escaped
//! inside a `<pre>`, and optionally the full page source.

use std::fmt::Write as _;

use crate::error::Error;
use crate::result::{Block, BlockKind, ScrapeReport};

/// Shown for any URL that fails normalization.
pub const INVALID_URL_MESSAGE: &str = "The URL looks invalid. Include hostname and scheme.";

/// The message a user sees for a whole-request error.
#[must_use]
pub fn user_message(err: &Error) -> String {
    match err {
        Error::InvalidUrl { .. } => INVALID_URL_MESSAGE.to_string(),
        Error::InvalidSelector(_) => format!("Configuration error: {err}"),
        _ if err.is_timeout() => "Request failed: the server did not answer in time.".to_string(),
        Error::Client(_) | Error::Fetch { .. } | Error::Status { .. } => {
            format!("Request failed: {err}")
        }
    }
}

/// Plain-text listing: a summary line, then every block under a header.
#[must_use]
pub fn text(report: &ScrapeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.final_url);
    let _ = writeln!(out, "{}", summary_line(report));

    for block in &report.blocks {
        out.push('\n');
        let _ = writeln!(out, "{}", block_header(block));
        out.push_str(&block.html);
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON of the report.
///
/// # Errors
///
/// Only if serialization itself fails, which the report's types do not
/// trigger in practice.
pub fn json(report: &ScrapeReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn summary_line(report: &ScrapeReport) -> String {
    let s = &report.summary;
    format!(
        "{} content blocks, {} iframe+script blocks ({} titled) from {} root(s)",
        s.content_blocks, s.embed_blocks, s.titled_embeds, report.roots_matched
    )
}

fn block_header(block: &Block) -> String {
    match block.kind {
        BlockKind::Content => "[content]".to_string(),
        BlockKind::Embed => {
            let mut header = "[embed]".to_string();
            if let Some(title) = &block.title {
                let _ = write!(header, " {title}");
            }
            if let Some(url) = &block.source_url {
                let _ = write!(header, " <{url}>");
            }
            header
        }
    }
}

/// Inputs of the HTML page.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// What the user typed. Replaced by the normalized URL when the scrape
    /// succeeded.
    pub submitted_url: &'a str,

    /// `None` before anything was submitted.
    pub outcome: Option<&'a crate::Result<ScrapeReport>>,

    /// Selectors used, for the "not found" notice.
    pub selectors: &'a [String],

    /// Append the escaped source of the fetched page.
    pub show_source: bool,
}

/// The HTML scraper page.
#[must_use]
pub fn page(view: &PageView<'_>) -> String {
    let report = view.outcome.and_then(|r| r.as_ref().ok());
    let error = view.outcome.and_then(|r| r.as_ref().err()).map(user_message);
    let url_value = report.map_or(view.submitted_url, |r| r.url.as_str());

    let mut out = String::with_capacity(4096);
    out.push_str(PAGE_HEAD);
    if !url_value.is_empty() {
        let _ = writeln!(
            out,
            r#"  <p class="url"><strong>URL:</strong> {}</p>"#,
            escape_html(url_value)
        );
    }

    if let Some(error) = error {
        let _ = writeln!(
            out,
            r#"  <p class="error"><strong>Error:</strong> {}</p>"#,
            escape_html(&error)
        );
    }

    if let Some(report) = report {
        if report.roots_matched == 0 {
            let _ = writeln!(
                out,
                r#"  <p class="notice">Could not find {} in the page.</p>"#,
                escape_html(&view.selectors.join(", "))
            );
        }

        let _ = writeln!(
            out,
            r#"  <div class="summary">
    <strong>Summary:</strong> {} content blocks, {} iframe+script blocks
  </div>"#,
            report.summary.content_blocks, report.summary.embed_blocks
        );

        if !report.blocks.is_empty() {
            out.push_str("  <h2>Extracted content blocks</h2>\n");
            for block in &report.blocks {
                if let Some(title) = block.title.as_deref() {
                    let _ = writeln!(out, "  <h3>{}</h3>", escape_html(title));
                }
                let _ = writeln!(out, "  <pre>{}</pre>", escape_html(&block.html));
            }
        }

        if view.show_source && !report.source_html.is_empty() {
            out.push_str("  <h2>Full HTML source</h2>\n");
            let _ = writeln!(out, "  <pre>{}</pre>", escape_html(&report.source_html));
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>HTML Scraper</title>
  <style>
    body { font-family: system-ui, -apple-system, "Segoe UI", Roboto; padding: 20px; max-width: 1000px; margin:auto;}
    .url { margin-bottom:1rem; word-break:break-all; }
    pre { background:#f6f8fa; border:1px solid #e1e4e8; padding:12px; overflow:auto; white-space:pre-wrap; }
    .summary { margin-bottom:1rem; color:#333; }
    .error { color:#a00; }
    .notice { color:#555; }
  </style>
</head>
<body>
  <h1>HTML Scraper</h1>
"#;

/// Escape text for HTML element content and double-quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Summary;
    use chrono::Utc;
    use url::Url;

    fn report() -> ScrapeReport {
        let url = Url::parse("https://news.example.com/story").unwrap();
        let mut embed = Block::embed(
            "<iframe src=\"https://w.example/1\"></iframe>\n<script></script>".to_string(),
            Some(Url::parse("https://w.example/1").unwrap()),
        );
        embed.title = Some("Poll <results>".to_string());
        let blocks = vec![Block::content("<p>Intro &amp; more</p>".to_string()), embed];
        ScrapeReport {
            url: url.clone(),
            final_url: url,
            fetched_at: Utc::now(),
            roots_matched: 1,
            summary: Summary::of(&blocks),
            blocks,
            source_html: "<html><body>src</body></html>".to_string(),
        }
    }

    #[test]
    fn test_user_messages() {
        let invalid = Error::InvalidUrl {
            input: "x".into(),
            reason: "missing host".into(),
        };
        assert_eq!(user_message(&invalid), INVALID_URL_MESSAGE);

        let status = Error::Status {
            url: "https://example.com/".into(),
            status: 503,
        };
        assert_eq!(
            user_message(&status),
            "Request failed: request to https://example.com/ returned HTTP 503"
        );
    }

    #[test]
    fn test_text_lists_blocks_with_headers() {
        let out = text(&report());
        assert!(out.starts_with("https://news.example.com/story\n"));
        assert!(out.contains("1 content blocks, 1 iframe+script blocks (1 titled) from 1 root(s)"));
        assert!(out.contains("[content]\n<p>Intro &amp; more</p>\n"));
        assert!(out.contains("[embed] Poll <results> <https://w.example/1>\n<iframe"));
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value = serde_json::from_str(&json(&report()).unwrap()).unwrap();
        assert_eq!(value["summary"]["embed_blocks"], 1);
        assert_eq!(value["blocks"][1]["kind"], "embed");
        assert_eq!(value["blocks"][1]["title"], "Poll <results>");
        assert!(value.get("source_html").is_none());
    }

    #[test]
    fn test_page_escapes_blocks_and_shows_summary() {
        let outcome = Ok(report());
        let selectors = vec![".ResponsivePage-content".to_string()];
        let html = page(&PageView {
            submitted_url: "news.example.com/story",
            outcome: Some(&outcome),
            selectors: &selectors,
            show_source: false,
        });

        assert!(html.contains("<strong>URL:</strong> https://news.example.com/story</p>"));
        assert!(html.contains("1 content blocks, 1 iframe+script blocks"));
        assert!(html.contains("<pre>&lt;p&gt;Intro &amp;amp; more&lt;/p&gt;</pre>"));
        assert!(html.contains("<h3>Poll &lt;results&gt;</h3>"));
        assert!(!html.contains("Full HTML source"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_page_source_and_missing_roots_notice() {
        let mut r = report();
        r.roots_matched = 0;
        r.blocks.clear();
        r.summary = Summary::default();
        let outcome = Ok(r);
        let selectors = vec![".a".to_string(), ".b".to_string()];
        let html = page(&PageView {
            submitted_url: "news.example.com/story",
            outcome: Some(&outcome),
            selectors: &selectors,
            show_source: true,
        });

        assert!(html.contains("Could not find .a, .b in the page."));
        assert!(html.contains("&lt;html&gt;&lt;body&gt;src"));
        assert!(!html.contains("Extracted content blocks"));
    }

    #[test]
    fn test_page_error_keeps_submitted_url() {
        let outcome = Err(Error::InvalidUrl {
            input: "\"nope".into(),
            reason: "missing host".into(),
        });
        let html = page(&PageView {
            submitted_url: "\"nope",
            outcome: Some(&outcome),
            selectors: &[],
            show_source: false,
        });

        assert!(html.contains("<strong>URL:</strong> &quot;nope</p>"));
        assert!(html.contains(INVALID_URL_MESSAGE));
        assert!(!html.contains("Summary:"));
    }

    #[test]
    fn test_blank_page() {
        let html = page(&PageView {
            submitted_url: "",
            outcome: None,
            selectors: &[],
            show_source: false,
        });
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(!html.contains("Summary:"));
        assert!(!html.contains("<form"));
        assert!(!html.contains("URL:"));
    }
}
