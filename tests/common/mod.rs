//! In-memory `Fetch` implementation for orchestration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rs_embed_blocks::{Error, Fetch, FetchedPage, Result};
use url::Url;

enum Route {
    Page {
        final_url: Option<Url>,
        content_type: Option<String>,
        body: String,
        delay: Duration,
    },
    Status(u16),
}

/// Serves canned pages by exact URL; anything else is a 404.
#[derive(Default)]
pub struct StaticFetcher {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Page {
                final_url: None,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: body.to_string(),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Like `html`, but the answer takes `delay` to arrive.
    pub fn slow_html(mut self, url: &str, body: &str, delay: Duration) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Page {
                final_url: None,
                content_type: Some("text/html".to_string()),
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    pub fn typed(mut self, url: &str, content_type: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Page {
                final_url: None,
                content_type: Some(content_type.to_string()),
                body: body.to_string(),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// `url` answers with `body` as if redirected to `final_url`.
    pub fn redirect(mut self, url: &str, final_url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Page {
                final_url: Some(Url::parse(final_url).expect("final url")),
                content_type: Some("text/html".to_string()),
                body: body.to_string(),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Route::Status(status));
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());

        match self.routes.get(url.as_str()) {
            Some(Route::Page {
                final_url,
                content_type,
                body,
                delay,
            }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(FetchedPage {
                    url: final_url.clone().unwrap_or_else(|| url.clone()),
                    content_type: content_type.clone(),
                    body: body.clone(),
                })
            }
            Some(Route::Status(status)) => Err(Error::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(Error::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
