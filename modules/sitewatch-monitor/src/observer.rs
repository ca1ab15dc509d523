use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};
use tracing::info;

use sitewatch_common::SearchBatch;

/// Title reported when the fetched document has no `<title>` element.
pub const NO_TITLE_SENTINEL: &str = "No title found";

/// The profile page serves a stripped-down document to unknown clients,
/// so the request identifies as a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// --- PageObserver trait ---

/// Produces the current observation of a monitored page.
#[async_trait]
pub trait PageObserver: Send + Sync {
    /// Fetch the page and return its title text.
    async fn observe(&self) -> Result<String>;
    fn name(&self) -> &str;
}

/// Observer that GETs a fixed URL and extracts the document title.
pub struct HttpTitleObserver {
    url: String,
    client: reqwest::Client,
}

impl HttpTitleObserver {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl PageObserver for HttpTitleObserver {
    async fn observe(&self) -> Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Profile page request failed")?;

        info!(url = self.url.as_str(), status = %resp.status(), "Profile page fetched");

        let body = resp
            .text()
            .await
            .context("Failed to read profile page body")?;

        Ok(extract_title(&body))
    }

    fn name(&self) -> &str {
        "http-title"
    }
}

/// Trimmed `<title>` text of an HTML document, or the sentinel when the
/// document has none.
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").expect("valid selector");

    match document.select(&selector).next() {
        Some(el) => el.text().collect::<String>().trim().to_string(),
        None => NO_TITLE_SENTINEL.to_string(),
    }
}

// --- HeadlineSearcher trait ---

/// Contract for a news/search integration: given a subject name and a
/// keyword list, return a timestamped batch of candidate headlines.
#[async_trait]
pub trait HeadlineSearcher: Send + Sync {
    async fn search(&self, subject: &str, keywords: &[String]) -> Result<SearchBatch>;
}

/// Placeholder searcher until a real news integration lands. Returns a
/// timestamped empty batch.
pub struct NoopSearcher;

#[async_trait]
impl HeadlineSearcher for NoopSearcher {
    async fn search(&self, subject: &str, _keywords: &[String]) -> Result<SearchBatch> {
        info!(subject, "No search integration configured, returning empty batch");
        Ok(SearchBatch {
            searched_at: Utc::now(),
            headlines: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_trims_text() {
        let html = "<html><head><title>\n  Jane Doe | Profile  \n</title></head><body></body></html>";
        assert_eq!(extract_title(html), "Jane Doe | Profile");
    }

    #[test]
    fn test_extract_title_missing_yields_sentinel() {
        let html = "<html><head></head><body><h1>hi</h1></body></html>";
        assert_eq!(extract_title(html), NO_TITLE_SENTINEL);
    }

    #[test]
    fn test_extract_title_first_title_wins() {
        let html = "<title>First</title><title>Second</title>";
        assert_eq!(extract_title(html), "First");
    }

    #[tokio::test]
    async fn test_noop_searcher_returns_timestamped_empty_batch() {
        let batch = NoopSearcher
            .search("example", &["funding".to_string()])
            .await
            .unwrap();
        assert!(batch.headlines.is_empty());
    }
}
