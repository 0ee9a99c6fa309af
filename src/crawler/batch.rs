//! Batch page crawling with per-item error isolation
//!
//! A batch opens one session, walks every requested page through it, and
//! closes the session when done. A page that fails to fetch or parse
//! becomes an error record; it never aborts the rest of the batch. The
//! output always has one record per input, in input order.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::crawler::fetcher::{PageSession, PageSource};
use crate::document::{DocumentRecord, SourceType};
use crate::extract::extract_page;
use crate::Result;

/// A page to crawl: a stable record identifier paired with its URL
#[derive(Debug, Clone)]
pub struct Locator {
    pub id: String,
    pub url: String,
}

impl Locator {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Batch crawler over a [`PageSource`]
pub struct Crawler {
    source: Arc<dyn PageSource>,
}

impl Crawler {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Crawls every locator through a single session
    ///
    /// Returns one record per input, in input order. Only session
    /// acquisition can fail the call; per-page failures are captured on
    /// the corresponding record.
    pub async fn crawl(&self, locators: &[Locator]) -> Result<Vec<DocumentRecord>> {
        let mut session = self.source.acquire().await?;
        info!(pages = locators.len(), "starting crawl batch");

        let mut records = Vec::with_capacity(locators.len());
        for locator in locators {
            records.push(self.crawl_one(session.as_mut(), locator).await);
        }

        // The session is released even when every page failed
        if let Err(e) = session.close().await {
            warn!(error = %e, "failed to close crawl session");
        }

        let failures = records.iter().filter(|r| r.is_error).count();
        info!(
            pages = records.len(),
            failures, "crawl batch complete"
        );
        Ok(records)
    }

    async fn crawl_one(
        &self,
        session: &mut dyn PageSession,
        locator: &Locator,
    ) -> DocumentRecord {
        debug!(url = %locator.url, "fetching page");
        let html = match session.rendered_html(&locator.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %locator.url, error = %e, "page fetch failed");
                return DocumentRecord::failure(
                    locator.id.clone(),
                    locator.url.clone(),
                    locator.url.clone(),
                    SourceType::Web,
                    e.to_string(),
                );
            }
        };

        let base = Url::parse(&locator.url).ok();
        let page = extract_page(&html, base.as_ref());
        let title = page.title.unwrap_or_else(|| locator.url.clone());

        let mut metadata = BTreeMap::new();
        metadata.insert("title".to_string(), title);
        metadata.insert("source".to_string(), locator.url.clone());
        metadata.insert("fetched_at".to_string(), Utc::now().to_rfc3339());

        DocumentRecord::success(
            locator.id.clone(),
            locator.url.clone(),
            page.text,
            metadata,
            SourceType::Web,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::SessionError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct ScriptedSource {
        pages: HashMap<String, String>,
    }

    struct ScriptedSession {
        pages: HashMap<String, String>,
        closed: bool,
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        async fn acquire(&self) -> crate::Result<Box<dyn PageSession>> {
            Ok(Box::new(ScriptedSession {
                pages: self.pages.clone(),
                closed: false,
            }))
        }
    }

    #[async_trait]
    impl PageSession for ScriptedSession {
        async fn rendered_html(
            &mut self,
            url: &str,
        ) -> std::result::Result<String, SessionError> {
            assert!(!self.closed, "session used after close");
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| SessionError::Fetch {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
        }

        async fn close(&mut self) -> std::result::Result<(), SessionError> {
            self.closed = true;
            Ok(())
        }
    }

    fn scripted(pages: &[(&str, &str)]) -> Crawler {
        Crawler::new(Arc::new(ScriptedSource {
            pages: pages
                .iter()
                .map(|(u, h)| (u.to_string(), h.to_string()))
                .collect(),
        }))
    }

    #[tokio::test]
    async fn test_crawl_success_record() {
        let crawler = scripted(&[(
            "https://example.com/a",
            "<html><head><title>Page A</title></head><body><p>hello world</p></body></html>",
        )]);
        let records = crawler
            .crawl(&[Locator::new("id-a", "https://example.com/a")])
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(!record.is_error);
        assert_eq!(record.id, "id-a");
        assert_eq!(record.source, "https://example.com/a");
        assert!(record.content.as_deref().unwrap().contains("hello world"));
        assert_eq!(record.metadata.get("title").unwrap(), "Page A");
        assert!(record.metadata.contains_key("fetched_at"));
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let crawler = scripted(&[
            ("https://example.com/a", "<html><body>A</body></html>"),
            ("https://example.com/c", "<html><body>C</body></html>"),
        ]);
        let records = crawler
            .crawl(&[
                Locator::new("a", "https://example.com/a"),
                Locator::new("b", "https://example.com/b"),
                Locator::new("c", "https://example.com/c"),
            ])
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        assert!(!records[0].is_error);
        assert!(records[1].is_error);
        assert!(records[1].content.is_none());
        assert!(records[1]
            .error_message
            .as_deref()
            .unwrap()
            .contains("connection refused"));
        assert!(!records[2].is_error);
        // Input order is preserved
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].id, "b");
        assert_eq!(records[2].id, "c");
    }

    #[tokio::test]
    async fn test_title_falls_back_to_url() {
        let crawler = scripted(&[("https://example.com/x", "<html><body>text</body></html>")]);
        let records = crawler
            .crawl(&[Locator::new("x", "https://example.com/x")])
            .await
            .unwrap();
        assert_eq!(
            records[0].metadata.get("title").unwrap(),
            "https://example.com/x"
        );
    }
}
