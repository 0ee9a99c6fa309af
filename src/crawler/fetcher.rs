//! Page fetching seam
//!
//! The crawler needs rendered HTML: pages that build their content with
//! client-side script only yield useful text from a real browser engine.
//! That capability sits behind the [`PageSource`]/[`PageSession`] pair so
//! browser drivers can plug in without touching the batch logic. The
//! in-tree default is a plain HTTP session, which covers static sites and
//! every test here; JavaScript-executing backends implement the same
//! traits.
//!
//! A session is acquired once per batch and released once after it,
//! mirroring the cost profile of a browser process.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::UserAgentConfig;
use crate::LoaderError;

/// Per-item fetch failure inside an open session
///
/// These are caught by the batch loop and recorded on the failing item's
/// document record; they never abort the batch.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
}

/// Factory for page sessions
///
/// Only session acquisition may fail a whole batch: if no session can be
/// started at all, no per-item work can proceed.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn PageSession>, LoaderError>;
}

/// An open page-fetching session
#[async_trait]
pub trait PageSession: Send {
    /// Navigates to the URL and returns the rendered HTML
    async fn rendered_html(&mut self, url: &str) -> Result<String, SessionError>;

    /// Releases the session's resources
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// Builds the HTTP client used for page fetching
///
/// User agent format: `CrawlerName/Version (+ContactURL; ContactEmail)`.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Plain-HTTP page source
pub struct HttpPageSource {
    client: Client,
    settle_delay: Duration,
}

impl HttpPageSource {
    /// Creates a source from the crawler configuration
    pub fn new(client: Client, settle_delay_ms: u64) -> Self {
        Self {
            client,
            settle_delay: Duration::from_millis(settle_delay_ms),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn acquire(&self) -> Result<Box<dyn PageSession>, LoaderError> {
        Ok(Box::new(HttpPageSession {
            client: self.client.clone(),
            settle_delay: self.settle_delay,
        }))
    }
}

/// Session backed by a shared HTTP client
struct HttpPageSession {
    client: Client,
    settle_delay: Duration,
}

#[async_trait]
impl PageSession for HttpPageSession {
    async fn rendered_html(&mut self, url: &str) -> Result<String, SessionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SessionError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| SessionError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Settle: give dynamic content time to render before extraction.
        // Too short a delay is a known source of flaky extraction.
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        Ok(body)
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        // Nothing to release for a plain HTTP session
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestLoader".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        let config = create_test_config();
        assert_eq!(
            config.header_value(),
            "TestLoader/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[tokio::test]
    async fn test_http_session_reports_status_errors() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let source = HttpPageSource::new(client, 0);
        let mut session = source.acquire().await.unwrap();

        let err = session.rendered_html(&server.uri()).await.unwrap_err();
        assert!(matches!(err, SessionError::Status { status: 500, .. }));
    }
}
