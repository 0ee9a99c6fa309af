//! Breadth-first same-site URL discovery
//!
//! Starting from a base URL, the explorer fetches pages over plain HTTP,
//! collects in-site links, and walks them breadth first until the page
//! ceiling is reached or the frontier drains. Pages that fail to fetch
//! contribute no links but do not stop the walk.

use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{FrontierConfig, UserAgentConfig};
use crate::Result;

/// Discovers same-site URLs breadth first
pub struct FrontierExplorer {
    client: Client,
    denylist: Vec<String>,
}

impl FrontierExplorer {
    /// Discovery requests identify themselves the same way crawl requests do
    pub fn new(config: &FrontierConfig, user_agent: &UserAgentConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            denylist: config.denylist_extensions.clone(),
        })
    }

    /// Walks the site from `base_url`, returning at most `max_num` URLs
    ///
    /// The base URL itself is always first in discovery order. The final
    /// list is truncated to the ceiling and then sorted lexicographically.
    pub async fn discover(&self, base_url: &str, max_num: usize) -> Result<Vec<String>> {
        let base = normalize(base_url);
        info!(base = %base, max_num, "starting frontier walk");

        let mut visited: Vec<String> = Vec::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(base.clone());

        while let Some(url) = {
            // The ceiling gates dequeues only, so the walk can fetch a
            // bounded handful of pages past the budget before truncation
            if visited.len() >= max_num {
                None
            } else {
                queue.pop_front()
            }
        } {
            if visited.contains(&url) {
                continue;
            }
            visited.push(url.clone());

            let links = self.outbound_links(&url, &base).await;
            debug!(url = %url, links = links.len(), "page expanded");
            for link in links {
                if !visited.contains(&link) && !queue.contains(&link) {
                    queue.push_back(link);
                }
            }
        }

        visited.truncate(max_num);
        visited.sort();
        info!(discovered = visited.len(), "frontier walk complete");
        Ok(visited)
    }

    /// Fetches a page and returns its qualifying in-site links
    ///
    /// Fetch and parse failures are logged and yield an empty list.
    async fn outbound_links(&self, url: &str, base: &str) -> Vec<String> {
        let body = match self.fetch_page(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "frontier fetch failed");
                return Vec::new();
            }
        };

        let page_url = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                warn!(url = %url, error = %e, "unparseable frontier url");
                return Vec::new();
            }
        };

        let document = Html::parse_document(&body);
        let anchors = match Selector::parse("a[href]") {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        let mut links = Vec::new();
        for element in document.select(&anchors) {
            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            let resolved = match page_url.join(href) {
                Ok(u) => normalize(u.as_str()),
                Err(_) => continue,
            };
            if self.qualifies(&resolved, base) && !links.contains(&resolved) {
                links.push(resolved);
            }
        }
        links
    }

    async fn fetch_page(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        response.error_for_status()?.text().await
    }

    /// A link qualifies when it stays under the base, is not the base
    /// itself, and does not point at a denylisted file type
    fn qualifies(&self, url: &str, base: &str) -> bool {
        url.starts_with(base)
            && url != base
            && !self.denylist.iter().any(|ext| url.contains(ext.as_str()))
    }
}

/// Strips the fragment and any trailing slash
fn normalize(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.trim_end_matches('/').to_string()
}
