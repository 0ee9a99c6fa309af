use serde::Deserialize;

/// Main configuration structure for inkflow
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub frontier: FrontierConfig,
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Delay after navigation before extracting content (milliseconds)
    ///
    /// Dynamic pages need time to render. Too short a delay is a known
    /// source of flaky extraction; the value is a trade-off, not a fix.
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the user agent string: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Frontier discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FrontierConfig {
    /// Timeout for each link-discovery request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Default ceiling on discovered pages when the caller gives none
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// File suffixes excluded from link-following (binary, non-HTML content)
    #[serde(rename = "denylist-extensions", default = "default_denylist")]
    pub denylist_extensions: Vec<String>,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            max_pages: default_max_pages(),
            denylist_extensions: default_denylist(),
        }
    }
}

/// Link-graph ranking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RankConfig {
    /// PageRank damping factor
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// L1 convergence tolerance for the power iteration
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap if convergence is not reached
    #[serde(rename = "max-iterations", default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Number of top-ranked pages to keep
    #[serde(rename = "top-k", default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            top_k: default_top_k(),
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in tokens
    #[serde(rename = "chunk-size", default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks of the same source, in tokens
    #[serde(rename = "chunk-overlap", default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

/// OCR backend configuration
///
/// An explicit config field rather than an ambient environment lookup, so
/// the ingestion core stays testable without process environment mutation.
/// The credential is consumed by `OcrBackend` implementations supplied by
/// the embedding application through `Loader::with_ocr_backend`; the core
/// ships no backend of its own and only reports when a credential is set
/// with nothing installed to use it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrConfig {
    /// Credential for the OCR service; absence degrades to static extraction
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,
}

impl OcrConfig {
    /// Whether a usable credential is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path where the loaded record batch is persisted as JSON
    #[serde(rename = "store-path")]
    pub store_path: String,
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_pages() -> usize {
    100
}

fn default_denylist() -> Vec<String> {
    [".pdf", ".jpg", ".png", ".docx", ".xlsx", ".pptx", ".zip", ".jpeg"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_damping() -> f64 {
    0.9
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    100
}

fn default_top_k() -> usize {
    10
}

fn default_chunk_size() -> usize {
    200
}

fn default_chunk_overlap() -> usize {
    40
}
