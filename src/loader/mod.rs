//! Loading facade
//!
//! [`Loader`] wires discovery, crawling, file ingestion, ranking, and
//! chunking together behind one object built from a [`Config`]. Each
//! stage stays callable on its own, so pipelines can skip steps they do
//! not need.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chunk::{ChunkOutcome, Chunker};
use crate::config::{Config, RankConfig};
use crate::crawler::{build_http_client, Crawler, HttpPageSource, Locator, PageSource};
use crate::document::{DocumentRecord, SourceType};
use crate::extract::{ExtractorRegistry, FileKind, OcrBackend, TextExtractor};
use crate::frontier::FrontierExplorer;
use crate::rank::rank_candidates;
use crate::Result;

/// Document loading pipeline
pub struct Loader {
    crawler: Crawler,
    explorer: FrontierExplorer,
    registry: ExtractorRegistry,
    chunker: Chunker,
    rank: RankConfig,
}

impl Loader {
    /// Builds a loader from the configuration, with the HTTP page source
    /// and the built-in file extractors
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let source = Arc::new(HttpPageSource::new(
            client,
            config.crawler.settle_delay_ms,
        ));
        Ok(Self {
            crawler: Crawler::new(source),
            explorer: FrontierExplorer::new(&config.frontier, &config.user_agent)?,
            registry: ExtractorRegistry::new(),
            chunker: Chunker::new(
                config.chunking.chunk_size,
                config.chunking.chunk_overlap,
            )?,
            rank: config.rank.clone(),
        })
    }

    /// Replaces the page source, e.g. with a browser-backed one
    pub fn with_page_source(mut self, source: Arc<dyn PageSource>) -> Self {
        self.crawler = Crawler::new(source);
        self
    }

    /// Installs an OCR backend for PDF, presentation, and image files
    pub fn with_ocr_backend(mut self, backend: Box<dyn OcrBackend>) -> Self {
        self.registry.set_ocr_backend(backend);
        self
    }

    /// Registers an extractor for a file kind
    pub fn with_extractor(mut self, kind: FileKind, extractor: Box<dyn TextExtractor>) -> Self {
        self.registry.register(kind, extractor);
        self
    }

    /// Discovers up to `max_num` same-site URLs starting from `base_url`
    pub async fn discover(&self, base_url: &str, max_num: usize) -> Result<Vec<String>> {
        self.explorer.discover(base_url, max_num).await
    }

    /// Crawls the given URLs into document records
    ///
    /// Each URL gets a fresh identifier. One record is returned per URL,
    /// in input order, with fetch failures captured as error records.
    pub async fn from_urls(&self, urls: &[String]) -> Result<Vec<DocumentRecord>> {
        let locators: Vec<Locator> = urls
            .iter()
            .map(|url| Locator::new(Uuid::new_v4().to_string(), url.clone()))
            .collect();
        self.crawler.crawl(&locators).await
    }

    /// Wraps raw text snippets as document records
    pub fn from_texts(&self, texts: &[String]) -> Vec<DocumentRecord> {
        texts
            .iter()
            .map(|text| {
                DocumentRecord::success(
                    Uuid::new_v4().to_string(),
                    "text".to_string(),
                    text.clone(),
                    BTreeMap::new(),
                    SourceType::Text,
                )
            })
            .collect()
    }

    /// Loads local files into document records
    ///
    /// Extraction failures become error records; one record is returned
    /// per path, in input order.
    pub async fn from_files(&self, paths: &[impl AsRef<Path>]) -> Vec<DocumentRecord> {
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            records.push(self.load_file(path.as_ref()).await);
        }
        let failures = records.iter().filter(|r| r.is_error).count();
        info!(files = records.len(), failures, "file ingestion complete");
        records
    }

    async fn load_file(&self, path: &Path) -> DocumentRecord {
        let id = Uuid::new_v4().to_string();
        let source = path.to_string_lossy().to_string();
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source.clone());

        match self.registry.extract(path).await {
            Ok(text) => {
                let mut metadata = BTreeMap::new();
                metadata.insert("title".to_string(), title);
                metadata.insert("source".to_string(), source.clone());
                DocumentRecord::success(id, source, text, metadata, SourceType::File)
            }
            Err(e) => {
                warn!(path = %source, error = %e, "file extraction failed");
                DocumentRecord::failure(id, source, title, SourceType::File, e.to_string())
            }
        }
    }

    /// Keeps the most central records according to PageRank
    pub fn select_candidates(&self, records: &[DocumentRecord]) -> Vec<DocumentRecord> {
        rank_candidates(records, self.rank.top_k, &self.rank)
    }

    /// Splits records into token-bounded chunks
    pub fn chunk(&self, records: &[DocumentRecord]) -> ChunkOutcome {
        self.chunker.chunk(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ChunkingConfig, CrawlerConfig, FrontierConfig, OcrConfig, OutputConfig, UserAgentConfig,
    };
    use tempfile::TempDir;

    fn create_loader() -> Loader {
        let config = Config {
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig {
                crawler_name: "TestLoader".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            frontier: FrontierConfig::default(),
            rank: RankConfig::default(),
            chunking: ChunkingConfig::default(),
            ocr: OcrConfig::default(),
            output: OutputConfig {
                store_path: "records.json".to_string(),
            },
        };
        Loader::new(&config).unwrap()
    }

    #[test]
    fn test_from_texts() {
        let loader = create_loader();
        let records = loader.from_texts(&["first".to_string(), "second".to_string()]);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(!record.is_error);
            assert_eq!(record.source, "text");
            assert_eq!(record.source_type, SourceType::Text);
        }
        assert_ne!(records[0].id, records[1].id);
    }

    #[tokio::test]
    async fn test_from_files_mixed_outcomes() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("notes.txt");
        std::fs::write(&good, "some notes").unwrap();
        let missing = dir.path().join("gone.txt");

        let loader = create_loader();
        let records = loader.from_files(&[good.clone(), missing]).await;

        assert_eq!(records.len(), 2);
        assert!(!records[0].is_error);
        assert_eq!(records[0].content.as_deref(), Some("some notes"));
        assert_eq!(records[0].metadata.get("title").unwrap(), "notes.txt");
        assert!(records[1].is_error);
        assert_eq!(records[1].source_type, SourceType::File);
    }

    #[tokio::test]
    async fn test_unsupported_file_becomes_error_record() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("scan.png");
        std::fs::write(&image, [0u8; 4]).unwrap();

        let loader = create_loader();
        let records = loader.from_files(&[image]).await;
        assert!(records[0].is_error);
        assert!(records[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("image"));
    }
}
