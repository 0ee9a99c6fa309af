//! Inkflow: a document loading and relevance-ranking pipeline
//!
//! This crate crawls web pages, ingests local files and inline text into
//! uniform document records, ranks crawled pages by link-graph centrality,
//! and splits content into token-bounded chunks for downstream retrieval.

pub mod chunk;
pub mod config;
pub mod crawler;
pub mod document;
pub mod extract;
pub mod frontier;
pub mod loader;
pub mod rank;

use thiserror::Error;

/// Main error type for inkflow operations
///
/// Per-item ingestion failures never surface here; they are recorded as
/// error documents (see [`document::DocumentRecord`]). Only setup failures
/// that make a whole batch impossible (a page session that cannot start, a
/// config that cannot load, a store that cannot be written) raise.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page session could not be started: {0}")]
    Session(String),

    #[error("Record store error: {0}")]
    Store(#[from] document::StoreError),

    #[error("Chunker setup error: {0}")]
    Chunker(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for inkflow operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use document::{DocumentRecord, SourceType};
pub use loader::Loader;
